// --- File: crates/bookline_availability/src/lib.rs ---

pub mod calendar;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod routes_test;

pub use calendar::{CalendarView, NewEvent, SlotSelection};
pub use logic::{
    expand_recurrence, project_availability, AvailabilityError, CalendarEvent, EventSource,
    MalformedEntryPolicy, RecurrenceRule,
};
