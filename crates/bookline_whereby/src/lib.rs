// --- File: crates/bookline_whereby/src/lib.rs ---

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

#[cfg(test)]
mod routes_test;

pub use logic::{
    process_webhook, room_url, verify_webhook_signature, Meeting, WebhookEvent, WebhookEventData,
    WherebyClient, WherebyError,
};
