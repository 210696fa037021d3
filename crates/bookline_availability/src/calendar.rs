// --- File: crates/bookline_availability/src/calendar.rs ---
use crate::logic::{
    expand_recurrence, project_availability, AvailabilityError, CalendarEvent, EventSource,
    MalformedEntryPolicy, RecurrenceRule,
};
use bookline_common::models::{Listing, ProcessState, Transaction};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A slot picked on the calendar grid, before the event exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotSelection {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T09:00:00"))]
    pub start: NaiveDateTime,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T10:00:00"))]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
}

/// A draft event awaiting confirmation.
///
/// Produced by [`CalendarView::select_slot`] with the slot's bounds filled
/// in; the title and recurrence are for the caller to set before handing
/// the draft to [`CalendarView::create_event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NewEvent {
    #[serde(default)]
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T09:00:00"))]
    pub start: NaiveDateTime,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T10:00:00"))]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

/// The calendar's event state: availability projections plus ad-hoc events.
///
/// Projected events are replaced wholesale on every [`load`](Self::load);
/// ad-hoc events persist until removed or [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct CalendarView {
    projected: Vec<CalendarEvent>,
    ad_hoc: Vec<CalendarEvent>,
    policy: MalformedEntryPolicy,
}

impl CalendarView {
    pub fn new(policy: MalformedEntryPolicy) -> Self {
        CalendarView {
            projected: Vec::new(),
            ad_hoc: Vec::new(),
            policy,
        }
    }

    /// Rebuilds the projected events from a page of transactions.
    ///
    /// Only transactions whose last transition resolves to the accepted
    /// state contribute; each accepted listing is projected once even when
    /// several transactions reference it. Returns the number of projected
    /// events.
    pub fn load(
        &mut self,
        transactions: &[Transaction],
        weeks_to_generate: u32,
        reference_date: NaiveDate,
    ) -> Result<usize, AvailabilityError> {
        let listings = accepted_listings(transactions);
        let projected =
            project_availability(&listings, weeks_to_generate, reference_date, self.policy)?;
        let count = projected.len();
        self.projected = projected;
        Ok(count)
    }

    /// Turns a selected slot into a draft event for the caller to complete.
    pub fn select_slot(&self, selection: SlotSelection) -> NewEvent {
        NewEvent {
            title: String::new(),
            start: selection.start,
            end: selection.end,
            all_day: selection.all_day,
            recurrence: RecurrenceRule::None,
        }
    }

    /// Confirms a draft, adding the event and its recurrences to the
    /// calendar.
    ///
    /// A draft with a blank title is discarded and creates nothing. The
    /// returned slice is the base event followed by its expansion, in the
    /// order they were added.
    pub fn create_event(&mut self, draft: NewEvent) -> Vec<CalendarEvent> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Vec::new();
        }
        let base = CalendarEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            source: EventSource::AdHoc,
        };
        let mut created = vec![base.clone()];
        created.extend(expand_recurrence(&base, draft.recurrence));
        self.ad_hoc.extend(created.iter().cloned());
        created
    }

    /// Looks up an event by id, projected or ad-hoc.
    pub fn select_event(&self, id: &str) -> Option<&CalendarEvent> {
        self.projected
            .iter()
            .chain(self.ad_hoc.iter())
            .find(|event| event.id == id)
    }

    /// Removes an ad-hoc event by id. Projected events cannot be removed;
    /// they reflect listing plans, not calendar edits.
    pub fn remove_event(&mut self, id: &str) -> bool {
        let before = self.ad_hoc.len();
        self.ad_hoc.retain(|event| event.id != id);
        self.ad_hoc.len() < before
    }

    /// All events, projected first, each group in insertion order.
    pub fn events(&self) -> Vec<CalendarEvent> {
        let mut all = Vec::with_capacity(self.projected.len() + self.ad_hoc.len());
        all.extend(self.projected.iter().cloned());
        all.extend(self.ad_hoc.iter().cloned());
        all
    }

    pub fn projected_len(&self) -> usize {
        self.projected.len()
    }

    pub fn ad_hoc_len(&self) -> usize {
        self.ad_hoc.len()
    }

    /// Drops every event, projected and ad-hoc.
    pub fn reset(&mut self) {
        self.projected.clear();
        self.ad_hoc.clear();
    }
}

/// Listings backing accepted transactions, deduplicated by id in order of
/// first appearance.
fn accepted_listings(transactions: &[Transaction]) -> Vec<Listing> {
    let mut seen: Vec<&str> = Vec::new();
    let mut listings = Vec::new();
    for transaction in transactions {
        if transaction.resolved_state() != Some(ProcessState::Accepted) {
            continue;
        }
        if seen.contains(&transaction.listing.id.as_str()) {
            continue;
        }
        seen.push(&transaction.listing.id);
        listings.push(transaction.listing.clone());
    }
    listings
}
