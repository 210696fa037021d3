//! Test fixtures for availability calendar tests
//!
//! This module provides common test fixtures and factory functions
//! to create test data for the availability tests.

use bookline_common::models::{AvailabilityPlanEntry, Listing, Transaction};
use chrono::{TimeZone, Utc};

/// Creates a plan entry from a day name and "HH:MM" times.
pub fn create_plan_entry(day: &str, start: &str, end: &str) -> AvailabilityPlanEntry {
    AvailabilityPlanEntry {
        day_of_week: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// Creates a listing with the given weekly plan.
pub fn create_listing(id: &str, title: &str, entries: &[(&str, &str, &str)]) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        availability_plan: entries
            .iter()
            .map(|(day, start, end)| create_plan_entry(day, start, end))
            .collect(),
    }
}

/// Creates a transaction with an arbitrary last transition referencing the
/// given listing.
pub fn create_transaction(id: &str, transition: &str, listing: Listing) -> Transaction {
    Transaction {
        id: id.to_string(),
        process_name: "default-booking/release-1".to_string(),
        last_transition: transition.to_string(),
        last_transitioned_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        listing,
    }
}

/// Creates a transaction in the accepted state referencing the given listing.
pub fn create_accepted_transaction(id: &str, listing: Listing) -> Transaction {
    create_transaction(id, "transition/accept", listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookline_common::models::ProcessState;

    #[test]
    fn test_create_accepted_transaction_resolves_to_accepted() {
        let transaction =
            create_accepted_transaction("tx1", create_listing("l1", "Sauna session", &[]));
        assert_eq!(transaction.resolved_state(), Some(ProcessState::Accepted));
    }

    #[test]
    fn test_create_listing_builds_the_plan() {
        let listing = create_listing(
            "l1",
            "Sauna session",
            &[("mon", "09:00", "10:00"), ("fri", "11:00", "12:00")],
        );
        assert_eq!(listing.availability_plan.len(), 2);
        assert_eq!(listing.availability_plan[0].day_of_week, "mon");
        assert_eq!(listing.availability_plan[1].start_time, "11:00");
    }
}
