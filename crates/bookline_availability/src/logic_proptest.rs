#[cfg(test)]
mod tests {
    use crate::logic::{
        expand_recurrence, project_availability, start_of_week, CalendarEvent, EventSource,
        MalformedEntryPolicy, RecurrenceRule, DAILY_OCCURRENCES, MONTHLY_OCCURRENCES,
        WEEKLY_OCCURRENCES,
    };
    use bookline_common::models::{AvailabilityPlanEntry, Listing};
    use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};
    use proptest::prelude::*;

    const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

    // Helper function to build listings with well-formed plans derived from
    // scalar parameters, so counts are predictable.
    fn create_listings(
        listing_count: usize,
        entries_per_listing: usize,
        day_offset: usize,
        start_hour: u32,
        duration_minutes: i64,
    ) -> Vec<Listing> {
        (0..listing_count)
            .map(|listing_index| {
                let entries = (0..entries_per_listing)
                    .map(|entry_index| {
                        let day = DAY_NAMES[(day_offset + listing_index + entry_index) % 7];
                        let end_minute = start_hour as i64 * 60 + duration_minutes;
                        AvailabilityPlanEntry {
                            day_of_week: day.to_string(),
                            start_time: format!("{:02}:00", start_hour),
                            end_time: format!("{:02}:{:02}", end_minute / 60, end_minute % 60),
                        }
                    })
                    .collect();
                Listing {
                    id: format!("listing-{}", listing_index),
                    title: format!("Listing {}", listing_index),
                    availability_plan: entries,
                }
            })
            .collect()
    }

    // Helper function to pick a reference date from a day offset.
    fn reference_date(day_offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(day_offset)
    }

    fn base_event(day_offset: i64, duration_minutes: i64) -> CalendarEvent {
        let start = reference_date(day_offset).and_hms_opt(10, 0, 0).unwrap();
        CalendarEvent {
            id: "base".to_string(),
            title: "Recurring".to_string(),
            start,
            end: start + Duration::minutes(duration_minutes),
            all_day: false,
            source: EventSource::AdHoc,
        }
    }

    proptest! {
        // The week window always starts on a Sunday on or before its date.
        #[test]
        fn test_start_of_week_is_the_preceding_sunday(day_offset in 0..3650i64) {
            let date = reference_date(day_offset);
            let window_start = start_of_week(date);

            prop_assert_eq!(window_start.weekday(), Weekday::Sun);
            prop_assert!(window_start <= date);
            prop_assert!(date - window_start < Duration::days(7));
        }

        // Well-formed plans always produce weeks * listings * entries events.
        #[test]
        fn test_event_count_is_weeks_times_entries(
            weeks in 0..6u32,
            listing_count in 0..4usize,
            entries_per_listing in 0..5usize,
            day_offset in 0..7usize,
            start_hour in 0..22u32,
            duration_minutes in 1..100i64,
            reference_offset in 0..3650i64,
        ) {
            let listings = create_listings(
                listing_count,
                entries_per_listing,
                day_offset,
                start_hour,
                duration_minutes,
            );
            let events = project_availability(
                &listings,
                weeks,
                reference_date(reference_offset),
                MalformedEntryPolicy::Fail,
            ).unwrap();

            prop_assert_eq!(
                events.len(),
                weeks as usize * listing_count * entries_per_listing
            );
        }

        // Every event lands inside its week's Sunday-to-Saturday window and
        // keeps the plan's wall-clock times.
        #[test]
        fn test_events_stay_inside_their_week_window(
            weeks in 1..6u32,
            listing_count in 1..4usize,
            entries_per_listing in 1..5usize,
            day_offset in 0..7usize,
            start_hour in 0..22u32,
            duration_minutes in 1..100i64,
            reference_offset in 0..3650i64,
        ) {
            let listings = create_listings(
                listing_count,
                entries_per_listing,
                day_offset,
                start_hour,
                duration_minutes,
            );
            let reference = reference_date(reference_offset);
            let events = project_availability(
                &listings,
                weeks,
                reference,
                MalformedEntryPolicy::Fail,
            ).unwrap();

            let events_per_week = listing_count * entries_per_listing;
            for (index, event) in events.iter().enumerate() {
                let week = (index / events_per_week) as i64;
                let window_start = start_of_week(reference + Duration::days(7 * week));
                let event_date = event.start.date();

                prop_assert!(event_date >= window_start,
                    "Event {:?} falls before its window starting {:?}",
                    event.start, window_start);
                prop_assert!(event_date < window_start + Duration::days(7),
                    "Event {:?} falls after its window starting {:?}",
                    event.start, window_start);
                prop_assert_eq!(event.start.time().hour(), start_hour);
                prop_assert_eq!(
                    event.end - event.start,
                    Duration::minutes(duration_minutes)
                );
            }
        }

        // Recurrence expansion yields the fixed count for each rule and
        // preserves the base duration in every occurrence.
        #[test]
        fn test_recurrence_expansion_counts_and_durations(
            day_offset in 0..3650i64,
            duration_minutes in 1..1440i64,
            rule_index in 0..4usize,
        ) {
            let rules = [
                RecurrenceRule::None,
                RecurrenceRule::Daily,
                RecurrenceRule::Weekly,
                RecurrenceRule::Monthly,
            ];
            let rule = rules[rule_index];
            let base = base_event(day_offset, duration_minutes);
            let occurrences = expand_recurrence(&base, rule);

            let expected = match rule {
                RecurrenceRule::None => 0,
                RecurrenceRule::Daily => DAILY_OCCURRENCES as usize,
                RecurrenceRule::Weekly => WEEKLY_OCCURRENCES as usize,
                RecurrenceRule::Monthly => MONTHLY_OCCURRENCES as usize,
            };
            prop_assert_eq!(occurrences.len(), expected);

            for window in occurrences.windows(2) {
                prop_assert!(window[0].start < window[1].start,
                    "Occurrences should be in ascending order");
            }
            for occurrence in &occurrences {
                prop_assert!(occurrence.start > base.start);
                prop_assert_eq!(
                    occurrence.end - occurrence.start,
                    Duration::minutes(duration_minutes)
                );
            }
        }
    }
}
