//! Integration tests for the availability calendar, driven through the
//! crate's public API the way the backend uses it: accepted transactions in,
//! a dated event calendar out.

mod fixtures;

use bookline_availability::{
    expand_recurrence, project_availability, CalendarView, EventSource, MalformedEntryPolicy,
    RecurrenceRule,
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use fixtures::{create_accepted_transaction, create_listing, create_transaction};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_refresh_projects_the_full_horizon_in_order() {
    let transactions = vec![
        create_accepted_transaction(
            "tx1",
            create_listing(
                "l1",
                "Sauna session",
                &[("mon", "09:00", "10:00"), ("wed", "14:00", "16:00")],
            ),
        ),
        create_transaction(
            "tx2",
            "transition/decline",
            create_listing("l2", "Massage", &[("tue", "09:00", "10:00")]),
        ),
        create_accepted_transaction(
            "tx3",
            create_listing("l3", "Yoga class", &[("sat", "08:00", "09:30")]),
        ),
    ];

    let mut view = CalendarView::new(MalformedEntryPolicy::Skip);
    let reference = date(2025, 5, 7); // Wednesday
    let projected = view.load(&transactions, 4, reference).unwrap();

    // Three valid entries across the two accepted listings, over four weeks.
    assert_eq!(projected, 12);

    let events = view.events();
    assert_eq!(events.len(), 12);
    assert!(events.iter().all(|e| e.source == EventSource::Availability));
    assert!(events.iter().all(|e| e.title != "Massage"));

    // Events come in week-sized groups; each group stays inside its
    // Sunday-to-Saturday window.
    for (index, event) in events.iter().enumerate() {
        let week = (index / 3) as i64;
        let window_start = date(2025, 5, 4) + Duration::days(7 * week);
        assert!(event.start.date() >= window_start);
        assert!(event.start.date() < window_start + Duration::days(7));
    }

    // Entries land on their plan weekday with the plan's wall-clock times.
    assert_eq!(events[0].start.date().weekday(), Weekday::Mon);
    assert_eq!(events[0].start.time().to_string(), "09:00:00");
    assert_eq!(events[1].start.date().weekday(), Weekday::Wed);
    assert_eq!(events[2].start.date().weekday(), Weekday::Sat);
    assert_eq!(events[2].end.time().to_string(), "09:30:00");
}

#[test]
fn test_ad_hoc_event_lifecycle() {
    let mut view = CalendarView::new(MalformedEntryPolicy::Skip);

    let mut draft = view.select_slot(bookline_availability::SlotSelection {
        start: date(2025, 5, 6).and_hms_opt(14, 0, 0).unwrap(),
        end: date(2025, 5, 6).and_hms_opt(15, 0, 0).unwrap(),
        all_day: false,
    });
    draft.title = "Deep clean".to_string();
    draft.recurrence = RecurrenceRule::Daily;

    let created = view.create_event(draft);
    assert_eq!(created.len(), 31); // base plus thirty daily occurrences

    let base_id = created[0].id.clone();
    assert_eq!(
        view.select_event(&base_id).map(|e| e.title.as_str()),
        Some("Deep clean")
    );

    assert!(view.remove_event(&base_id));
    assert!(view.select_event(&base_id).is_none());
    assert_eq!(view.events().len(), 30);
}

#[test]
fn test_projection_and_expansion_compose() {
    // Project a single weekly entry, then recur the first projected slot as
    // an ad-hoc series; the two generators agree on wall-clock times.
    let listings = vec![create_listing(
        "l1",
        "Sauna session",
        &[("mon", "09:00", "10:00")],
    )];
    let projected = project_availability(
        &listings,
        1,
        date(2025, 5, 5),
        MalformedEntryPolicy::Skip,
    )
    .unwrap();
    assert_eq!(projected.len(), 1);

    let weekly = expand_recurrence(&projected[0], RecurrenceRule::Weekly);
    assert_eq!(weekly.len(), 10);
    assert_eq!(weekly[0].start, projected[0].start + Duration::weeks(1));
    assert!(weekly.iter().all(|e| e.start.time() == projected[0].start.time()));
    assert!(weekly.iter().all(|e| e.source == EventSource::AdHoc));
}

#[test]
fn test_malformed_plans_do_not_blank_the_calendar() {
    let transactions = vec![create_accepted_transaction(
        "tx1",
        create_listing(
            "l1",
            "Sauna session",
            &[("mon", "09:00", "10:00"), ("noday", "09:00", "10:00")],
        ),
    )];

    let mut view = CalendarView::new(MalformedEntryPolicy::Skip);
    let projected = view.load(&transactions, 2, date(2025, 5, 5)).unwrap();
    assert_eq!(projected, 2);
}
