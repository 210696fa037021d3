use bookline_availability::logic::{
    expand_recurrence, project_availability, CalendarEvent, EventSource, MalformedEntryPolicy,
    RecurrenceRule,
};
use bookline_common::models::{AvailabilityPlanEntry, Listing};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

// Helper function to build listings with well-formed weekly plans
fn create_listings(listing_count: usize, entries_per_listing: usize) -> Vec<Listing> {
    (0..listing_count)
        .map(|listing_index| {
            let entries = (0..entries_per_listing)
                .map(|entry_index| AvailabilityPlanEntry {
                    day_of_week: DAY_NAMES[(listing_index + entry_index) % 7].to_string(),
                    start_time: format!("{:02}:00", 8 + entry_index % 10),
                    end_time: format!("{:02}:00", 9 + entry_index % 10),
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

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

fn base_event() -> CalendarEvent {
    let start = reference_date().and_hms_opt(10, 0, 0).unwrap();
    CalendarEvent {
        id: "base".to_string(),
        title: "Recurring".to_string(),
        start,
        end: reference_date().and_hms_opt(11, 0, 0).unwrap(),
        all_day: false,
        source: EventSource::AdHoc,
    }
}

fn benchmark_project_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_availability");

    // Benchmark a single listing over the default four-week horizon
    group.bench_function("one_listing_four_weeks", |b| {
        let listings = create_listings(1, 3);
        b.iter(|| {
            project_availability(
                black_box(&listings),
                black_box(4),
                black_box(reference_date()),
                black_box(MalformedEntryPolicy::Skip),
            )
        })
    });

    // Benchmark a busy provider page: ten listings, four weeks
    group.bench_function("ten_listings_four_weeks", |b| {
        let listings = create_listings(10, 3);
        b.iter(|| {
            project_availability(
                black_box(&listings),
                black_box(4),
                black_box(reference_date()),
                black_box(MalformedEntryPolicy::Skip),
            )
        })
    });

    // Benchmark a half-year horizon
    group.bench_function("ten_listings_twenty_six_weeks", |b| {
        let listings = create_listings(10, 3);
        b.iter(|| {
            project_availability(
                black_box(&listings),
                black_box(26),
                black_box(reference_date()),
                black_box(MalformedEntryPolicy::Skip),
            )
        })
    });

    // Benchmark dense plans: an entry on every weekday, a full year out
    group.bench_function("dense_plans_one_year", |b| {
        let listings = create_listings(20, 7);
        b.iter(|| {
            project_availability(
                black_box(&listings),
                black_box(52),
                black_box(reference_date()),
                black_box(MalformedEntryPolicy::Skip),
            )
        })
    });

    group.finish();
}

fn benchmark_expand_recurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_recurrence");
    let base = base_event();

    group.bench_function("daily", |b| {
        b.iter(|| expand_recurrence(black_box(&base), black_box(RecurrenceRule::Daily)))
    });

    group.bench_function("weekly", |b| {
        b.iter(|| expand_recurrence(black_box(&base), black_box(RecurrenceRule::Weekly)))
    });

    group.bench_function("monthly", |b| {
        b.iter(|| expand_recurrence(black_box(&base), black_box(RecurrenceRule::Monthly)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_project_availability,
    benchmark_expand_recurrence
);
criterion_main!(benches);
