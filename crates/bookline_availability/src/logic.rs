// --- File: crates/bookline_availability/src/logic.rs ---
use bookline_common::models::{AvailabilityPlanEntry, Listing};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Malformed availability entry {entry_index} of listing '{listing_id}': {detail}")]
    MalformedEntry {
        listing_id: String,
        entry_index: usize,
        detail: String,
    },
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

// --- Expansion Counts ---

/// Occurrences generated for a daily recurrence, at +1..+30 days.
pub const DAILY_OCCURRENCES: u32 = 30;
/// Occurrences generated for a weekly recurrence, at +1..+10 weeks.
pub const WEEKLY_OCCURRENCES: u32 = 10;
/// Occurrences generated for a monthly recurrence, at +1..+12 months.
pub const MONTHLY_OCCURRENCES: u32 = 12;

// --- Data Structures ---

/// Where a calendar event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum EventSource {
    /// Projected from a listing's weekly availability plan.
    Availability,
    /// Created by the user directly on the calendar.
    AdHoc,
}

/// A concrete, dated calendar event.
///
/// Start and end are wall-clock local times. The generator performs no
/// timezone conversion; whatever zone the plan's times mean is the zone the
/// events mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T09:00:00"))]
    pub start: NaiveDateTime,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05T10:00:00"))]
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub source: EventSource,
}

/// Recurrence rule for an ad-hoc event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

/// What to do with availability entries that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum MalformedEntryPolicy {
    /// Drop the entry, log a warning, and keep generating. The default:
    /// one broken plan entry must not blank the whole calendar.
    #[default]
    Skip,
    /// Stop at the first malformed entry and return the error.
    Fail,
}

/// A validated availability entry, ready for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedEntry {
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// --- Ingestion ---

/// Parses a lowercase three-letter day name ("sun".."sat") into a weekday.
///
/// The week runs Sunday through Saturday, day indices 0..=6. Day names are
/// validated here, at the ingestion boundary; everything past this point
/// works with the enum.
pub fn day_of_week_from_str(day: &str) -> Option<Weekday> {
    match day {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Day index with Sunday as 0, matching the page's locale.
fn day_index(day: Weekday) -> u32 {
    day.num_days_from_sunday()
}

/// Validates one wire-format plan entry.
///
/// An entry is malformed when its day name is unknown, a time is not
/// "HH:MM", or the end does not come after the start.
pub fn parse_plan_entry(entry: &AvailabilityPlanEntry) -> Result<ParsedEntry, String> {
    let day_of_week = day_of_week_from_str(&entry.day_of_week)
        .ok_or_else(|| format!("unknown day of week '{}'", entry.day_of_week))?;
    let start_time = NaiveTime::parse_from_str(&entry.start_time, "%H:%M")
        .map_err(|_| format!("invalid start time '{}' (expected HH:MM)", entry.start_time))?;
    let end_time = NaiveTime::parse_from_str(&entry.end_time, "%H:%M")
        .map_err(|_| format!("invalid end time '{}' (expected HH:MM)", entry.end_time))?;
    if end_time <= start_time {
        return Err(format!(
            "end time '{}' must be after start time '{}'",
            entry.end_time, entry.start_time
        ));
    }
    Ok(ParsedEntry {
        day_of_week,
        start_time,
        end_time,
    })
}

/// The Sunday that starts the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(day_index(date.weekday())))
}

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

// --- Event Generation ---

/// Projects weekly availability plans onto concrete dates.
///
/// For each week index `i` in `0..weeks_to_generate`, the window is the week
/// containing `reference_date + 7*i` days, Sunday through Saturday. Every
/// valid plan entry lands on its weekday within that window, combined with
/// the entry's wall-clock times.
///
/// Events come back ordered by week, then by listing order, then by entry
/// order within each plan. With well-formed input the result holds exactly
/// `weeks_to_generate * listings * entries_per_plan` events.
///
/// Malformed entries follow `policy`: skipped with a warning by default, or
/// returned as the first error under [`MalformedEntryPolicy::Fail`].
pub fn project_availability(
    listings: &[Listing],
    weeks_to_generate: u32,
    reference_date: NaiveDate,
    policy: MalformedEntryPolicy,
) -> Result<Vec<CalendarEvent>, AvailabilityError> {
    // Validate each plan once up front so a malformed entry is reported (or
    // logged) a single time, not once per projected week.
    let mut parsed_plans: Vec<(&Listing, Vec<ParsedEntry>)> = Vec::with_capacity(listings.len());
    for listing in listings {
        let mut entries = Vec::with_capacity(listing.availability_plan.len());
        for (entry_index, entry) in listing.availability_plan.iter().enumerate() {
            match parse_plan_entry(entry) {
                Ok(parsed) => entries.push(parsed),
                Err(detail) => match policy {
                    MalformedEntryPolicy::Skip => {
                        warn!(
                            "skipping malformed availability entry {} of listing '{}': {}",
                            entry_index, listing.id, detail
                        );
                    }
                    MalformedEntryPolicy::Fail => {
                        return Err(AvailabilityError::MalformedEntry {
                            listing_id: listing.id.clone(),
                            entry_index,
                            detail,
                        });
                    }
                },
            }
        }
        parsed_plans.push((listing, entries));
    }

    let mut events = Vec::new();
    for week in 0..weeks_to_generate {
        let start_date = start_of_week(reference_date + Duration::days(7 * i64::from(week)));
        for (listing, entries) in &parsed_plans {
            for entry in entries {
                let offset = (day_index(entry.day_of_week) + 7 - day_index(start_date.weekday())) % 7;
                let target_day = start_date + Duration::days(i64::from(offset));
                events.push(CalendarEvent {
                    id: new_event_id(),
                    title: listing.title.clone(),
                    start: target_day.and_time(entry.start_time),
                    end: target_day.and_time(entry.end_time),
                    all_day: false,
                    source: EventSource::Availability,
                });
            }
        }
    }
    Ok(events)
}

/// Expands an ad-hoc event by its recurrence rule.
///
/// Daily yields 30 events at +1..+30 days, weekly 10 at +1..+10 weeks, and
/// monthly 12 at +1..+12 calendar months. The base event itself is not
/// included; the caller prepends it. Each occurrence copies the base title,
/// duration and all-day flag and gets a fresh id.
///
/// Monthly offsets clamp to the last valid day of shorter months (Jan 31
/// + 1 month lands on Feb 28, or Feb 29 in a leap year). The clamped start
/// keeps the base duration, so the end shifts with it.
pub fn expand_recurrence(base_event: &CalendarEvent, rule: RecurrenceRule) -> Vec<CalendarEvent> {
    let duration = base_event.end - base_event.start;

    let occurrence = |start: NaiveDateTime| CalendarEvent {
        id: new_event_id(),
        title: base_event.title.clone(),
        start,
        end: start + duration,
        all_day: base_event.all_day,
        source: EventSource::AdHoc,
    };

    match rule {
        RecurrenceRule::None => Vec::new(),
        RecurrenceRule::Daily => (1..=DAILY_OCCURRENCES)
            .map(|i| occurrence(base_event.start + Duration::days(i64::from(i))))
            .collect(),
        RecurrenceRule::Weekly => (1..=WEEKLY_OCCURRENCES)
            .map(|i| occurrence(base_event.start + Duration::weeks(i64::from(i))))
            .collect(),
        RecurrenceRule::Monthly => {
            let mut occurrences = Vec::with_capacity(MONTHLY_OCCURRENCES as usize);
            for i in 1..=MONTHLY_OCCURRENCES {
                // checked_add_months clamps the day within the target month.
                let Some(start) = base_event.start.checked_add_months(Months::new(i)) else {
                    break;
                };
                occurrences.push(occurrence(start));
            }
            occurrences
        }
    }
}
