// --- File: crates/bookline_availability/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::calendar::{NewEvent, SlotSelection};
use crate::handlers::{
    CreateEventRequest, CreateEventResponse, ProjectionRequest, ProjectionResponse, RefreshQuery,
    RefreshResponse,
};
use crate::logic::{CalendarEvent, EventSource, MalformedEntryPolicy, RecurrenceRule};
use bookline_common::models::{AvailabilityPlanEntry, Listing};

#[utoipa::path(
    post,
    path = "/availability/refresh",
    params(
        ("weeks" = Option<u32>, Query, description = "Number of weeks to project", example = 4),
        ("reference_date" = Option<String>, Query, description = "Reference date in YYYY-MM-DD format", example = "2025-05-05", format = "date")
    ),
    responses(
        (status = 200, description = "Projection rebuilt from accepted transactions", body = RefreshResponse,
         example = json!({
             "projected": 56,
             "total": 58,
             "weeks": 4,
             "reference_date": "2025-05-05"
         })
        ),
        (status = 400, description = "Invalid reference date",
         example = json!("Invalid reference_date format (YYYY-MM-DD)")
        ),
        (status = 502, description = "Marketplace query failed"),
        (status = 503, description = "Availability service disabled or not configured")
    )
)]
fn doc_refresh_availability_handler() {}

#[utoipa::path(
    get,
    path = "/availability/events",
    responses(
        (status = 200, description = "Projected and ad-hoc events in calendar order", body = [CalendarEvent],
         example = json!([
             {
                 "id": "5f6d1c2e-9f2a-4d1b-8a3c-0e7b6a5d4c3b",
                 "title": "Sauna session",
                 "start": "2025-05-05T09:00:00",
                 "end": "2025-05-05T10:00:00",
                 "all_day": false,
                 "source": "availability"
             }
         ])
        ),
        (status = 503, description = "Availability service disabled")
    )
)]
fn doc_list_events_handler() {}

#[utoipa::path(
    post,
    path = "/availability/events",
    request_body(content = CreateEventRequest, example = json!({
        "title": "Deep clean",
        "start": "2025-05-06T14:00:00",
        "end": "2025-05-06T15:30:00",
        "recurrence": "weekly"
    })),
    responses(
        (status = 200, description = "Created events, base first", body = CreateEventResponse),
        (status = 400, description = "Blank title or end not after start",
         example = json!("Event title must not be empty.")
        ),
        (status = 503, description = "Availability service disabled")
    )
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    delete,
    path = "/availability/events/{id}",
    params(
        ("id" = String, Path, description = "The ID of the ad-hoc event to remove")
    ),
    responses(
        (status = 200, description = "Event removed",
         example = json!({
             "status": "removed",
             "id": "5f6d1c2e-9f2a-4d1b-8a3c-0e7b6a5d4c3b"
         })
        ),
        (status = 404, description = "No ad-hoc event with that ID"),
        (status = 503, description = "Availability service disabled")
    )
)]
fn doc_delete_event_handler() {}

#[utoipa::path(
    post,
    path = "/availability/projection",
    request_body(content = ProjectionRequest, example = json!({
        "listings": [
            {
                "id": "listing-1",
                "title": "Sauna session",
                "availability_plan": [
                    { "day_of_week": "mon", "start_time": "09:00", "end_time": "10:00" }
                ]
            }
        ],
        "weeks_to_generate": 2,
        "reference_date": "2025-05-05"
    })),
    responses(
        (status = 200, description = "Projected events in week, listing, entry order", body = ProjectionResponse),
        (status = 400, description = "Invalid reference date"),
        (status = 422, description = "Malformed plan entry under the fail policy"),
        (status = 503, description = "Availability service disabled")
    )
)]
fn doc_project_availability_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_refresh_availability_handler,
        doc_list_events_handler,
        doc_create_event_handler,
        doc_delete_event_handler,
        doc_project_availability_handler
    ),
    components(
        schemas(
            CalendarEvent,
            EventSource,
            RecurrenceRule,
            MalformedEntryPolicy,
            SlotSelection,
            NewEvent,
            RefreshQuery,
            RefreshResponse,
            CreateEventRequest,
            CreateEventResponse,
            ProjectionRequest,
            ProjectionResponse,
            Listing,
            AvailabilityPlanEntry
        )
    ),
    tags(
        (name = "availability", description = "Listing availability calendar API")
    ),
    servers(
        (url = "/api", description = "Availability API server")
    )
)]
pub struct AvailabilityApiDoc;
