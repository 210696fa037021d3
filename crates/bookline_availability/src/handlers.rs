// --- File: crates/bookline_availability/src/handlers.rs ---
use crate::calendar::{CalendarView, SlotSelection};
use crate::logic::{
    project_availability, AvailabilityError, CalendarEvent, MalformedEntryPolicy, RecurrenceRule,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use bookline_common::models::Listing;
use bookline_common::services::{BoxedError, TransactionQuery, TransactionService};
use bookline_config::AppConfig;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{error, info};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Weeks projected when neither the request nor the config says otherwise.
pub const DEFAULT_WEEKS_TO_GENERATE: u32 = 4;

// Shared state for the availability handlers. The calendar view lives
// behind a lock; the transaction service is optional because the whole
// marketplace side can be switched off in config.
pub struct AvailabilityState {
    pub config: Arc<AppConfig>,
    pub transaction_service: Option<Arc<dyn TransactionService<Error = BoxedError>>>,
    pub view: RwLock<CalendarView>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema, IntoParams))]
pub struct RefreshQuery {
    /// Number of weeks to project. Falls back to config, then to 4.
    pub weeks: Option<u32>,
    /// Reference date in YYYY-MM-DD format. Defaults to today in the
    /// configured time zone.
    pub reference_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RefreshResponse {
    pub projected: usize,
    pub total: usize,
    pub weeks: u32,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-05"))]
    pub reference_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventRequest {
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

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventResponse {
    pub created: Vec<CalendarEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProjectionRequest {
    pub listings: Vec<Listing>,
    pub weeks_to_generate: Option<u32>,
    /// Reference date in YYYY-MM-DD format. Defaults to today in the
    /// configured time zone.
    pub reference_date: Option<String>,
    #[serde(default)]
    pub policy: MalformedEntryPolicy,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProjectionResponse {
    pub count: usize,
    pub events: Vec<CalendarEvent>,
}

fn configured_weeks(config: &AppConfig) -> u32 {
    config
        .availability
        .as_ref()
        .and_then(|availability| availability.weeks_to_generate)
        .unwrap_or(DEFAULT_WEEKS_TO_GENERATE)
}

/// Today's date in the configured time zone, falling back to UTC when the
/// zone is absent or unparseable.
fn today_in_configured_zone(config: &AppConfig) -> NaiveDate {
    let time_zone = config
        .availability
        .as_ref()
        .and_then(|availability| availability.time_zone.clone())
        .unwrap_or_else(|| "UTC".to_string());
    let time_zone = Tz::from_str(&time_zone).unwrap_or(Tz::UTC);
    Utc::now().with_timezone(&time_zone).date_naive()
}

fn parse_reference_date(
    raw: Option<&str>,
    config: &AppConfig,
) -> Result<NaiveDate, (StatusCode, String)> {
    match raw {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                "Invalid reference_date format (YYYY-MM-DD)".to_string(),
            )
        }),
        None => Ok(today_in_configured_zone(config)),
    }
}

fn map_availability_error(err: AvailabilityError) -> (StatusCode, String) {
    match err {
        AvailabilityError::MalformedEntry { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        AvailabilityError::TimeParseError(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        AvailabilityError::CalculationError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn lock_poisoned<T>(_err: T) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Calendar state lock poisoned.".to_string(),
    )
}

/// Handler to reload the calendar's projected events from accepted
/// transactions.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/availability/refresh", // Path relative to /api
    params(RefreshQuery),
    responses(
        (status = 200, description = "Projection rebuilt from accepted transactions", body = RefreshResponse),
        (status = 400, description = "Bad request (e.g., invalid date format)"),
        (status = 502, description = "Marketplace query failed"),
        (status = 503, description = "Availability service disabled or not configured")
    ),
    tag = "Availability"
))]
pub async fn refresh_availability_handler(
    State(state): State<Arc<AvailabilityState>>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<RefreshResponse>, (StatusCode, String)> {
    if !state.config.use_availability {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Availability service is disabled.".to_string(),
        ));
    }

    let service = state.transaction_service.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Marketplace transaction service is not configured.".to_string(),
    ))?;

    let weeks = query.weeks.unwrap_or_else(|| configured_weeks(&state.config));
    let reference_date = parse_reference_date(query.reference_date.as_deref(), &state.config)?;

    let transactions = service
        .query_transactions(TransactionQuery::accepted_sales())
        .await
        .map_err(|err| {
            error!("Failed to query transactions for availability: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to query transactions: {}", err),
            )
        })?;

    let mut view = state.view.write().map_err(lock_poisoned)?;
    let projected = view
        .load(&transactions, weeks, reference_date)
        .map_err(map_availability_error)?;
    let total = view.projected_len() + view.ad_hoc_len();
    info!(
        "Rebuilt availability projection: {} events over {} weeks from {} transactions",
        projected,
        weeks,
        transactions.len()
    );

    Ok(Json(RefreshResponse {
        projected,
        total,
        weeks,
        reference_date,
    }))
}

/// Handler to list every event on the calendar.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability/events", // Path relative to /api
    responses(
        (status = 200, description = "Projected and ad-hoc events in calendar order", body = [CalendarEvent]),
        (status = 503, description = "Availability service disabled")
    ),
    tag = "Availability"
))]
pub async fn list_events_handler(
    State(state): State<Arc<AvailabilityState>>,
) -> Result<Json<Vec<CalendarEvent>>, (StatusCode, String)> {
    if !state.config.use_availability {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Availability service is disabled.".to_string(),
        ));
    }

    let view = state.view.read().map_err(lock_poisoned)?;
    Ok(Json(view.events()))
}

/// Handler to create an ad-hoc event, expanding its recurrence rule.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/availability/events", // Path relative to /api
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Created events, base first", body = CreateEventResponse),
        (status = 400, description = "Blank title or end not after start"),
        (status = 503, description = "Availability service disabled")
    ),
    tag = "Availability"
))]
pub async fn create_event_handler(
    State(state): State<Arc<AvailabilityState>>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, (StatusCode, String)> {
    if !state.config.use_availability {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Availability service is disabled.".to_string(),
        ));
    }

    if request.end <= request.start {
        return Err((
            StatusCode::BAD_REQUEST,
            "end must be after start".to_string(),
        ));
    }

    let mut view = state.view.write().map_err(lock_poisoned)?;
    let mut draft = view.select_slot(SlotSelection {
        start: request.start,
        end: request.end,
        all_day: request.all_day,
    });
    draft.title = request.title;
    draft.recurrence = request.recurrence;

    let created = view.create_event(draft);
    if created.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Event title must not be empty.".to_string(),
        ));
    }
    info!(
        "Created ad-hoc event '{}' with {} occurrence(s)",
        created[0].title,
        created.len()
    );

    Ok(Json(CreateEventResponse { created }))
}

/// Handler to remove an ad-hoc event.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/availability/events/{id}", // Path relative to /api
    params(
        ("id" = String, Path, description = "The ID of the ad-hoc event to remove")
    ),
    responses(
        (status = 200, description = "Event removed"),
        (status = 404, description = "No ad-hoc event with that ID"),
        (status = 503, description = "Availability service disabled")
    ),
    tag = "Availability"
))]
pub async fn delete_event_handler(
    State(state): State<Arc<AvailabilityState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !state.config.use_availability {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Availability service is disabled.".to_string(),
        ));
    }

    let mut view = state.view.write().map_err(lock_poisoned)?;
    if view.remove_event(&id) {
        Ok(Json(json!({ "status": "removed", "id": id })))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("No ad-hoc event with id '{}'", id),
        ))
    }
}

/// Handler to project availability plans supplied in the request body.
///
/// Stateless companion to the refresh flow: nothing is stored, the
/// projection is computed and returned.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/availability/projection", // Path relative to /api
    request_body = ProjectionRequest,
    responses(
        (status = 200, description = "Projected events in week, listing, entry order", body = ProjectionResponse),
        (status = 400, description = "Invalid reference date"),
        (status = 422, description = "Malformed plan entry under the fail policy"),
        (status = 503, description = "Availability service disabled")
    ),
    tag = "Availability"
))]
pub async fn project_availability_handler(
    State(state): State<Arc<AvailabilityState>>,
    Json(request): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResponse>, (StatusCode, String)> {
    if !state.config.use_availability {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Availability service is disabled.".to_string(),
        ));
    }

    let weeks = request
        .weeks_to_generate
        .unwrap_or_else(|| configured_weeks(&state.config));
    let reference_date = parse_reference_date(request.reference_date.as_deref(), &state.config)?;

    let events = project_availability(&request.listings, weeks, reference_date, request.policy)
        .map_err(map_availability_error)?;

    Ok(Json(ProjectionResponse {
        count: events.len(),
        events,
    }))
}
