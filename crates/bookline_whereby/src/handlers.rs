// --- File: crates/bookline_whereby/src/handlers.rs ---

use crate::logic::{
    process_webhook, room_url, verify_webhook_signature, Meeting, WebhookEvent, WherebyClient,
    WherebyError,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use bookline_config::AppConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- State for Whereby Handlers ---
#[derive(Clone)]
pub struct WherebyState {
    pub config: Arc<AppConfig>,
}

// --- Request / Response Types ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateMeetingRequest {
    /// When the meeting ends. Takes precedence over `duration_minutes`.
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = Option<String>, example = "2025-05-05T11:00:00Z")
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// Meeting length from now, when no end date is given.
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration_minutes: Option<i64>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateMeetingResponse {
    #[cfg_attr(feature = "openapi", schema(example = "88255226"))]
    pub meeting_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "/bookline-5bb73a5d"))]
    pub room_name: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://bookline.whereby.com/bookline-5bb73a5d")
    )]
    pub room_url: String,
    pub host_room_url: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start_date: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end_date: DateTime<Utc>,
}

impl From<Meeting> for CreateMeetingResponse {
    fn from(meeting: Meeting) -> Self {
        CreateMeetingResponse {
            meeting_id: meeting.meeting_id,
            room_name: meeting.room_name,
            room_url: meeting.room_url,
            host_room_url: meeting.host_room_url,
            start_date: meeting.start_date,
            end_date: meeting.end_date,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoomUrlResponse {
    pub room_name: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://bookline.whereby.com/bookline-5bb73a5d")
    )]
    pub room_url: String,
}

// --- Error Mapping ---

fn map_whereby_error(err: WherebyError) -> (StatusCode, String) {
    match err {
        WherebyError::ConfigError(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Whereby configuration error: {msg}"),
        ),
        WherebyError::RequestError(e) => {
            error!("Whereby request error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "Failed to communicate with the video provider.".to_string(),
            )
        }
        WherebyError::ApiError { status, message } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            message,
        ),
        WherebyError::ParseError(e) => {
            error!("Whereby parse error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "Failed to understand the video provider response.".to_string(),
            )
        }
        WherebyError::WebhookSignatureError(msg) => {
            (StatusCode::BAD_REQUEST, format!("Invalid signature: {msg}"))
        }
    }
}

// --- Handlers ---

/// Creates a Whereby meeting room.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/video/meetings", // Path relative to /api
    request_body = CreateMeetingRequest,
    responses(
        (status = 200, description = "Meeting created", body = CreateMeetingResponse),
        (status = 400, description = "Bad Request (non-positive duration)"),
        (status = 502, description = "Video provider unreachable or returned an error"),
        (status = 503, description = "Whereby service disabled")
    ),
    tag = "video"
))]
pub async fn create_meeting_handler(
    State(state): State<Arc<WherebyState>>,
    Json(payload): Json<CreateMeetingRequest>,
) -> Result<Json<CreateMeetingResponse>, (StatusCode, String)> {
    if !state.config.use_whereby {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Whereby service is disabled.".to_string(),
        ));
    }
    let Some(whereby_config) = state.config.whereby.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Whereby configuration not loaded.".to_string(),
        ));
    };

    if let Some(minutes) = payload.duration_minutes {
        if minutes <= 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                "duration_minutes must be positive".to_string(),
            ));
        }
    }
    let end_date = payload
        .end_date
        .or_else(|| payload.duration_minutes.map(|m| Utc::now() + Duration::minutes(m)));

    let client = WherebyClient::new(whereby_config).map_err(map_whereby_error)?;
    let meeting = client.create_meeting(end_date).await.map_err(map_whereby_error)?;
    Ok(Json(meeting.into()))
}

/// Resolves the embeddable room URL for a room name on the configured
/// subdomain.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/video/rooms/{room_name}", // Path relative to /api
    params(("room_name" = String, Path, description = "Room name, with or without its leading slash")),
    responses(
        (status = 200, description = "Room URL resolved", body = RoomUrlResponse),
        (status = 503, description = "Whereby service disabled")
    ),
    tag = "video"
))]
pub async fn get_room_url_handler(
    State(state): State<Arc<WherebyState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomUrlResponse>, (StatusCode, String)> {
    if !state.config.use_whereby {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Whereby service is disabled.".to_string(),
        ));
    }
    let Some(whereby_config) = state.config.whereby.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Whereby configuration not loaded.".to_string(),
        ));
    };

    let room_url = room_url(whereby_config, &room_name);
    Ok(Json(RoomUrlResponse {
        room_name,
        room_url,
    }))
}

/// Receives Whereby webhook events. The raw body is verified against the
/// `Whereby-Signature` header before anything is parsed.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/video/webhook", // Path relative to /api
    request_body = WebhookEvent,
    responses(
        (status = 200, description = "Webhook received and acknowledged"),
        (status = 400, description = "Bad Request (invalid signature or payload)"),
        (status = 503, description = "Whereby service disabled")
    ),
    tag = "video"
))]
pub async fn whereby_webhook_handler(
    State(state): State<Arc<WherebyState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if !state.config.use_whereby {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Whereby service is disabled.".to_string(),
        ));
    }
    let secret = state
        .config
        .whereby
        .as_ref()
        .and_then(|w| w.webhook_secret.as_deref())
        .ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Whereby webhook secret is not configured.".to_string(),
        ))?;

    let signature = headers
        .get("Whereby-Signature")
        .and_then(|h| h.to_str().ok());
    verify_webhook_signature(body.as_bytes(), signature, secret).map_err(|err| {
        warn!("Whereby webhook signature verification failed: {}", err);
        map_whereby_error(err)
    })?;

    let event: WebhookEvent = serde_json::from_str(&body).map_err(|err| {
        warn!("Failed to deserialize Whereby webhook event: {}", err);
        (
            StatusCode::BAD_REQUEST,
            "Invalid payload format".to_string(),
        )
    })?;
    process_webhook(&event);
    Ok(Json(json!({"status": "received", "id": event.id})))
}
