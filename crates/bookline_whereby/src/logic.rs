// --- File: crates/bookline_whereby/src/logic.rs ---

use bookline_common::http::create_client;
use bookline_config::WherebyConfig;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Whereby's hosted API. Overridable through `api_base_url` for tests.
pub const DEFAULT_API_BASE_URL: &str = "https://api.whereby.dev";

/// Meeting length when neither the request nor the config says otherwise.
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Timeout for Whereby API calls in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Webhook timestamps older or newer than this are rejected as replays.
const SIGNATURE_TOLERANCE_SECONDS: i64 = 600;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum WherebyError {
    #[error("Whereby API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Whereby API returned an error: Status={status}, Message='{message}'")]
    ApiError { status: u16, message: String },
    #[error("Failed to parse Whereby API response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Whereby configuration missing or incomplete: {0}")]
    ConfigError(String),
    #[error("Webhook signature verification failed: {0}")]
    WebhookSignatureError(String),
}

// --- Request Body Structures ---

/// Meeting creation body in Whereby's camelCase wire format. `hostRoomUrl`
/// is requested explicitly so the response carries the host link.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMeetingBody {
    pub(crate) end_date: String,
    pub(crate) fields: Vec<&'static str>,
}

// --- Response Structures ---

/// A meeting as returned by the Whereby API. `room_name` keeps the API's
/// leading slash (e.g. `/bookline-abc123`).
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub meeting_id: String,
    pub room_name: String,
    pub room_url: String,
    #[serde(default)]
    pub host_room_url: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

// --- API Error Envelope ---

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds a WherebyError from a non-success response body. Whereby reports
/// errors as `{"error": ...}` or `{"message": ...}`; anything else falls
/// back to the raw text.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> WherebyError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .unwrap_or_else(|| body.chars().take(200).collect());
    WherebyError::ApiError {
        status: status.as_u16(),
        message,
    }
}

// --- Room URLs ---

/// Builds the embeddable room URL for a configured subdomain. The API hands
/// out room names with a leading slash; it is stripped so the URL never
/// doubles up.
pub fn room_url(config: &WherebyConfig, room_name: &str) -> String {
    format!(
        "https://{}.whereby.com/{}",
        config.subdomain,
        room_name.trim_start_matches('/')
    )
}

// --- Client ---

/// Client for the Whereby meetings API.
#[derive(Debug)]
pub struct WherebyClient {
    api_base_url: String,
    api_key: String,
    default_duration: Duration,
    client: Client,
}

impl WherebyClient {
    /// Create a client from the whereby section of the app config. Fails
    /// when no API key is configured.
    pub fn new(config: &WherebyConfig) -> Result<Self, WherebyError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| WherebyError::ConfigError("api_key is not set".to_string()))?;
        let api_base_url = config
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let default_duration = Duration::minutes(
            config
                .default_duration_minutes
                .unwrap_or(DEFAULT_DURATION_MINUTES),
        );
        let client = create_client(DEFAULT_TIMEOUT_SECS, true)?;
        Ok(WherebyClient {
            api_base_url,
            api_key,
            default_duration,
            client,
        })
    }

    /// Create a meeting ending at `end_date`, or after the configured
    /// default duration when none is given. The host room URL is requested
    /// alongside the regular one.
    pub async fn create_meeting(
        &self,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Meeting, WherebyError> {
        let url = format!("{}/v1/meetings", self.api_base_url);
        let end_date = end_date.unwrap_or_else(|| Utc::now() + self.default_duration);
        let body = CreateMeetingBody {
            end_date: end_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            fields: vec!["hostRoomUrl"],
        };
        debug!("creating Whereby meeting ending at {}", body.end_date);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text));
        }
        let meeting: Meeting = serde_json::from_str(&text)?;
        info!("created Whereby meeting {} in {}", meeting.meeting_id, meeting.room_name);
        Ok(meeting)
    }
}

// --- Webhook Payload Structures ---

/// A Whereby webhook event, e.g. `room.client.joined`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebhookEvent {
    pub id: String,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2025-05-05T10:00:00.000Z")
    )]
    pub created_at: DateTime<Utc>,
    pub data: WebhookEventData,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WebhookEventData {
    pub room_name: String,
    #[serde(default)]
    pub num_clients: Option<u32>,
    #[serde(default)]
    pub room_session_id: Option<String>,
}

// --- Webhook Verification ---

type HmacSha256 = Hmac<Sha256>;

/// Verifies the signature of an incoming Whereby webhook request.
///
/// The `Whereby-Signature` header carries `t=<unix seconds>,v1=<hex hmac>`;
/// the HMAC-SHA256 is computed over `<t>.<raw body>` with the configured
/// webhook secret. Timestamps outside a ten minute window are rejected.
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_header: Option<&str>,
    secret: &str,
) -> Result<(), WherebyError> {
    let header_value = signature_header.ok_or_else(|| {
        WherebyError::WebhookSignatureError("missing Whereby-Signature header".to_string())
    })?;

    let mut timestamp_str: Option<&str> = None;
    let mut v1_signatures_hex: Vec<&str> = Vec::new();
    for item in header_value.split(',') {
        if let Some((key, value)) = item.trim().split_once('=') {
            match key {
                "t" => timestamp_str = Some(value),
                "v1" => v1_signatures_hex.push(value),
                _ => {}
            }
        }
    }

    let timestamp_str = timestamp_str.ok_or_else(|| {
        WherebyError::WebhookSignatureError("missing timestamp 't' in signature header".to_string())
    })?;
    let timestamp = timestamp_str.parse::<i64>().map_err(|_| {
        WherebyError::WebhookSignatureError("invalid timestamp format in signature header".to_string())
    })?;
    if v1_signatures_hex.is_empty() {
        return Err(WherebyError::WebhookSignatureError(
            "missing v1 signature in signature header".to_string(),
        ));
    }

    let age = (Utc::now().timestamp() - timestamp).abs();
    if age > SIGNATURE_TOLERANCE_SECONDS {
        return Err(WherebyError::WebhookSignatureError(format!(
            "timestamp outside tolerance ({age}s old)"
        )));
    }

    let signed_payload = format!("{}.{}", timestamp_str, String::from_utf8_lossy(payload));
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        WherebyError::WebhookSignatureError("invalid webhook secret format for HMAC".to_string())
    })?;
    mac.update(signed_payload.as_bytes());
    let calculated_hex = hex::encode(mac.finalize().into_bytes());

    for provided_hex in v1_signatures_hex {
        if constant_time_eq(calculated_hex.as_bytes(), provided_hex.as_bytes()) {
            return Ok(());
        }
    }
    Err(WherebyError::WebhookSignatureError(
        "signature mismatch".to_string(),
    ))
}

/// Helper for constant-time comparison of the hex signatures.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Handles a verified webhook event. Room activity is logged; unknown event
/// types are ignored so new Whereby event kinds never break the receiver.
pub fn process_webhook(event: &WebhookEvent) {
    match event.event_type.as_str() {
        "room.client.joined" => info!(
            "client joined room '{}' ({} connected)",
            event.data.room_name,
            event.data.num_clients.unwrap_or(0)
        ),
        "room.client.left" => info!(
            "client left room '{}' ({} connected)",
            event.data.room_name,
            event.data.num_clients.unwrap_or(0)
        ),
        "room.session.started" => info!("session started in room '{}'", event.data.room_name),
        "room.session.ended" => info!("session ended in room '{}'", event.data.room_name),
        other => debug!("ignoring Whereby event type '{}'", other),
    }
}
