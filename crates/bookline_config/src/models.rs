// --- File: crates/bookline_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Marketplace SDK Config ---
// Holds non-secret marketplace API config. The client secret is loaded via a
// "secret_from_env" marker (MARKETPLACE_CLIENT_SECRET).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MarketplaceConfig {
    pub base_url: String,  // Mandatory, e.g. https://flex-api.sharetribe.com
    pub client_id: String, // Mandatory
    pub client_secret: Option<String>,
}

// --- Availability Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AvailabilityConfig {
    /// IANA timezone used to resolve "today" for the rolling horizon,
    /// e.g. "Europe/Zurich". Falls back to UTC when absent.
    pub time_zone: Option<String>,
    /// Number of weeks the calendar projects ahead when the caller does not
    /// say otherwise.
    pub weeks_to_generate: Option<u32>,
}

// --- Whereby Config ---
// Holds non-secret Whereby config. The API key and webhook secret are loaded
// via "secret_from_env" markers (WHEREBY_API_KEY, WHEREBY_WEBHOOK_SECRET).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WherebyConfig {
    pub subdomain: String, // Mandatory, e.g. "bookline" -> bookline.whereby.com
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub webhook_secret: Option<String>,
    /// Default meeting length in minutes when a room is created without an
    /// explicit end date.
    pub default_duration_minutes: Option<i64>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_marketplace: bool,
    #[serde(default)]
    pub use_availability: bool,
    #[serde(default)]
    pub use_whereby: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub marketplace: Option<MarketplaceConfig>,
    #[serde(default)]
    pub availability: Option<AvailabilityConfig>,
    #[serde(default)]
    pub whereby: Option<WherebyConfig>,
}
