//! Feature flag handling for the Bookline application.
//!
//! Feature flags are used in two ways:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! A feature is considered enabled at runtime when its `use_*` flag is set
//! AND its configuration section is present.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `marketplace`: Enables the marketplace SDK client
//! - `availability`: Enables the availability calendar
//! - `whereby`: Enables Whereby video rooms

use bookline_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the marketplace SDK is enabled at runtime.
#[cfg(feature = "marketplace")]
pub fn is_marketplace_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_marketplace, config.marketplace.as_ref())
}

/// Check if the availability calendar is enabled at runtime.
#[cfg(feature = "availability")]
pub fn is_availability_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(
        config,
        config.use_availability,
        config.availability.as_ref(),
    )
}

/// Check if Whereby video rooms are enabled at runtime.
#[cfg(feature = "whereby")]
pub fn is_whereby_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_whereby, config.whereby.as_ref())
}
