// --- File: crates/bookline_common/src/lib.rs ---

// Declare modules within this crate
pub mod models; // Marketplace data structures
pub mod handlers; // HTTP request handlers
pub mod routes; // Route definitions
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod services; // Service abstractions
pub mod logging; // Logging utilities
pub mod features; // Feature flag handling


// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::StorableError;

// Re-export HTTP utilities for easier access
pub use http::create_client;

// Re-export logging initializers for easier access
pub use logging::{init, init_with_file, init_with_level};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

// Conditionally re-export feature-specific functions
#[cfg(feature = "marketplace")]
pub use features::is_marketplace_enabled;

#[cfg(feature = "availability")]
pub use features::is_availability_enabled;

#[cfg(feature = "whereby")]
pub use features::is_whereby_enabled;
