// --- File: crates/bookline_common/src/routes.rs ---

// Route definitions that are common across the application.

use axum::{routing::get, Router};

use crate::handlers::health_check;

/// Creates a router containing common routes that can be used across the application.
///
/// # Returns
/// A router configured with common routes.
pub fn routes() -> Router {
    Router::new().route("/health", get(health_check))
}
