// --- File: crates/bookline_common/src/handlers.rs ---

// HTTP request handlers shared across the application.

use axum::Json;
use serde_json::{json, Value};

/// Health check handler. Reports the service name and version so load
/// balancers and uptime probes have something cheap to hit.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "bookline",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
