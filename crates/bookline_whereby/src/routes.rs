// --- File: crates/bookline_whereby/src/routes.rs ---

use crate::handlers::{
    create_meeting_handler, get_room_url_handler, whereby_webhook_handler, WherebyState,
};
use axum::{
    routing::{get, post},
    Router,
};
use bookline_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the video meeting feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(WherebyState { config });

    Router::new()
        .route("/video/meetings", post(create_meeting_handler))
        .route("/video/rooms/{room_name}", get(get_room_url_handler))
        .route("/video/webhook", post(whereby_webhook_handler))
        .with_state(state)
}
