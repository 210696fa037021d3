// --- File: crates/bookline_availability/src/routes.rs ---

use crate::handlers::{
    create_event_handler, delete_event_handler, list_events_handler,
    project_availability_handler, refresh_availability_handler, AvailabilityState,
};
use crate::logic::MalformedEntryPolicy;
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::calendar::CalendarView;
use bookline_common::services::{BoxedError, TransactionService};
use bookline_config::AppConfig;
use std::sync::{Arc, RwLock};

/// Creates a router containing all routes for the availability feature.
///
/// The transaction service comes from the backend's service factory; when
/// the marketplace side is disabled it is `None` and the refresh endpoint
/// answers 503.
pub fn routes(
    config: Arc<AppConfig>,
    transaction_service: Option<Arc<dyn TransactionService<Error = BoxedError>>>,
) -> Router {
    let state = Arc::new(AvailabilityState {
        config,
        transaction_service,
        view: RwLock::new(CalendarView::new(MalformedEntryPolicy::Skip)),
    });

    Router::new()
        .route("/availability/refresh", post(refresh_availability_handler))
        .route(
            "/availability/events",
            get(list_events_handler).post(create_event_handler),
        )
        .route("/availability/events/{id}", delete(delete_event_handler))
        .route(
            "/availability/projection",
            post(project_availability_handler),
        )
        .with_state(state)
}
