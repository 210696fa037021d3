// --- File: crates/services/bookline_backend/src/main.rs ---
mod service_factory;

use axum::{routing::get, Router};
#[cfg(feature = "availability")]
use bookline_availability::routes as availability_routes;
use bookline_common::logging;
#[cfg(feature = "availability")]
use bookline_common::services::ServiceFactory;
use bookline_config::{ensure_dotenv_loaded, load_config};
#[cfg(feature = "whereby")]
use bookline_whereby::routes as whereby_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, Level};

use service_factory::BooklineServiceFactory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ensure_dotenv_loaded();

    // The guard must stay alive for the lifetime of the process; dropping it
    // stops the background log writer.
    let _log_guard = match std::env::var("LOG_DIR") {
        Ok(directory) => Some(logging::init_with_file(Level::INFO, &directory)),
        Err(_) => {
            logging::init();
            None
        }
    };

    let config = Arc::new(load_config()?);
    #[allow(unused_variables)] // only read by the feature-gated routers
    let service_factory = BooklineServiceFactory::new(config.clone());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Bookline API!" }))
        .merge(bookline_common::routes());
    #[cfg(feature = "availability")]
    let availability_router =
        availability_routes::routes(config.clone(), service_factory.transaction_service());
    #[cfg(feature = "whereby")]
    let whereby_router = whereby_routes::routes(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "availability")]
        {
            router = router.merge(availability_router);
        }
        #[cfg(feature = "whereby")]
        {
            router = router.merge(whereby_router);
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "availability")]
        use bookline_availability::doc::AvailabilityApiDoc;
        #[cfg(feature = "whereby")]
        use bookline_whereby::doc::WherebyApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookline API",
                version = "0.1.0",
                description = "Bookline Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Bookline", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "availability")]
        openapi_doc.merge(AvailabilityApiDoc::openapi());
        #[cfg(feature = "whereby")]
        openapi_doc.merge(WherebyApiDoc::openapi());
        info!("📖 Adding Swagger UI at /api/docs");

        // Create the Swagger UI route, referencing the merged doc
        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // Serve static files in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ./dist");

        let static_router = Router::new().nest_service("/static", ServeDir::new("dist"));
        app = app.merge(static_router);
        app = app.fallback_service(ServeDir::new("dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
