#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::Router;
    use bookline_config::{AppConfig, ServerConfig, WherebyConfig};
    use std::sync::Arc;

    // Helper function to create a mock AppConfig for testing
    fn create_mock_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_marketplace: false,
            use_availability: false,
            use_whereby: true,
            marketplace: None,
            availability: None,
            whereby: Some(WherebyConfig {
                subdomain: "bookline".to_string(),
                api_base_url: None,
                api_key: Some("test-key".to_string()),
                webhook_secret: Some("whsec_test".to_string()),
                default_duration_minutes: Some(45),
            }),
        })
    }

    #[test]
    fn test_routes_construct_from_config() {
        let _router = routes(create_mock_config());
    }

    #[test]
    fn test_routes_nest_under_api_prefix() {
        let video = routes(create_mock_config());
        let _app: Router = Router::new().nest("/api", video);
    }
}
