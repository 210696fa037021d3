#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::Router;
    use bookline_common::services::{BoxFuture, BoxedError, TransactionQuery, TransactionService};
    use bookline_config::{AppConfig, AvailabilityConfig, ServerConfig};
    use std::sync::Arc;

    // Helper function to create a mock AppConfig for testing
    fn create_mock_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_marketplace: false,
            use_availability: true,
            use_whereby: false,
            marketplace: None,
            availability: Some(AvailabilityConfig {
                time_zone: Some("Europe/Zurich".to_string()),
                weeks_to_generate: Some(4),
            }),
            whereby: None,
        })
    }

    struct EmptyTransactionService;

    impl TransactionService for EmptyTransactionService {
        type Error = BoxedError;

        fn query_transactions(
            &self,
            _query: TransactionQuery,
        ) -> BoxFuture<'_, Vec<bookline_common::models::Transaction>, Self::Error> {
            Box::pin(async move { Ok(Vec::new()) })
        }
    }

    #[test]
    fn test_routes_construct_without_a_transaction_service() {
        // The refresh endpoint answers 503 at runtime in this setup; router
        // construction itself must still work.
        let _router = routes(create_mock_config(), None);
    }

    #[test]
    fn test_routes_nest_under_api_prefix() {
        let service = Arc::new(EmptyTransactionService);
        let availability = routes(create_mock_config(), Some(service));
        let _app: Router = Router::new().nest("/api", availability);
    }
}
