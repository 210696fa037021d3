//! Test fixtures for Whereby client tests
//!
//! This module provides common test fixtures and factory functions
//! to create test data for video meeting tests.

use bookline_config::WherebyConfig;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Creates a whereby config pointing at the given API base URL
pub fn create_whereby_config(api_base_url: &str) -> WherebyConfig {
    WherebyConfig {
        subdomain: "bookline".to_string(),
        api_base_url: Some(api_base_url.to_string()),
        api_key: Some("test-key".to_string()),
        webhook_secret: Some("whsec_test".to_string()),
        default_duration_minutes: Some(45),
    }
}

/// Builds a `Whereby-Signature` header value the way the provider signs a
/// webhook delivery.
#[allow(dead_code)]
pub fn sign_payload(secret: &str, timestamp: i64, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.{body}").as_bytes());
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookline_whereby::verify_webhook_signature;
    use chrono::Utc;

    #[test]
    fn test_signed_payload_verifies() {
        let body = r#"{"id":"evt-1"}"#;
        let header = sign_payload("whsec_test", Utc::now().timestamp(), body);
        verify_webhook_signature(body.as_bytes(), Some(&header), "whsec_test").unwrap();
    }

    #[test]
    fn test_config_points_at_the_given_base_url() {
        let config = create_whereby_config("http://127.0.0.1:9000");
        assert_eq!(config.api_base_url.as_deref(), Some("http://127.0.0.1:9000"));
    }
}
