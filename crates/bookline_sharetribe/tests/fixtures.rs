//! Test fixtures for marketplace client tests
//!
//! This module provides common test fixtures and factory functions
//! to create test data for Sharetribe client tests.

use bookline_common::models::UploadableFile;
use bookline_config::MarketplaceConfig;

/// Creates a marketplace config pointing at the given base URL
pub fn create_marketplace_config(base_url: &str) -> MarketplaceConfig {
    MarketplaceConfig {
        base_url: base_url.to_string(),
        client_id: "test-client".to_string(),
        client_secret: Some("test-secret".to_string()),
    }
}

/// Creates a small uploadable file for testing
#[allow(dead_code)]
pub fn create_test_file(name: &str) -> UploadableFile {
    UploadableFile {
        name: name.to_string(),
        mime_type: "image/jpeg".to_string(),
        data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
    }
}
