// --- File: crates/bookline_common/src/services.rs ---
//! Service abstractions for the marketplace SDK.
//!
//! This module provides trait definitions for the external marketplace services
//! used by the application. These traits allow for dependency injection and
//! easier testing by decoupling page and calendar logic from the concrete SDK
//! client.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::{ProfileUpdate, Transaction, UploadableFile, UploadedImage, UserRecord};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for profile image upload operations.
///
/// The upload returns the stored image together with the variants the page
/// asked for, so the caller can track which file produced which image id.
pub trait ImageUploadService: Send + Sync {
    /// Error type returned by upload operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Upload a profile image and return the stored image with its variants.
    fn upload_image(&self, file: UploadableFile) -> BoxFuture<'_, UploadedImage, Self::Error>;
}

/// A trait for current-user profile operations.
pub trait ProfileService: Send + Sync {
    /// Error type returned by profile operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Update the current user's profile fields and return the updated record,
    /// including the profile image relationship.
    fn update_profile(&self, update: ProfileUpdate) -> BoxFuture<'_, UserRecord, Self::Error>;
}

/// Filter for a transaction query, mirroring the SDK's query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Transaction status filter, e.g. "accepted".
    pub status: String,
    /// The querying user's role, e.g. "sale" for the provider side.
    pub role: String,
}

impl TransactionQuery {
    /// The query the availability page issues: accepted sale transactions.
    pub fn accepted_sales() -> Self {
        TransactionQuery {
            status: "accepted".to_string(),
            role: "sale".to_string(),
        }
    }
}

/// A trait for transaction query operations.
pub trait TransactionService: Send + Sync {
    /// Error type returned by transaction operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Query transactions matching the given filter, with their listings
    /// included.
    fn query_transactions(
        &self,
        query: TransactionQuery,
    ) -> BoxFuture<'_, Vec<Transaction>, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the marketplace
/// services. A `None` return means the service is not configured.
pub trait ServiceFactory: Send + Sync {
    /// Get an image upload service instance.
    fn image_upload_service(&self) -> Option<Arc<dyn ImageUploadService<Error = BoxedError>>>;

    /// Get a profile service instance.
    fn profile_service(&self) -> Option<Arc<dyn ProfileService<Error = BoxedError>>>;

    /// Get a transaction service instance.
    fn transaction_service(&self) -> Option<Arc<dyn TransactionService<Error = BoxedError>>>;
}
