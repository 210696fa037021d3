// --- File: crates/bookline_sharetribe/src/service.rs ---
//! Marketplace service implementation.
//!
//! This module implements the shared service traits on top of the Sharetribe
//! client. Errors are flattened to their storable form here, so everything
//! downstream of the traits deals in serializable error values only.

use std::sync::Arc;

use bookline_common::models::{ProfileUpdate, Transaction, UploadableFile, UploadedImage, UserRecord};
use bookline_common::services::{
    BoxFuture, ImageUploadService, ProfileService, TransactionQuery, TransactionService,
};
use bookline_common::StorableError;
use tracing::warn;

use crate::logic::SharetribeClient;

/// Sharetribe-backed implementation of the marketplace service traits.
pub struct SharetribeService {
    client: Arc<SharetribeClient>,
}

impl SharetribeService {
    /// Create a new marketplace service over an existing client.
    pub fn new(client: Arc<SharetribeClient>) -> Self {
        Self { client }
    }
}

impl ImageUploadService for SharetribeService {
    type Error = StorableError;

    fn upload_image(&self, file: UploadableFile) -> BoxFuture<'_, UploadedImage, Self::Error> {
        Box::pin(async move {
            self.client.upload_image(&file).await.map_err(|err| {
                warn!("image upload failed: {}", err);
                err.to_storable()
            })
        })
    }
}

impl ProfileService for SharetribeService {
    type Error = StorableError;

    fn update_profile(&self, update: ProfileUpdate) -> BoxFuture<'_, UserRecord, Self::Error> {
        Box::pin(async move {
            self.client.update_profile(&update).await.map_err(|err| {
                warn!("profile update failed: {}", err);
                err.to_storable()
            })
        })
    }
}

impl TransactionService for SharetribeService {
    type Error = StorableError;

    fn query_transactions(
        &self,
        query: TransactionQuery,
    ) -> BoxFuture<'_, Vec<Transaction>, Self::Error> {
        Box::pin(async move {
            self.client.query_transactions(&query).await.map_err(|err| {
                warn!("transaction query failed: {}", err);
                err.to_storable()
            })
        })
    }
}
