// --- File: crates/services/bookline_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the concrete service set from the runtime configuration and hands
//! it out behind the shared service traits. Feature routers never see the
//! Sharetribe client directly; they get trait objects with boxed errors, so
//! they stay decoupled from the marketplace SDK.

use bookline_config::AppConfig;
use std::sync::Arc;

use bookline_common::services::{
    BoxedError, ImageUploadService, ProfileService, ServiceFactory, TransactionService,
};

#[cfg(feature = "marketplace")]
use {
    bookline_common::is_marketplace_enabled,
    bookline_common::models::{ProfileUpdate, Transaction, UploadableFile, UploadedImage, UserRecord},
    bookline_common::services::{BoxFuture, TransactionQuery},
    bookline_sharetribe::{SharetribeClient, SharetribeService},
    tracing::{error, info},
};

/// Hands out the services the feature routers consume.
///
/// Services are initialized once at startup from the application
/// configuration. A feature whose runtime flag is off, or whose config
/// section is missing, yields `None` from its getter and the routes that
/// need it answer 503.
pub struct BooklineServiceFactory {
    /// Kept so future services can read configuration at hand-out time
    /// rather than only at startup.
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "marketplace")]
    marketplace_service: Option<Arc<BoxedMarketplaceService>>,
}

impl BooklineServiceFactory {
    /// Create a new service factory from the loaded configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "marketplace")]
            marketplace_service: None,
        };

        #[cfg(feature = "marketplace")]
        {
            if is_marketplace_enabled(&config) {
                info!("ℹ️ Initializing marketplace services...");
                // The runtime check above guarantees the section is present.
                if let Some(marketplace) = config.marketplace.as_ref() {
                    match SharetribeClient::new(marketplace) {
                        Ok(client) => {
                            let service = SharetribeService::new(Arc::new(client));
                            factory.marketplace_service =
                                Some(Arc::new(BoxedMarketplaceService { inner: service }));
                            info!("✅ Marketplace services initialized.");
                        }
                        Err(err) => {
                            error!(
                                "🚨 Failed to initialize marketplace client: {}. Marketplace routes disabled.",
                                err
                            );
                        }
                    }
                }
            } else {
                info!("ℹ️ Marketplace feature compiled, but disabled via runtime config or missing marketplace config section.");
            }
        }

        factory
    }
}

/// Adapts the Sharetribe service to the shared traits by boxing its storable
/// errors. The storable form stays retrievable through `downcast_ref` on the
/// boxed value, which is how the profile page recognizes the 413 case.
#[cfg(feature = "marketplace")]
struct BoxedMarketplaceService {
    inner: SharetribeService,
}

#[cfg(feature = "marketplace")]
impl ImageUploadService for BoxedMarketplaceService {
    type Error = BoxedError;

    fn upload_image(&self, file: UploadableFile) -> BoxFuture<'_, UploadedImage, Self::Error> {
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .upload_image(file)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

#[cfg(feature = "marketplace")]
impl ProfileService for BoxedMarketplaceService {
    type Error = BoxedError;

    fn update_profile(&self, update: ProfileUpdate) -> BoxFuture<'_, UserRecord, Self::Error> {
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .update_profile(update)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

#[cfg(feature = "marketplace")]
impl TransactionService for BoxedMarketplaceService {
    type Error = BoxedError;

    fn query_transactions(
        &self,
        query: TransactionQuery,
    ) -> BoxFuture<'_, Vec<Transaction>, Self::Error> {
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .query_transactions(query)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

impl ServiceFactory for BooklineServiceFactory {
    fn image_upload_service(&self) -> Option<Arc<dyn ImageUploadService<Error = BoxedError>>> {
        #[cfg(feature = "marketplace")]
        {
            if let Some(service) = self.marketplace_service.clone() {
                return Some(service);
            }
        }

        None
    }

    fn profile_service(&self) -> Option<Arc<dyn ProfileService<Error = BoxedError>>> {
        #[cfg(feature = "marketplace")]
        {
            if let Some(service) = self.marketplace_service.clone() {
                return Some(service);
            }
        }

        None
    }

    fn transaction_service(&self) -> Option<Arc<dyn TransactionService<Error = BoxedError>>> {
        #[cfg(feature = "marketplace")]
        {
            if let Some(service) = self.marketplace_service.clone() {
                return Some(service);
            }
        }

        None
    }
}
