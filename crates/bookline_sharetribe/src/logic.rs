// --- File: crates/bookline_sharetribe/src/logic.rs ---

use bookline_common::http::create_client;
use bookline_common::models::{
    AvailabilityPlanEntry, ImageVariant, Listing, ProfileUpdate, Transaction, UploadableFile,
    UploadedImage, UserRecord,
};
use bookline_common::services::TransactionQuery;
use bookline_common::StorableError;
use bookline_config::MarketplaceConfig;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

/// Timeout for marketplace API calls in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Image variants the settings page renders. Requested at upload time so the
/// response carries ready-to-display URLs.
pub const IMAGE_VARIANTS: [&str; 2] = ["square-small", "square-small2x"];

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum SharetribeError {
    #[error("Sharetribe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Sharetribe API returned an error: Status={status}, Message='{message}'")]
    ApiError { status: u16, message: String },
    #[error("Image exceeds the marketplace upload limit: {0}")]
    ImageTooLarge(String),
    #[error("Failed to parse Sharetribe API response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Marketplace configuration missing or incomplete")]
    ConfigError,
}

impl SharetribeError {
    /// Flattens this error into the serializable form page state keeps.
    ///
    /// The oversized-image case must stay distinguishable after flattening,
    /// so it maps to a dedicated type with status 413.
    pub fn to_storable(&self) -> StorableError {
        match self {
            SharetribeError::RequestError(err) => StorableError::new(
                "request-failed",
                err.to_string(),
                err.status().map(|s| s.as_u16()),
            ),
            SharetribeError::ApiError { status, message } => {
                StorableError::new("api-error", message.clone(), Some(*status))
            }
            SharetribeError::ImageTooLarge(name) => StorableError::new(
                "upload-over-limit",
                format!("image '{name}' exceeds the upload size limit"),
                Some(413),
            ),
            SharetribeError::ParseError(err) => {
                StorableError::new("parse-error", err.to_string(), None)
            }
            SharetribeError::ConfigError => StorableError::new(
                "config-error",
                "marketplace configuration missing or incomplete",
                None,
            ),
        }
    }
}

// --- Request Body Structures ---

/// Profile body in the marketplace's camelCase wire format. `displayName`
/// serializes as an explicit null to clear it; `profileImageId` is omitted
/// when no completed upload is attached.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProfileBody<'a> {
    first_name: &'a str,
    last_name: &'a str,
    display_name: Option<&'a str>,
    bio: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_image_id: Option<&'a str>,
}

impl<'a> From<&'a ProfileUpdate> for UpdateProfileBody<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        UpdateProfileBody {
            first_name: &update.first_name,
            last_name: &update.last_name,
            display_name: update.display_name.as_deref(),
            bio: &update.bio,
            profile_image_id: update.profile_image_id.as_deref(),
        }
    }
}

// --- Response Envelope Structures ---

#[derive(Deserialize, Debug)]
pub(crate) struct ImageUploadResponse {
    pub(crate) data: ImageResource,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ImageResource {
    pub(crate) id: String,
    pub(crate) attributes: ImageAttributes,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ImageAttributes {
    #[serde(default)]
    pub(crate) variants: BTreeMap<String, VariantAttributes>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct VariantAttributes {
    pub(crate) url: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl ImageResource {
    pub(crate) fn into_uploaded_image(self) -> UploadedImage {
        let variants = self
            .attributes
            .variants
            .into_iter()
            .map(|(name, v)| ImageVariant {
                name,
                url: v.url,
                width: v.width,
                height: v.height,
            })
            .collect();
        UploadedImage {
            id: self.id,
            variants,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct CurrentUserResponse {
    pub(crate) data: UserResource,
}

#[derive(Deserialize, Debug)]
pub(crate) struct UserResource {
    pub(crate) id: String,
    pub(crate) attributes: UserAttributes,
    #[serde(default)]
    pub(crate) relationships: Option<UserRelationships>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserAttributes {
    pub(crate) profile: ProfileAttributes,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileAttributes {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    #[serde(default)]
    pub(crate) bio: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRelationships {
    #[serde(default)]
    pub(crate) profile_image: Option<RelationshipData>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RelationshipData {
    pub(crate) data: Option<ResourceRef>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ResourceRef {
    pub(crate) id: String,
}

impl UserResource {
    pub(crate) fn into_user_record(self) -> UserRecord {
        let profile_image_id = self
            .relationships
            .and_then(|r| r.profile_image)
            .and_then(|rel| rel.data)
            .map(|re| re.id);
        UserRecord {
            id: self.id,
            first_name: self.attributes.profile.first_name,
            last_name: self.attributes.profile.last_name,
            display_name: self.attributes.profile.display_name,
            bio: self.attributes.profile.bio.unwrap_or_default(),
            profile_image_id,
            created_at: self.attributes.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct TransactionQueryResponse {
    #[serde(default)]
    pub(crate) data: Vec<TransactionResource>,
    #[serde(default)]
    pub(crate) included: Vec<IncludedResource>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TransactionResource {
    pub(crate) id: String,
    pub(crate) attributes: TransactionAttributes,
    pub(crate) relationships: TransactionRelationships,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionAttributes {
    pub(crate) process_name: String,
    pub(crate) last_transition: String,
    pub(crate) last_transitioned_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TransactionRelationships {
    pub(crate) listing: RelationshipData,
}

#[derive(Deserialize, Debug)]
pub(crate) struct IncludedResource {
    #[serde(rename = "type")]
    pub(crate) resource_type: String,
    pub(crate) id: String,
    pub(crate) attributes: serde_json::Value,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListingAttributes {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) availability_plan: Option<PlanAttributes>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct PlanAttributes {
    #[serde(default)]
    pub(crate) entries: Vec<EntryAttributes>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryAttributes {
    pub(crate) day_of_week: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
}

impl TransactionQueryResponse {
    /// Denormalizes the query response: resolves each transaction's listing
    /// from the `included` section. Transactions whose listing is missing or
    /// unparseable are dropped with a warning rather than failing the page.
    pub(crate) fn into_transactions(self) -> Vec<Transaction> {
        let mut listings: HashMap<String, Listing> = HashMap::new();
        for resource in self.included {
            if resource.resource_type != "listing" {
                continue;
            }
            match serde_json::from_value::<ListingAttributes>(resource.attributes) {
                Ok(attributes) => {
                    let availability_plan = attributes
                        .availability_plan
                        .map(|plan| {
                            plan.entries
                                .into_iter()
                                .map(|e| AvailabilityPlanEntry {
                                    day_of_week: e.day_of_week,
                                    start_time: e.start_time,
                                    end_time: e.end_time,
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    listings.insert(
                        resource.id.clone(),
                        Listing {
                            id: resource.id,
                            title: attributes.title,
                            availability_plan,
                        },
                    );
                }
                Err(err) => {
                    warn!("dropping unparseable included listing {}: {}", resource.id, err);
                }
            }
        }

        let mut transactions = Vec::with_capacity(self.data.len());
        for resource in self.data {
            let listing_id = resource.relationships.listing.data.as_ref().map(|r| r.id.clone());
            let Some(listing) = listing_id.and_then(|id| listings.get(&id).cloned()) else {
                warn!(
                    "dropping transaction {} with missing listing include",
                    resource.id
                );
                continue;
            };
            transactions.push(Transaction {
                id: resource.id,
                process_name: resource.attributes.process_name,
                last_transition: resource.attributes.last_transition,
                last_transitioned_at: resource.attributes.last_transitioned_at,
                listing,
            });
        }
        transactions
    }
}

// --- API Error Envelope ---

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    status: Option<u16>,
    code: Option<String>,
    title: Option<String>,
}

/// Builds a SharetribeError from a non-success response body. The error
/// envelope is best-effort: an unparseable body falls back to the raw text.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> SharetribeError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|resp| {
            resp.errors.into_iter().next().map(|detail| {
                detail
                    .title
                    .or(detail.code)
                    .unwrap_or_else(|| format!("status {}", detail.status.unwrap_or(0)))
            })
        })
        .unwrap_or_else(|| body.chars().take(200).collect());
    SharetribeError::ApiError {
        status: status.as_u16(),
        message,
    }
}

// --- Client ---

/// Client for the Sharetribe marketplace API.
///
/// Token exchange is handled upstream of this service; the configured client
/// secret acts as the bearer credential on each call.
pub struct SharetribeClient {
    base_url: String,
    client_id: String,
    client_secret: Option<String>,
    client: Client,
}

impl SharetribeClient {
    /// Create a client from the marketplace section of the app config.
    pub fn new(config: &MarketplaceConfig) -> Result<Self, SharetribeError> {
        let client = create_client(DEFAULT_TIMEOUT_SECS, true)?;
        Ok(SharetribeClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            client,
        })
    }

    fn auth_token(&self) -> &str {
        self.client_secret.as_deref().unwrap_or(&self.client_id)
    }

    /// Upload a profile image, requesting the variants the page renders.
    pub async fn upload_image(
        &self,
        file: &UploadableFile,
    ) -> Result<UploadedImage, SharetribeError> {
        let url = format!("{}/v1/api/images/upload", self.base_url);
        let variants_param = IMAGE_VARIANTS
            .iter()
            .map(|v| format!("variants.{v}"))
            .collect::<Vec<_>>()
            .join(",");
        debug!("uploading image '{}' ({} bytes)", file.name, file.data.len());

        let part = Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.auth_token())
            .query(&[
                ("expand", "true"),
                ("fields.image", variants_param.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Err(SharetribeError::ImageTooLarge(file.name.clone()));
        }
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let parsed: ImageUploadResponse = serde_json::from_str(&body)?;
        Ok(parsed.data.into_uploaded_image())
    }

    /// Update the current user's profile and return the updated record with
    /// its profile image relationship.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, SharetribeError> {
        let url = format!("{}/v1/api/current_user/update_profile", self.base_url);
        debug!("updating profile for '{} {}'", update.first_name, update.last_name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.auth_token())
            .query(&[("expand", "true"), ("include", "profileImage")])
            .json(&UpdateProfileBody::from(update))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let parsed: CurrentUserResponse = serde_json::from_str(&body)?;
        Ok(parsed.data.into_user_record())
    }

    /// Query transactions with their listings included. `role` maps to the
    /// API's `only` parameter ("sale" for the provider side).
    pub async fn query_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, SharetribeError> {
        let url = format!("{}/v1/api/transactions/query", self.base_url);
        debug!(
            "querying transactions: status={} only={}",
            query.status, query.role
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.auth_token())
            .query(&[
                ("status", query.status.as_str()),
                ("only", query.role.as_str()),
                ("include", "listing"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let parsed: TransactionQueryResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_transactions())
    }
}
