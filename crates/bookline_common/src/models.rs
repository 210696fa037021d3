// --- File: crates/bookline_common/src/models.rs ---

// Marketplace data structures shared across the application: uploadable
// files, stored images, user records, listings with availability plans, and
// transactions with their process-state resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A file chosen on the settings page, prior to upload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadableFile {
    /// Original file name, e.g. "portrait.jpg".
    pub name: String,
    /// MIME type reported by the picker, e.g. "image/jpeg".
    pub mime_type: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl fmt::Debug for UploadableFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadableFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// One rendered variant of a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Variant name, e.g. "square-small".
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// An image stored by the marketplace, returned from an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// The marketplace-assigned image id.
    pub id: String,
    /// The variants requested at upload time.
    pub variants: Vec<ImageVariant>,
}

/// The current user's record as returned by the profile API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub bio: String,
    /// Id of the attached profile image, when one is set.
    pub profile_image_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile fields submitted from the settings page.
///
/// `display_name` serializes as an explicit null when `None` so the
/// marketplace clears it; `profile_image_id` is omitted entirely when no
/// completed upload should be attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_id: Option<String>,
}

/// One entry of a listing's weekly availability plan, as the SDK delivers it.
///
/// `day_of_week` is a lowercase three-letter day ("sun".."sat") and the times
/// are "HH:MM" wall-clock strings. Validation happens where the plan is
/// ingested into the event generator, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityPlanEntry {
    #[cfg_attr(feature = "openapi", schema(example = "mon"))]
    pub day_of_week: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub end_time: String,
}

/// A marketplace listing with its weekly availability plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub availability_plan: Vec<AvailabilityPlanEntry>,
}

/// A transaction with its included listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Versioned process alias, e.g. "default-booking/release-1".
    pub process_name: String,
    /// The last transition taken, e.g. "transition/accept".
    pub last_transition: String,
    pub last_transitioned_at: DateTime<Utc>,
    pub listing: Listing,
}

impl Transaction {
    /// Resolves this transaction's current process state, or `None` when the
    /// process or transition is unknown.
    pub fn resolved_state(&self) -> Option<ProcessState> {
        let name = resolve_latest_process_name(&self.process_name);
        get_process(name).and_then(|process| process.state_of(self))
    }
}

/// Strips the version suffix from a process alias:
/// "default-booking/release-1" resolves to "default-booking".
pub fn resolve_latest_process_name(process_alias: &str) -> &str {
    process_alias
        .split_once('/')
        .map(|(name, _)| name)
        .unwrap_or(process_alias)
}

/// The state a transaction has reached in its process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessState {
    PendingPayment,
    Preauthorized,
    Accepted,
    Declined,
    Expired,
    Cancelled,
    Delivered,
    Reviewed,
}

impl ProcessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::PendingPayment => "pending-payment",
            ProcessState::Preauthorized => "preauthorized",
            ProcessState::Accepted => "accepted",
            ProcessState::Declined => "declined",
            ProcessState::Expired => "expired",
            ProcessState::Cancelled => "cancelled",
            ProcessState::Delivered => "delivered",
            ProcessState::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction process: maps the last transition taken to the state the
/// transaction is now in.
#[derive(Debug)]
pub struct Process {
    pub name: &'static str,
}

/// The built-in booking process.
pub static DEFAULT_BOOKING: Process = Process {
    name: "default-booking",
};

/// Looks up a process by its unversioned name.
pub fn get_process(name: &str) -> Option<&'static Process> {
    match name {
        "default-booking" => Some(&DEFAULT_BOOKING),
        _ => None,
    }
}

impl Process {
    /// The state reached after the transaction's last transition, or `None`
    /// for transitions this process does not know.
    pub fn state_of(&self, transaction: &Transaction) -> Option<ProcessState> {
        match transaction.last_transition.as_str() {
            "transition/request-payment" | "transition/request-payment-after-inquiry" => {
                Some(ProcessState::PendingPayment)
            }
            "transition/confirm-payment" => Some(ProcessState::Preauthorized),
            "transition/accept" | "transition/operator-accept" => Some(ProcessState::Accepted),
            "transition/decline" | "transition/operator-decline" => Some(ProcessState::Declined),
            "transition/expire" => Some(ProcessState::Expired),
            "transition/cancel" => Some(ProcessState::Cancelled),
            "transition/complete" => Some(ProcessState::Delivered),
            "transition/review-1-by-provider"
            | "transition/review-2-by-provider"
            | "transition/review-1-by-customer"
            | "transition/review-2-by-customer"
            | "transition/expire-review-period" => Some(ProcessState::Reviewed),
            _ => None,
        }
    }
}
