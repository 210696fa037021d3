// --- File: crates/bookline_common/src/error.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A serializable error value, safe to keep in page state and to render.
///
/// Service failures are stored as plain data rather than thrown: the page
/// keeps the last error of each flow and the form decides what to show from
/// it. The HTTP status survives so the UI can special-case conditions like a
/// rejected oversized image.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error_type}: {message}")]
pub struct StorableError {
    /// Stable machine-readable kind, e.g. "upload-over-limit".
    pub error_type: String,
    pub message: String,
    /// HTTP status of the failing call, when one was observed.
    pub status: Option<u16>,
}

impl StorableError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
        StorableError {
            error_type: error_type.into(),
            message: message.into(),
            status,
        }
    }

    /// Builds a storable error from any displayable error, with no status.
    pub fn from_display<E: fmt::Display>(error: &E) -> Self {
        StorableError {
            error_type: "internal".to_string(),
            message: error.to_string(),
            status: None,
        }
    }

    /// True when the failing call was rejected for exceeding the size limit
    /// (the "image too large" case on the settings page).
    pub fn is_payload_too_large(&self) -> bool {
        self.status == Some(413)
    }
}
