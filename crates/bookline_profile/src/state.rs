// --- File: crates/bookline_profile/src/state.rs ---
//! Page state for the profile settings flows.
//!
//! Two independent flows share this state: uploading a new profile image and
//! saving the profile fields. Each request marks its flow in progress, and
//! each result lands back here as plain data, errors included, so the whole
//! state stays serializable.

use bookline_common::models::{UploadableFile, UploadedImage};
use bookline_common::StorableError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The image slot: one picked file on its way through an upload.
///
/// `id` is the page-local request id, minted when the file is picked; the
/// stored image id only exists once `uploaded` is filled in. The file is
/// kept through the whole round trip so the page can keep rendering the
/// local preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingImage {
    pub id: String,
    pub file: UploadableFile,
    pub uploaded: Option<UploadedImage>,
}

impl PendingImage {
    /// The stored image id, once the upload has completed.
    pub fn image_id(&self) -> Option<&str> {
        self.uploaded.as_ref().map(|image| image.id.as_str())
    }
}

/// State of the profile settings page, as updated by the two flows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileSettingsState {
    /// The image being uploaded or awaiting attachment, if any.
    pub image: Option<PendingImage>,
    pub upload_in_progress: bool,
    pub upload_error: Option<StorableError>,
    pub update_in_progress: bool,
    pub update_error: Option<StorableError>,
}

impl ProfileSettingsState {
    /// A new upload begins: the slot takes the picked file and the previous
    /// upload error clears. Any earlier pending image is replaced, which is
    /// what makes the newest request the one that counts.
    pub fn upload_requested(&mut self, id: impl Into<String>, file: UploadableFile) {
        self.image = Some(PendingImage {
            id: id.into(),
            file,
            uploaded: None,
        });
        self.upload_in_progress = true;
        self.upload_error = None;
    }

    /// An upload finished. The result only applies when `id` still matches
    /// the slot; a result for a replaced request is ignored so it cannot
    /// clobber the one in flight. Returns whether the result was applied.
    ///
    /// On a match the stored image merges into the slot and the picked file
    /// stays put.
    pub fn upload_succeeded(&mut self, id: &str, uploaded: UploadedImage) -> bool {
        match self.image.as_mut() {
            Some(pending) if pending.id == id => {
                pending.uploaded = Some(uploaded);
                self.upload_in_progress = false;
                true
            }
            _ => {
                info!("Ignoring stale upload result for request '{}'", id);
                false
            }
        }
    }

    /// An upload failed. Same staleness rule as [`upload_succeeded`]; on a
    /// match the slot empties and the error is kept for display.
    ///
    /// [`upload_succeeded`]: Self::upload_succeeded
    pub fn upload_failed(&mut self, id: &str, error: StorableError) -> bool {
        match &self.image {
            Some(pending) if pending.id == id => {
                self.image = None;
                self.upload_in_progress = false;
                self.upload_error = Some(error);
                true
            }
            _ => {
                info!("Ignoring stale upload failure for request '{}'", id);
                false
            }
        }
    }

    /// A profile save begins.
    pub fn update_requested(&mut self) {
        self.update_in_progress = true;
        self.update_error = None;
    }

    /// The profile save succeeded; the image slot empties because the stored
    /// image is now attached to the profile itself.
    pub fn update_succeeded(&mut self) {
        self.image = None;
        self.update_in_progress = false;
    }

    /// The profile save failed. The slot empties here too: the upload's
    /// attachment was not saved, so keeping it would show an avatar the
    /// profile does not have.
    pub fn update_failed(&mut self, error: StorableError) {
        self.image = None;
        self.update_in_progress = false;
        self.update_error = Some(error);
    }

    /// Clears both flow errors, e.g. when the form is edited again.
    pub fn clear_form(&mut self) {
        self.upload_error = None;
        self.update_error = None;
    }

    /// Back to a blank page state.
    pub fn reset(&mut self) {
        *self = ProfileSettingsState::default();
    }

    /// The stored image id waiting to be attached, when an upload has
    /// completed and not yet been saved.
    pub fn uploaded_image_id(&self) -> Option<&str> {
        self.image.as_ref().and_then(|pending| pending.image_id())
    }

    /// True when the last upload was rejected for its size, the case the
    /// page renders as "image too large".
    pub fn upload_rejected_as_too_large(&self) -> bool {
        self.upload_error
            .as_ref()
            .is_some_and(|error| error.is_payload_too_large())
    }
}
