// --- File: crates/bookline_profile/src/form.rs ---
//! The profile settings form: values, validation, and submit gating.

use crate::state::ProfileSettingsState;
use bookline_common::models::{ProfileUpdate, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The editable profile fields, as they sit in the form inputs.
///
/// `display_name` is a plain string here; an input cleared to blank means
/// "unset", which the update payload turns into an explicit null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileFormValues {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub bio: String,
}

impl ProfileFormValues {
    pub fn from_user(user: &UserRecord) -> Self {
        ProfileFormValues {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            display_name: user.display_name.clone().unwrap_or_default(),
            bio: user.bio.clone(),
        }
    }

    /// First and last name are required; everything else may be blank.
    pub fn is_valid(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

/// The form with its initial values and submission history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    values: ProfileFormValues,
    initial: ProfileFormValues,
    last_submitted: Option<Value>,
}

impl ProfileForm {
    /// A form initialized from the current user's record.
    pub fn new(user: &UserRecord) -> Self {
        let initial = ProfileFormValues::from_user(user);
        ProfileForm {
            values: initial.clone(),
            initial,
            last_submitted: None,
        }
    }

    pub fn values(&self) -> &ProfileFormValues {
        &self.values
    }

    pub fn set_values(&mut self, values: ProfileFormValues) {
        self.values = values;
    }

    /// True while nothing differs from the initial values.
    pub fn pristine(&self) -> bool {
        self.values == self.initial
    }

    /// True when the current values deep-equal the values of the last
    /// submission, so resubmitting would send an identical payload.
    pub fn pristine_since_last_submit(&self) -> bool {
        match &self.last_submitted {
            Some(submitted) => serde_json::to_value(&self.values)
                .map(|current| &current == submitted)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Whether the save button is disabled.
    ///
    /// Saving is blocked while the values are invalid, nothing has changed
    /// (against the initial values or the last submission), or either flow
    /// is still in progress.
    pub fn submit_disabled(&self, state: &ProfileSettingsState) -> bool {
        !self.values.is_valid()
            || self.pristine()
            || self.pristine_since_last_submit()
            || state.upload_in_progress
            || state.update_in_progress
    }

    /// Records the current values as submitted. Called when the save request
    /// is dispatched, not when it completes, so a failed save still blocks
    /// an identical retry until something is edited.
    pub fn record_submission(&mut self) {
        self.last_submitted = serde_json::to_value(&self.values).ok();
    }

    /// Assembles the update payload from the form and the image slot.
    ///
    /// Names are trimmed; a blank display name becomes an explicit null so
    /// the marketplace clears it; the bio is sent as typed. The image id is
    /// attached only when the slot holds a completed upload, since the slot
    /// always carries the picked file alongside it.
    pub fn build_update(&self, state: &ProfileSettingsState) -> ProfileUpdate {
        let display_name = {
            let trimmed = self.values.display_name.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        ProfileUpdate {
            first_name: self.values.first_name.trim().to_string(),
            last_name: self.values.last_name.trim().to_string(),
            display_name,
            bio: self.values.bio.clone(),
            profile_image_id: state.uploaded_image_id().map(|id| id.to_string()),
        }
    }

    /// Re-initializes from a freshly saved user record, making the form
    /// pristine against what the marketplace now holds.
    pub fn reinitialize(&mut self, user: &UserRecord) {
        self.initial = ProfileFormValues::from_user(user);
        self.values = self.initial.clone();
    }
}
