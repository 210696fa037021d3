// --- File: crates/bookline_profile/src/session.rs ---
//! Drives the profile settings page against the marketplace services:
//! dispatches the two flows, applies their results to the page state, and
//! answers the view's questions (is the avatar busy, is saving allowed).

use crate::delay::UploadDelay;
use crate::form::{ProfileForm, ProfileFormValues};
use crate::state::ProfileSettingsState;
use bookline_common::models::{UploadableFile, UploadedImage, UserRecord};
use bookline_common::services::{BoxedError, ImageUploadService, ProfileService};
use bookline_common::StorableError;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct ProfileSession {
    image_upload_service: Option<Arc<dyn ImageUploadService<Error = BoxedError>>>,
    profile_service: Option<Arc<dyn ProfileService<Error = BoxedError>>>,
    state: ProfileSettingsState,
    form: ProfileForm,
    upload_delay: UploadDelay,
}

impl ProfileSession {
    pub fn new(
        image_upload_service: Option<Arc<dyn ImageUploadService<Error = BoxedError>>>,
        profile_service: Option<Arc<dyn ProfileService<Error = BoxedError>>>,
        user: &UserRecord,
    ) -> Self {
        ProfileSession {
            image_upload_service,
            profile_service,
            state: ProfileSettingsState::default(),
            form: ProfileForm::new(user),
            upload_delay: UploadDelay::new(),
        }
    }

    pub fn state(&self) -> &ProfileSettingsState {
        &self.state
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Applies an edit to the form. Editing clears both flow errors, the
    /// page's cue that the user is trying again.
    pub fn edit_values(&mut self, values: ProfileFormValues) {
        self.form.set_values(values);
        self.state.clear_form();
    }

    /// Whether the save button is disabled right now.
    pub fn submit_disabled(&self) -> bool {
        self.form.submit_disabled(&self.state)
    }

    /// Whether the avatar should render its busy overlay: an upload is in
    /// flight, or one just finished and the swap delay is still open.
    pub fn avatar_busy(&self) -> bool {
        self.state.upload_in_progress || self.upload_delay.in_progress()
    }

    /// Uploads a newly picked profile image.
    ///
    /// The result lands in the page state either way: merged into the image
    /// slot on success (with the swap delay opened), or stored as the upload
    /// error with the slot cleared. The error is also returned for callers
    /// that want it directly.
    pub async fn upload_image(
        &mut self,
        file: UploadableFile,
    ) -> Result<UploadedImage, StorableError> {
        let service = match &self.image_upload_service {
            Some(service) => service.clone(),
            None => {
                return Err(StorableError::new(
                    "service-missing",
                    "Image upload service is not configured.",
                    None,
                ));
            }
        };

        let id = Uuid::new_v4().to_string();
        self.state.upload_requested(id.clone(), file.clone());

        match service.upload_image(file).await {
            Ok(uploaded) => {
                self.state.upload_succeeded(&id, uploaded.clone());
                self.upload_delay.start();
                Ok(uploaded)
            }
            Err(err) => {
                let stored = storable_from_boxed(&err);
                warn!("Profile image upload failed: {}", stored);
                self.state.upload_failed(&id, stored.clone());
                Err(stored)
            }
        }
    }

    /// Saves the profile.
    ///
    /// A blocked submit (see [`ProfileForm::submit_disabled`]) returns an
    /// error without dispatching anything. Otherwise the current values are
    /// recorded as submitted, the payload is assembled from the form and the
    /// image slot, and the result is applied to the page state.
    pub async fn submit(&mut self) -> Result<UserRecord, StorableError> {
        if self.form.submit_disabled(&self.state) {
            return Err(StorableError::new(
                "submit-blocked",
                "Saving is disabled in the current form state.",
                None,
            ));
        }
        let service = match &self.profile_service {
            Some(service) => service.clone(),
            None => {
                return Err(StorableError::new(
                    "service-missing",
                    "Profile service is not configured.",
                    None,
                ));
            }
        };

        self.form.record_submission();
        let update = self.form.build_update(&self.state);
        self.state.update_requested();

        match service.update_profile(update).await {
            Ok(user) => {
                self.state.update_succeeded();
                self.form.reinitialize(&user);
                info!("Profile saved for user '{}'", user.id);
                Ok(user)
            }
            Err(err) => {
                let stored = storable_from_boxed(&err);
                warn!("Profile update failed: {}", stored);
                self.state.update_failed(stored.clone());
                Err(stored)
            }
        }
    }
}

/// Recovers the service's storable error from the factory's boxed wrapper,
/// falling back to a plain rendering for foreign error types.
fn storable_from_boxed(err: &BoxedError) -> StorableError {
    match err.0.downcast_ref::<StorableError>() {
        Some(stored) => stored.clone(),
        None => StorableError::from_display(err),
    }
}
