// --- File: crates/bookline_profile/src/lib.rs ---

pub mod delay;
pub mod form;
pub mod session;
pub mod state;


pub use delay::{UploadDelay, UPLOAD_CHANGE_DELAY};
pub use form::{ProfileForm, ProfileFormValues};
pub use session::ProfileSession;
pub use state::{PendingImage, ProfileSettingsState};
