// --- File: crates/bookline_profile/src/delay.rs ---
//! The avatar swap delay.
//!
//! When an upload completes, the page keeps showing the upload overlay for a
//! short window while the new image is fetched and rendered, instead of
//! flashing the old avatar. This type owns that window: start it when an
//! upload finishes, poll it from the view, drop or cancel it on navigation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long the overlay outlives the upload itself.
pub const UPLOAD_CHANGE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Default)]
pub struct UploadDelay {
    active: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl UploadDelay {
    pub fn new() -> Self {
        UploadDelay::default()
    }

    /// Opens the delay window. A window already running is cancelled first,
    /// so back-to-back uploads restart the full delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.cancel();
        let active = Arc::new(AtomicBool::new(true));
        self.active = active.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(UPLOAD_CHANGE_DELAY).await;
            active.store(false, Ordering::SeqCst);
        }));
    }

    /// True while the window is open.
    pub fn in_progress(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Closes the window immediately.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.active.store(false, Ordering::SeqCst);
    }
}

impl Drop for UploadDelay {
    fn drop(&mut self) {
        self.cancel();
    }
}
