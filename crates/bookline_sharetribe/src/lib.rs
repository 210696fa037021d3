// --- File: crates/bookline_sharetribe/src/lib.rs ---

// Declare modules within this crate
pub mod logic; // Sharetribe API client
pub mod service; // Shared service trait implementations

#[cfg(test)]
mod logic_test;

// Re-export the client and service for the backend wiring
pub use logic::{SharetribeClient, SharetribeError, IMAGE_VARIANTS};
pub use service::SharetribeService;
