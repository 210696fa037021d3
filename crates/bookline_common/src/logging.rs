//! Logging utilities for the Bookline application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the Bookline application. It includes functions for initializing the
//! tracing subscriber, with an optional rolling file appender for deployments
//! that log to disk.

use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber.
///
/// This function should be called at the start of the application to set up
/// logging. It configures the tracing subscriber with the default log level
/// and formats log messages with timestamps, log levels, targets, and file/line
/// information.
///
/// # Examples
///
/// ```
/// use bookline_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // Initialize with a specific log level
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display.
pub fn init_with_level(level: Level) {
    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(env_filter(level))
        .try_init();

    // Only log if initialization was successful or if it failed because a subscriber was already set
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize the tracing subscriber with an additional daily-rolling file
/// appender under `directory`.
///
/// The returned guard must be held for the lifetime of the application;
/// dropping it stops the background log writer.
pub fn init_with_file(level: Level, directory: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(directory, "bookline.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(env_filter(level))
        .try_init();

    if result.is_ok() {
        info!(directory, "Logging initialized with file appender: {}", level);
    }
    guard
}

fn env_filter(level: Level) -> EnvFilter {
    match format!("bookline={level}").parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env().add_directive(level.into()),
    }
}
