//! Error types for keytally.

use crate::keysym::Keysym;
use thiserror::Error;

/// Result type alias for keytally operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while capturing or accounting key events.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to start event capture.
    #[error("failed to start capture: {0}")]
    CaptureStartFailed(String),

    /// Failed to stop event capture.
    #[error("failed to stop capture: {0}")]
    CaptureStopFailed(String),

    /// Failed to open or query the keyboard mapping.
    #[error("keymap error: {0}")]
    Keymap(String),

    /// A child-table lookup hit a symbol that was never counted.
    ///
    /// The calling sequence guarantees the ancestor node exists, so this is
    /// an internal invariant violation rather than an expected condition.
    #[error("no entry for symbol {0}")]
    MissingEntry(Keysym),

    /// Writing to the dump sink failed.
    #[error("sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// Failed to install the termination signal handler.
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Failed to daemonize the process.
    #[error("failed to daemonize: {0}")]
    Daemonize(String),

    /// Thread-related error.
    #[error("thread error: {0}")]
    ThreadError(String),

    /// The requested backend is not available in this build.
    #[error("not supported: {0}")]
    NotSupported(String),
}
