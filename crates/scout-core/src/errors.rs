//! Cross-cutting error types for Scout.
//!
//! Domain-specific errors (`ApiError`, `SubmitError`, `PrefsError`) live in
//! their respective crates. `scout-cli` converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Scout crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid job transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A mode string did not name a known mode.
    #[error("Unknown mode '{0}' (expected 'search' or 'research')")]
    UnknownMode(String),
}
