//! Cross-cutting error types for swingsync.
//!
//! Domain-specific errors (`EngineError`, `ConfigError`) live in their
//! respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any swingsync crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A reconciliation setting is outside its allowed range.
    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: String, reason: String },
}
