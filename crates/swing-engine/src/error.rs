//! Engine error types for swing-engine.

use swing_core::errors::CoreError;

/// Errors from setting up a reconciliation run.
///
/// Data problems never surface here: unparseable timestamps and empty
/// aggregates degrade to `None` or neutral values instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Reconciliation settings failed validation.
    #[error("settings error: {0}")]
    Settings(#[from] CoreError),

    /// A fixed UTC offset outside the representable range.
    #[error("invalid utc offset: {minutes} minutes")]
    InvalidOffset { minutes: i32 },
}
