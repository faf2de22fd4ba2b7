//! Tunable reconciliation parameters and their documented defaults.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default matching window, in seconds.
pub const DEFAULT_WINDOW_SECONDS: f64 = 7.0;

/// Default exit velocity at or above which a contact counts as hard hit.
pub const DEFAULT_HARD_HIT_THRESHOLD: f64 = 95.0;

/// The only externally tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReconcileSettings {
    /// Maximum `|instant_a - instant_b|` for two swings to pair.
    pub window_seconds: f64,
    pub hard_hit_threshold: f64,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            hard_hit_threshold: DEFAULT_HARD_HIT_THRESHOLD,
        }
    }
}

impl ReconcileSettings {
    /// Check that both parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSetting`] for a negative or non-finite
    /// window, or a non-finite threshold.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.window_seconds.is_finite() || self.window_seconds < 0.0 {
            return Err(CoreError::InvalidSetting {
                field: "window_seconds".into(),
                reason: format!(
                    "must be a finite, non-negative number of seconds (got {})",
                    self.window_seconds
                ),
            });
        }
        if !self.hard_hit_threshold.is_finite() {
            return Err(CoreError::InvalidSetting {
                field: "hard_hit_threshold".into(),
                reason: format!("must be finite (got {})", self.hard_hit_threshold),
            });
        }
        Ok(())
    }
}
