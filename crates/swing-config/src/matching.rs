//! Swing matching configuration.

use serde::{Deserialize, Serialize};
use swing_core::settings::DEFAULT_WINDOW_SECONDS;

const fn default_window_seconds() -> f64 {
    DEFAULT_WINDOW_SECONDS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Largest gap, in seconds, between two swings that may pair.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
        }
    }
}
