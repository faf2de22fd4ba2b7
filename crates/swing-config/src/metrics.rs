//! Derived-metric configuration.

use serde::{Deserialize, Serialize};
use swing_core::settings::DEFAULT_HARD_HIT_THRESHOLD;

const fn default_hard_hit_threshold() -> f64 {
    DEFAULT_HARD_HIT_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    /// Exit velocity at or above which a contact is a hard hit.
    #[serde(default = "default_hard_hit_threshold")]
    pub hard_hit_threshold: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            hard_hit_threshold: default_hard_hit_threshold(),
        }
    }
}
