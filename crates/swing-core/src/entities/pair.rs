use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::swing::{NormalizedSwing, SwingMetrics};

/// One output row of the matcher.
///
/// At least one side is present. `time_diff_seconds` is `Some` (and
/// non-negative) exactly when both sides are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchedPair {
    pub primary: Option<NormalizedSwing>,
    pub secondary: Option<NormalizedSwing>,
    pub time_diff_seconds: Option<f64>,
}

impl MatchedPair {
    #[must_use]
    pub const fn paired(primary: NormalizedSwing, secondary: NormalizedSwing, diff: f64) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
            time_diff_seconds: Some(diff),
        }
    }

    #[must_use]
    pub const fn primary_only(primary: NormalizedSwing) -> Self {
        Self {
            primary: Some(primary),
            secondary: None,
            time_diff_seconds: None,
        }
    }

    #[must_use]
    pub const fn secondary_only(secondary: NormalizedSwing) -> Self {
        Self {
            primary: None,
            secondary: Some(secondary),
            time_diff_seconds: None,
        }
    }

    #[must_use]
    pub const fn is_paired(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }

    /// Both present sides, primary first.
    pub fn sides(&self) -> impl Iterator<Item = &NormalizedSwing> {
        self.primary.iter().chain(self.secondary.iter())
    }

    /// Single metrics view of the physical swing this pair represents.
    ///
    /// Bat-side fields come from the primary swing, ball-side fields from the
    /// secondary swing, each falling back to the other side when missing.
    #[must_use]
    pub fn merged_metrics(&self) -> SwingMetrics {
        let empty = SwingMetrics::default();
        let primary = self.primary.as_ref().map_or(&empty, NormalizedSwing::metrics);
        let secondary = self
            .secondary
            .as_ref()
            .map_or(&empty, NormalizedSwing::metrics);
        SwingMetrics::overlay(primary, secondary)
    }
}
