use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::pair::MatchedPair;
use crate::enums::DeviceKind;

/// Values derived for one physical swing. Recomputed on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingDerivedMetrics {
    /// Achieved over theoretically achievable exit velocity, percent, capped at 100.
    pub squared_up_rate: Option<f64>,
    pub smash_factor: Option<f64>,
    /// `None` when the swing has no exit velocity (no contact recorded).
    pub hard_hit: Option<bool>,
}

/// A matched pair plus its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSwing {
    pub pair: MatchedPair,
    pub derived: SwingDerivedMetrics,
}

/// Aggregates over a session's swings.
///
/// Averages and maxima are `None` when no swing carries the field; counts and
/// rates fall back to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionMetrics {
    pub avg_bat_speed: Option<f64>,
    pub max_bat_speed: Option<f64>,
    pub avg_attack_angle: Option<f64>,
    pub avg_hand_speed: Option<f64>,
    pub avg_time_to_contact: Option<f64>,
    pub avg_exit_velocity: Option<f64>,
    pub max_exit_velocity: Option<f64>,
    pub avg_launch_angle: Option<f64>,
    pub avg_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub avg_pitch_speed: Option<f64>,
    pub avg_smash_factor: Option<f64>,
    /// Swings with a recorded exit velocity.
    pub contact_count: usize,
    pub hard_hit_count: usize,
    /// `hard_hit_count / contact_count`, in `[0, 1]`.
    pub hard_hit_rate: f64,
    /// Mean squared-up rate over swings where it is defined, percent.
    pub squared_up_rate: Option<f64>,
    pub squared_up_count: usize,
}

/// All swings attributed to one calendar date, regardless of device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub date: NaiveDate,
    pub primary_swing_count: usize,
    pub secondary_swing_count: usize,
    /// Pairs with both sides present.
    pub paired_count: usize,
    /// Whether swings from both streams landed on this date.
    pub is_paired: bool,
    /// Distinct device kinds that contributed swings, in declaration order.
    pub sources: Vec<DeviceKind>,
    pub swings: Vec<SessionSwing>,
    pub metrics: SessionMetrics,
}

impl Session {
    #[must_use]
    pub fn total_swings(&self) -> usize {
        self.swings.len()
    }
}
