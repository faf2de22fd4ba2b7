//! Device kinds for swingsync.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Capture device that produced a swing record.
///
/// Each kind has its own clock and its own timestamp grammar; no identifier
/// is shared across kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Bat-mounted motion sensor.
    BatSensor,
    /// Radar/vision batted-ball tracker.
    BallTracker,
    /// Combined unit reporting bat and ball data together.
    CombinedUnit,
}

impl DeviceKind {
    pub const ALL: [Self; 3] = [Self::BatSensor, Self::BallTracker, Self::CombinedUnit];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BatSensor => "bat_sensor",
            Self::BallTracker => "ball_tracker",
            Self::CombinedUnit => "combined_unit",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown device kind: {s}")))
    }
}
