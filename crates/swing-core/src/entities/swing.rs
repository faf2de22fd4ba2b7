use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DeviceKind;

/// Every timestamp field any device may supply.
///
/// Which fields are populated depends on the device: the bat sensor sends a
/// UTC-tagged `utc` string or a `date` + `time` pair, the ball tracker and
/// combined unit send a single formatted `text` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawTimestamp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `HH:MM:SS`, local wall-clock time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Measured values for one swing. Devices only fill the fields they measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingMetrics {
    pub bat_speed: Option<f64>,
    pub attack_angle: Option<f64>,
    pub hand_speed: Option<f64>,
    pub time_to_contact: Option<f64>,
    pub exit_velocity: Option<f64>,
    pub launch_angle: Option<f64>,
    pub distance: Option<f64>,
    pub pitch_speed: Option<f64>,
    /// Smash factor as reported by the device, if it computes one.
    pub smash_factor: Option<f64>,
}

impl SwingMetrics {
    /// Overlay bat-side fields from `bat` and ball-side fields from `ball`,
    /// falling back to the other record when the preferred side lacks a value.
    #[must_use]
    pub fn overlay(bat: &Self, ball: &Self) -> Self {
        Self {
            bat_speed: bat.bat_speed.or(ball.bat_speed),
            attack_angle: bat.attack_angle.or(ball.attack_angle),
            hand_speed: bat.hand_speed.or(ball.hand_speed),
            time_to_contact: bat.time_to_contact.or(ball.time_to_contact),
            exit_velocity: ball.exit_velocity.or(bat.exit_velocity),
            launch_angle: ball.launch_angle.or(bat.launch_angle),
            distance: ball.distance.or(bat.distance),
            pitch_speed: ball.pitch_speed.or(bat.pitch_speed),
            smash_factor: ball.smash_factor.or(bat.smash_factor),
        }
    }
}

/// One device's record of one physical swing.
///
/// `id` is the device's own row id; it is unique within a device stream only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawSwing {
    pub id: String,
    pub source: DeviceKind,
    #[serde(default)]
    pub timestamp: RawTimestamp,
    #[serde(default)]
    pub metrics: SwingMetrics,
}

/// A raw swing with its timestamp resolved onto the common clock.
///
/// `instant` is `None` when no timestamp field parsed; such a swing is
/// unmatchable and belongs to no session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedSwing {
    #[serde(flatten)]
    pub swing: RawSwing,
    pub instant: Option<DateTime<Utc>>,
    /// Calendar date of `instant` in the local clock the run was configured with.
    pub local_date: Option<NaiveDate>,
}

impl NormalizedSwing {
    #[must_use]
    pub fn epoch_ms(&self) -> Option<i64> {
        self.instant.map(|instant| instant.timestamp_millis())
    }

    #[must_use]
    pub const fn is_matchable(&self) -> bool {
        self.instant.is_some()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.swing.id
    }

    #[must_use]
    pub const fn source(&self) -> DeviceKind {
        self.swing.source
    }

    #[must_use]
    pub const fn metrics(&self) -> &SwingMetrics {
        &self.swing.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_prefers_bat_side_for_bat_fields() {
        let bat = SwingMetrics {
            bat_speed: Some(70.0),
            exit_velocity: Some(10.0),
            ..SwingMetrics::default()
        };
        let ball = SwingMetrics {
            bat_speed: Some(65.0),
            exit_velocity: Some(92.0),
            launch_angle: Some(18.0),
            ..SwingMetrics::default()
        };

        let merged = SwingMetrics::overlay(&bat, &ball);
        assert_eq!(merged.bat_speed, Some(70.0));
        assert_eq!(merged.exit_velocity, Some(92.0));
        assert_eq!(merged.launch_angle, Some(18.0));
        assert_eq!(merged.attack_angle, None);
    }

    #[test]
    fn overlay_falls_back_to_other_side() {
        let bat = SwingMetrics::default();
        let ball = SwingMetrics {
            bat_speed: Some(66.0),
            ..SwingMetrics::default()
        };
        assert_eq!(SwingMetrics::overlay(&bat, &ball).bat_speed, Some(66.0));
    }
}
