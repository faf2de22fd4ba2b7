//! Derived per-swing and per-session statistics.
//!
//! Every function here is total: empty input or missing fields give `None`
//! or zero, never a panic or a division by zero.

use swing_core::entities::{
    Session, SessionMetrics, SessionSwing, SwingDerivedMetrics, SwingMetrics,
};
use swing_core::settings::DEFAULT_HARD_HIT_THRESHOLD;

/// Exit velocity gained per unit of bat speed in the squared-up model.
pub const BAT_SPEED_COEFFICIENT: f64 = 1.23;

/// Lower bounds of the pitch-speed bands and their coefficients, highest first.
const PITCH_BANDS: [(f64, f64); 3] = [(70.0, 0.20), (55.0, 0.15), (40.0, 0.10)];

/// Coefficient for pitch speeds below the lowest band.
const SLOW_PITCH_COEFFICIENT: f64 = 0.05;

/// Share of pitch speed returned as exit velocity, by band.
///
/// | pitch speed | coefficient |
/// |-------------|-------------|
/// | `< 40`      | 0.05        |
/// | `40..55`    | 0.10        |
/// | `55..70`    | 0.15        |
/// | `>= 70`     | 0.20        |
#[must_use]
pub fn pitch_coefficient(pitch_speed: f64) -> f64 {
    PITCH_BANDS
        .iter()
        .find(|(lower, _)| pitch_speed >= *lower)
        .map_or(SLOW_PITCH_COEFFICIENT, |(_, coefficient)| *coefficient)
}

/// Theoretical maximum exit velocity for a perfectly squared-up contact.
#[must_use]
pub fn max_exit_velocity(bat_speed: f64, pitch_speed: f64) -> f64 {
    BAT_SPEED_COEFFICIENT.mul_add(bat_speed, pitch_coefficient(pitch_speed) * pitch_speed)
}

/// Achieved over theoretical exit velocity, as a percentage capped at 100.
///
/// `None` when the theoretical maximum is not positive.
#[must_use]
pub fn squared_up_rate(bat_speed: f64, pitch_speed: f64, exit_velocity: f64) -> Option<f64> {
    let max_ev = max_exit_velocity(bat_speed, pitch_speed);
    if !max_ev.is_finite() || max_ev <= 0.0 || !exit_velocity.is_finite() {
        return None;
    }
    Some((exit_velocity / max_ev * 100.0).min(100.0))
}

/// Exit velocity over bat speed, or the device's own figure when either is missing.
#[must_use]
pub fn smash_factor(metrics: &SwingMetrics) -> Option<f64> {
    match (finite(metrics.exit_velocity), finite(metrics.bat_speed)) {
        (Some(exit_velocity), Some(bat_speed)) if bat_speed > 0.0 => {
            Some(exit_velocity / bat_speed)
        }
        _ => finite(metrics.smash_factor),
    }
}

#[must_use]
pub fn is_hard_hit(exit_velocity: f64, threshold: f64) -> bool {
    exit_velocity >= threshold
}

/// Mean of the values, `None` when there are none.
#[must_use]
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Largest of the values, `None` when there are none.
#[must_use]
pub fn maximum<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().reduce(f64::max)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn values(
    merged: &[SwingMetrics],
    select: fn(&SwingMetrics) -> Option<f64>,
) -> impl Iterator<Item = f64> + '_ {
    merged.iter().filter_map(move |metrics| finite(select(metrics)))
}

/// Computes derived metrics with a fixed hard-hit threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsCalculator {
    hard_hit_threshold: f64,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_HARD_HIT_THRESHOLD)
    }
}

impl MetricsCalculator {
    #[must_use]
    pub const fn new(hard_hit_threshold: f64) -> Self {
        Self { hard_hit_threshold }
    }

    #[must_use]
    pub const fn hard_hit_threshold(&self) -> f64 {
        self.hard_hit_threshold
    }

    /// Derived values for one physical swing.
    #[must_use]
    pub fn derive_swing(&self, metrics: &SwingMetrics) -> SwingDerivedMetrics {
        let exit_velocity = finite(metrics.exit_velocity);
        let bat_speed = finite(metrics.bat_speed);
        let pitch_speed = finite(metrics.pitch_speed);
        let squared_up_rate = match (bat_speed, pitch_speed, exit_velocity) {
            (Some(bat_speed), Some(pitch_speed), Some(exit_velocity)) => {
                squared_up_rate(bat_speed, pitch_speed, exit_velocity)
            }
            _ => None,
        };

        SwingDerivedMetrics {
            squared_up_rate,
            smash_factor: smash_factor(metrics),
            hard_hit: exit_velocity.map(|ev| is_hard_hit(ev, self.hard_hit_threshold)),
        }
    }

    /// Aggregates over a session's swings. Each swing is read through its
    /// pair's merged metrics view.
    #[must_use]
    pub fn session_metrics(&self, swings: &[SessionSwing]) -> SessionMetrics {
        let merged: Vec<SwingMetrics> = swings
            .iter()
            .map(|swing| swing.pair.merged_metrics())
            .collect();
        let derived: Vec<SwingDerivedMetrics> =
            merged.iter().map(|metrics| self.derive_swing(metrics)).collect();

        let field = |select: fn(&SwingMetrics) -> Option<f64>| values(&merged, select);

        let contact_count = field(|m| m.exit_velocity).count();
        let hard_hit_count = derived
            .iter()
            .filter(|d| d.hard_hit == Some(true))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let hard_hit_rate = if contact_count == 0 {
            0.0
        } else {
            hard_hit_count as f64 / contact_count as f64
        };
        let squared_up: Vec<f64> = derived.iter().filter_map(|d| d.squared_up_rate).collect();

        SessionMetrics {
            avg_bat_speed: average(field(|m| m.bat_speed)),
            max_bat_speed: maximum(field(|m| m.bat_speed)),
            avg_attack_angle: average(field(|m| m.attack_angle)),
            avg_hand_speed: average(field(|m| m.hand_speed)),
            avg_time_to_contact: average(field(|m| m.time_to_contact)),
            avg_exit_velocity: average(field(|m| m.exit_velocity)),
            max_exit_velocity: maximum(field(|m| m.exit_velocity)),
            avg_launch_angle: average(field(|m| m.launch_angle)),
            avg_distance: average(field(|m| m.distance)),
            max_distance: maximum(field(|m| m.distance)),
            avg_pitch_speed: average(field(|m| m.pitch_speed)),
            avg_smash_factor: average(derived.iter().filter_map(|d| d.smash_factor)),
            contact_count,
            hard_hit_count,
            hard_hit_rate,
            squared_up_rate: average(squared_up.iter().copied()),
            squared_up_count: squared_up.len(),
        }
    }

    /// Fill per-swing and session metrics in place.
    pub fn apply(&self, sessions: &mut [Session]) {
        for session in sessions {
            for swing in &mut session.swings {
                swing.derived = self.derive_swing(&swing.pair.merged_metrics());
            }
            session.metrics = self.session_metrics(&session.swings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use swing_core::entities::{MatchedPair, NormalizedSwing, RawSwing, RawTimestamp};
    use swing_core::enums::DeviceKind;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[rstest]
    #[case(0.0, 0.05)]
    #[case(39.9, 0.05)]
    #[case(40.0, 0.10)]
    #[case(50.0, 0.10)]
    #[case(54.9, 0.10)]
    #[case(55.0, 0.15)]
    #[case(69.9, 0.15)]
    #[case(70.0, 0.20)]
    #[case(92.0, 0.20)]
    fn pitch_coefficient_bands(#[case] pitch_speed: f64, #[case] expected: f64) {
        assert!(close(pitch_coefficient(pitch_speed), expected));
    }

    #[test]
    fn squared_up_example_clamps_to_100() {
        let max_ev = max_exit_velocity(70.0, 50.0);
        assert!(close(max_ev, 91.1));
        assert_eq!(squared_up_rate(70.0, 50.0, 95.0), Some(100.0));
    }

    #[test]
    fn squared_up_below_cap_is_ratio_percent() {
        let rate = squared_up_rate(70.0, 50.0, 82.0).unwrap();
        assert!(close(rate, 82.0 / 91.1 * 100.0));
    }

    #[test]
    fn squared_up_undefined_without_positive_max() {
        assert_eq!(squared_up_rate(0.0, 0.0, 60.0), None);
        assert_eq!(squared_up_rate(-10.0, 0.0, 60.0), None);
    }

    #[test]
    fn smash_factor_prefers_computed_ratio() {
        let metrics = SwingMetrics {
            bat_speed: Some(70.0),
            exit_velocity: Some(91.0),
            smash_factor: Some(1.1),
            ..SwingMetrics::default()
        };
        assert!(close(smash_factor(&metrics).unwrap(), 1.3));
    }

    #[test]
    fn smash_factor_falls_back_to_supplied_value() {
        let metrics = SwingMetrics {
            exit_velocity: Some(91.0),
            smash_factor: Some(1.24),
            ..SwingMetrics::default()
        };
        assert_eq!(smash_factor(&metrics), Some(1.24));

        let zero_bat = SwingMetrics {
            bat_speed: Some(0.0),
            ..metrics
        };
        assert_eq!(smash_factor(&zero_bat), Some(1.24));
        assert_eq!(smash_factor(&SwingMetrics::default()), None);
    }

    #[test]
    fn hard_hit_threshold_is_inclusive() {
        assert!(is_hard_hit(95.0, 95.0));
        assert!(!is_hard_hit(94.9, 95.0));
    }

    #[test]
    fn aggregates_of_nothing_are_neutral() {
        assert_eq!(average(Vec::new()), None);
        assert_eq!(maximum(Vec::new()), None);

        let metrics = MetricsCalculator::default().session_metrics(&[]);
        assert_eq!(metrics, SessionMetrics::default());
        assert!(close(metrics.hard_hit_rate, 0.0));
    }

    fn side(id: &str, source: DeviceKind, metrics: SwingMetrics) -> NormalizedSwing {
        NormalizedSwing {
            swing: RawSwing {
                id: id.into(),
                source,
                timestamp: RawTimestamp::default(),
                metrics,
            },
            instant: None,
            local_date: None,
        }
    }

    fn session_swing(pair: MatchedPair) -> SessionSwing {
        SessionSwing {
            pair,
            derived: SwingDerivedMetrics::default(),
        }
    }

    #[test]
    fn session_metrics_combine_both_sides() {
        let bat = |id: &str, speed: f64| {
            side(
                id,
                DeviceKind::BatSensor,
                SwingMetrics {
                    bat_speed: Some(speed),
                    attack_angle: Some(10.0),
                    ..SwingMetrics::default()
                },
            )
        };
        let ball = |id: &str, ev: f64| {
            side(
                id,
                DeviceKind::BallTracker,
                SwingMetrics {
                    exit_velocity: Some(ev),
                    pitch_speed: Some(50.0),
                    distance: Some(ev * 3.0),
                    ..SwingMetrics::default()
                },
            )
        };

        let swings = vec![
            session_swing(MatchedPair::paired(bat("b1", 70.0), ball("t1", 95.0), 1.0)),
            session_swing(MatchedPair::paired(bat("b2", 60.0), ball("t2", 80.0), 2.0)),
            session_swing(MatchedPair::primary_only(bat("b3", 65.0))),
        ];

        let metrics = MetricsCalculator::default().session_metrics(&swings);

        assert!(close(metrics.avg_bat_speed.unwrap(), 65.0));
        assert_eq!(metrics.max_bat_speed, Some(70.0));
        assert!(close(metrics.avg_exit_velocity.unwrap(), 87.5));
        assert_eq!(metrics.max_exit_velocity, Some(95.0));
        assert_eq!(metrics.max_distance, Some(285.0));
        assert_eq!(metrics.contact_count, 2);
        assert_eq!(metrics.hard_hit_count, 1);
        assert!(close(metrics.hard_hit_rate, 0.5));
        assert_eq!(metrics.squared_up_count, 2);

        let second = 80.0 / max_exit_velocity(60.0, 50.0) * 100.0;
        assert!(close(metrics.squared_up_rate.unwrap(), (100.0 + second) / 2.0));
    }

    #[test]
    fn combined_unit_singleton_is_self_sufficient() {
        let unit = side(
            "c1",
            DeviceKind::CombinedUnit,
            SwingMetrics {
                bat_speed: Some(70.0),
                pitch_speed: Some(50.0),
                exit_velocity: Some(82.0),
                ..SwingMetrics::default()
            },
        );
        let pair = MatchedPair::secondary_only(unit);
        let derived = MetricsCalculator::default().derive_swing(&pair.merged_metrics());

        assert!(derived.squared_up_rate.is_some());
        assert_eq!(derived.hard_hit, Some(false));
    }

    #[test]
    fn custom_threshold_changes_hard_hit_classification() {
        let metrics = SwingMetrics {
            exit_velocity: Some(90.0),
            ..SwingMetrics::default()
        };
        assert_eq!(MetricsCalculator::new(85.0).derive_swing(&metrics).hard_hit, Some(true));
        assert_eq!(MetricsCalculator::default().derive_swing(&metrics).hard_hit, Some(false));
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let metrics = SwingMetrics {
            bat_speed: Some(f64::NAN),
            exit_velocity: Some(90.0),
            pitch_speed: Some(50.0),
            ..SwingMetrics::default()
        };
        let derived = MetricsCalculator::default().derive_swing(&metrics);
        assert_eq!(derived.squared_up_rate, None);
        assert_eq!(derived.smash_factor, None);
    }
}
