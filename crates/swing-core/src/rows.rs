//! Device-native row shapes as produced by the external data service.
//!
//! Rows are flat records of named fields. Field names follow the service's
//! `snake_case` columns; `camelCase` aliases are accepted as well. Unknown
//! fields are ignored. Measurement cells are lenient: numeric strings parse,
//! and any other non-numeric value reads as absent.

use schemars::JsonSchema;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{RawSwing, RawTimestamp, SwingMetrics};
use crate::enums::DeviceKind;
use crate::errors::CoreError;

/// Row ids arrive as strings or integers depending on the table.
fn deserialize_row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RowId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RowId::deserialize(deserializer)? {
        RowId::Text(text) => text,
        RowId::Signed(n) => n.to_string(),
        RowId::Unsigned(n) => n.to_string(),
    })
}

/// Numbers, numeric strings, or anything else as `None`.
fn deserialize_measurement<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let value = match Cell::deserialize(deserializer)? {
        Cell::Number(n) => Some(n),
        Cell::Text(text) => text.trim().parse::<f64>().ok(),
        Cell::Other(_) => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

/// Bat-mounted motion sensor row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BatSensorRow {
    #[serde(deserialize_with = "deserialize_row_id")]
    pub id: String,
    /// Combined UTC-tagged timestamp, e.g. `2024-05-01T17:03:11Z`.
    #[serde(default, alias = "recordedAtUtc", alias = "timestamp_utc")]
    pub recorded_at_utc: Option<String>,
    /// `YYYY-MM-DD`, used with `swing_time` when no UTC field is present.
    #[serde(default, alias = "sessionDate")]
    pub session_date: Option<String>,
    /// `HH:MM:SS` local wall-clock time.
    #[serde(default, alias = "swingTime")]
    pub swing_time: Option<String>,
    #[serde(default, alias = "batSpeed", deserialize_with = "deserialize_measurement")]
    pub bat_speed: Option<f64>,
    #[serde(default, alias = "attackAngle", deserialize_with = "deserialize_measurement")]
    pub attack_angle: Option<f64>,
    #[serde(default, alias = "handSpeed", deserialize_with = "deserialize_measurement")]
    pub hand_speed: Option<f64>,
    #[serde(default, alias = "timeToContact", deserialize_with = "deserialize_measurement")]
    pub time_to_contact: Option<f64>,
}

/// Radar/vision batted-ball tracker row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallTrackerRow {
    #[serde(deserialize_with = "deserialize_row_id")]
    pub id: String,
    /// `MM/DD/YYYY HH:MM:SS.fff` local time, or ISO-8601.
    #[serde(default, alias = "dateTime", alias = "timestamp")]
    pub date_time: Option<String>,
    #[serde(
        default,
        alias = "exitVelocity",
        alias = "exit_velo",
        deserialize_with = "deserialize_measurement"
    )]
    pub exit_velocity: Option<f64>,
    #[serde(default, alias = "launchAngle", deserialize_with = "deserialize_measurement")]
    pub launch_angle: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub distance: Option<f64>,
    #[serde(
        default,
        alias = "pitchSpeed",
        alias = "pitch_velo",
        deserialize_with = "deserialize_measurement"
    )]
    pub pitch_speed: Option<f64>,
}

/// Combined unit row carrying bat and ball data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CombinedUnitRow {
    #[serde(deserialize_with = "deserialize_row_id")]
    pub id: String,
    /// ISO-8601, or `MM/DD/YYYY HH:MM:SS[.fff]` local time.
    #[serde(default, alias = "recordedAt", alias = "timestamp")]
    pub recorded_at: Option<String>,
    /// `YYYY-MM-DD`, used with `swing_time` when `recorded_at` is absent or
    /// unreadable.
    #[serde(default, alias = "sessionDate")]
    pub session_date: Option<String>,
    /// `HH:MM:SS` local wall-clock time.
    #[serde(default, alias = "swingTime")]
    pub swing_time: Option<String>,
    #[serde(default, alias = "batSpeed", deserialize_with = "deserialize_measurement")]
    pub bat_speed: Option<f64>,
    #[serde(default, alias = "attackAngle", deserialize_with = "deserialize_measurement")]
    pub attack_angle: Option<f64>,
    #[serde(default, alias = "exitVelocity", deserialize_with = "deserialize_measurement")]
    pub exit_velocity: Option<f64>,
    #[serde(default, alias = "launchAngle", deserialize_with = "deserialize_measurement")]
    pub launch_angle: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub distance: Option<f64>,
    #[serde(default, alias = "pitchSpeed", deserialize_with = "deserialize_measurement")]
    pub pitch_speed: Option<f64>,
    #[serde(default, alias = "smashFactor", deserialize_with = "deserialize_measurement")]
    pub smash_factor: Option<f64>,
}

/// A row from any device, tagged by its `source` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DeviceRow {
    BatSensor(BatSensorRow),
    BallTracker(BallTrackerRow),
    CombinedUnit(CombinedUnitRow),
}

impl DeviceRow {
    /// Decode an untagged row whose device kind is known from context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the value does not fit the
    /// device's row shape.
    pub fn from_value(source: DeviceKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let decoded = match source {
            DeviceKind::BatSensor => serde_json::from_value(value).map(Self::BatSensor),
            DeviceKind::BallTracker => serde_json::from_value(value).map(Self::BallTracker),
            DeviceKind::CombinedUnit => serde_json::from_value(value).map(Self::CombinedUnit),
        };
        decoded.map_err(|error| CoreError::Validation(format!("invalid {source} row: {error}")))
    }

    #[must_use]
    pub const fn source(&self) -> DeviceKind {
        match self {
            Self::BatSensor(_) => DeviceKind::BatSensor,
            Self::BallTracker(_) => DeviceKind::BallTracker,
            Self::CombinedUnit(_) => DeviceKind::CombinedUnit,
        }
    }
}

impl From<BatSensorRow> for RawSwing {
    fn from(row: BatSensorRow) -> Self {
        Self {
            id: row.id,
            source: DeviceKind::BatSensor,
            timestamp: RawTimestamp {
                utc: row.recorded_at_utc,
                date: row.session_date,
                time: row.swing_time,
                text: None,
            },
            metrics: SwingMetrics {
                bat_speed: row.bat_speed,
                attack_angle: row.attack_angle,
                hand_speed: row.hand_speed,
                time_to_contact: row.time_to_contact,
                ..SwingMetrics::default()
            },
        }
    }
}

impl From<BallTrackerRow> for RawSwing {
    fn from(row: BallTrackerRow) -> Self {
        Self {
            id: row.id,
            source: DeviceKind::BallTracker,
            timestamp: RawTimestamp {
                text: row.date_time,
                ..RawTimestamp::default()
            },
            metrics: SwingMetrics {
                exit_velocity: row.exit_velocity,
                launch_angle: row.launch_angle,
                distance: row.distance,
                pitch_speed: row.pitch_speed,
                ..SwingMetrics::default()
            },
        }
    }
}

impl From<CombinedUnitRow> for RawSwing {
    fn from(row: CombinedUnitRow) -> Self {
        Self {
            id: row.id,
            source: DeviceKind::CombinedUnit,
            timestamp: RawTimestamp {
                text: row.recorded_at,
                date: row.session_date,
                time: row.swing_time,
                utc: None,
            },
            metrics: SwingMetrics {
                bat_speed: row.bat_speed,
                attack_angle: row.attack_angle,
                exit_velocity: row.exit_velocity,
                launch_angle: row.launch_angle,
                distance: row.distance,
                pitch_speed: row.pitch_speed,
                smash_factor: row.smash_factor,
                ..SwingMetrics::default()
            },
        }
    }
}

impl From<DeviceRow> for RawSwing {
    fn from(row: DeviceRow) -> Self {
        match row {
            DeviceRow::BatSensor(row) => row.into(),
            DeviceRow::BallTracker(row) => row.into(),
            DeviceRow::CombinedUnit(row) => row.into(),
        }
    }
}

/// The two accepted shapes of one device stream payload.
///
/// Either an array of `source`-tagged rows, or an object naming the device
/// once and carrying its untagged rows. Rows stay undecoded until
/// [`RowBatch::into_swings`], so one bad row cannot reject the batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowBatch {
    Tagged(Vec<serde_json::Value>),
    Uniform {
        source: DeviceKind,
        rows: Vec<serde_json::Value>,
    },
}

/// A row left out of a [`DecodedBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Position in the payload's row array.
    pub index: usize,
    /// The row's `id` cell, when it has a usable one.
    pub id: Option<String>,
    pub reason: String,
}

/// Rows of one payload that decoded, plus the ones that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBatch {
    pub swings: Vec<RawSwing>,
    pub rejected: Vec<RejectedRow>,
}

fn row_id(value: &serde_json::Value) -> Option<String> {
    match value.get("id")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RowBatch {
    /// Decode each row independently into a [`RawSwing`].
    ///
    /// Rows that do not fit their device shape (no `id`, unknown or missing
    /// `source`, not an object) are collected in
    /// [`DecodedBatch::rejected`]; the remaining rows keep their order.
    #[must_use]
    pub fn into_swings(self) -> DecodedBatch {
        let (source, rows) = match self {
            Self::Tagged(rows) => (None, rows),
            Self::Uniform { source, rows } => (Some(source), rows),
        };

        let mut batch = DecodedBatch::default();
        for (index, value) in rows.into_iter().enumerate() {
            let id = row_id(&value);
            let decoded = match source {
                Some(source) => DeviceRow::from_value(source, value),
                None => serde_json::from_value::<DeviceRow>(value)
                    .map_err(|error| CoreError::Validation(format!("invalid row: {error}"))),
            };
            match decoded {
                Ok(row) => batch.swings.push(row.into()),
                Err(error) => batch.rejected.push(RejectedRow {
                    index,
                    id,
                    reason: error.to_string(),
                }),
            }
        }
        batch
    }
}
