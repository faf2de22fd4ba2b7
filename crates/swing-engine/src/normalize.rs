//! Timestamp normalization.
//!
//! Each device kind writes timestamps in its own grammar. [`ParsesTimestamp`]
//! has one implementation per kind, selected by the swing's `source` tag.
//! Parsing never fails loudly: a timestamp that does not resolve leaves the
//! swing without an instant, which makes it unmatchable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use swing_core::entities::{NormalizedSwing, RawSwing, RawTimestamp};
use swing_core::enums::DeviceKind;

use crate::clock::LocalClock;

/// `MM/DD/YYYY HH:MM:SS.fff` and its fraction-less variant.
const SLASH_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S%.f", "%m/%d/%Y %H:%M:%S"];

/// ISO-8601 date-times without an offset.
const ISO_NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// ISO-8601 date-times with a numeric offset but not strictly RFC 3339.
const ISO_OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Resolve a device's raw timestamp fields to an instant.
pub trait ParsesTimestamp {
    /// Returns `None` when no field yields a valid instant.
    fn parse_instant(&self, raw: &RawTimestamp, clock: &LocalClock) -> Option<DateTime<Utc>>;
}

/// Bat sensor: UTC-tagged field first, then `date` + local `time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatSensorFormat;

/// Ball tracker: `MM/DD/YYYY HH:MM:SS.fff` local, or ISO-8601.
#[derive(Debug, Clone, Copy, Default)]
pub struct BallTrackerFormat;

/// Combined unit: ISO-8601 or slash format, then `date` + local `time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedUnitFormat;

impl ParsesTimestamp for BatSensorFormat {
    fn parse_instant(&self, raw: &RawTimestamp, clock: &LocalClock) -> Option<DateTime<Utc>> {
        // A malformed UTC field falls through to the split fields.
        raw.utc
            .as_deref()
            .and_then(parse_utc_tagged)
            .or_else(|| parse_date_and_time(raw, clock))
    }
}

impl ParsesTimestamp for BallTrackerFormat {
    fn parse_instant(&self, raw: &RawTimestamp, clock: &LocalClock) -> Option<DateTime<Utc>> {
        raw.text
            .as_deref()
            .and_then(|text| parse_dual_format(text, clock))
    }
}

impl ParsesTimestamp for CombinedUnitFormat {
    fn parse_instant(&self, raw: &RawTimestamp, clock: &LocalClock) -> Option<DateTime<Utc>> {
        raw.text
            .as_deref()
            .and_then(|text| parse_dual_format(text, clock))
            .or_else(|| parse_date_and_time(raw, clock))
    }
}

/// Timestamp grammar for a device kind.
#[must_use]
pub fn parser_for(source: DeviceKind) -> &'static dyn ParsesTimestamp {
    match source {
        DeviceKind::BatSensor => &BatSensorFormat,
        DeviceKind::BallTracker => &BallTrackerFormat,
        DeviceKind::CombinedUnit => &CombinedUnitFormat,
    }
}

/// Resolve one raw swing onto the common clock.
#[must_use]
pub fn normalize(swing: RawSwing, clock: &LocalClock) -> NormalizedSwing {
    let instant = parser_for(swing.source).parse_instant(&swing.timestamp, clock);
    if instant.is_none() {
        tracing::trace!(
            id = %swing.id,
            source = %swing.source,
            timestamp = ?swing.timestamp,
            "timestamp did not resolve; swing is unmatchable"
        );
    }
    let local_date = instant.map(|instant| clock.local_date(instant));
    NormalizedSwing {
        swing,
        instant,
        local_date,
    }
}

/// Normalize a whole device stream, preserving input order.
pub fn normalize_all<I>(swings: I, clock: &LocalClock) -> Vec<NormalizedSwing>
where
    I: IntoIterator<Item = RawSwing>,
{
    swings
        .into_iter()
        .map(|swing| normalize(swing, clock))
        .collect()
}

/// Parse a field documented as UTC. Offset-less values are taken as UTC.
fn parse_utc_tagged(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_with_offset(text).or_else(|| {
        let naive_text = text.strip_suffix(['Z', 'z']).unwrap_or(text);
        parse_naive_iso(naive_text).map(|naive| naive.and_utc())
    })
}

/// Slash format when it looks like one, otherwise ISO-8601.
fn parse_dual_format(text: &str, clock: &LocalClock) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if looks_iso(text) {
        parse_iso(text, clock)
    } else {
        parse_slash(text).and_then(|naive| clock.resolve(&naive))
    }
}

/// `YYYY-` prefix, a `T` separator, or a trailing `Z`.
fn looks_iso(text: &str) -> bool {
    let bytes = text.as_bytes();
    let year_dash =
        bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-';
    year_dash || text.contains('T') || text.ends_with(['Z', 'z'])
}

/// ISO-8601 with or without offset; offset-less values are local wall-clock.
fn parse_iso(text: &str, clock: &LocalClock) -> Option<DateTime<Utc>> {
    if let Some(instant) = parse_with_offset(text) {
        return Some(instant);
    }
    if let Some(stripped) = text.strip_suffix(['Z', 'z']) {
        return parse_naive_iso(stripped).map(|naive| naive.and_utc());
    }
    parse_naive_iso(text)
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .and_then(|naive| clock.resolve(&naive))
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| {
            ISO_OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .map(|instant| instant.with_timezone(&Utc))
}

fn parse_naive_iso(text: &str) -> Option<NaiveDateTime> {
    ISO_NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn parse_slash(text: &str) -> Option<NaiveDateTime> {
    SLASH_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// `YYYY-MM-DD` date field combined with an `HH:MM:SS` local time field.
fn parse_date_and_time(raw: &RawTimestamp, clock: &LocalClock) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    let time_text = raw.time.as_deref()?.trim();
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time_text, format).ok())?;
    clock.resolve(&date.and_time(time))
}
