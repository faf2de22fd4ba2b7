//! Calendar-day session aggregation.
//!
//! Pairs are bucketed by the local calendar date of the swing that is
//! authoritative for the pair. All pairs sharing a date merge into one
//! session, whichever device they came from.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use swing_core::entities::{
    MatchedPair, Session, SessionMetrics, SessionSwing, SwingDerivedMetrics,
};
use swing_core::enums::DeviceKind;

/// Date a pair is bucketed under.
///
/// A combined-unit side dates the pair on its own; otherwise the primary
/// side's date wins, then the secondary side's. Matched sides lie within the
/// window of each other, so they almost always agree.
///
/// The date comes from the resolved instant on the run's local clock, not
/// from the device's self-reported date string, so swings near local
/// midnight can land on the neighbouring day.
#[must_use]
pub fn session_date(pair: &MatchedPair) -> Option<NaiveDate> {
    pair.sides()
        .find(|side| side.source() == DeviceKind::CombinedUnit)
        .and_then(|side| side.local_date)
        .or_else(|| pair.primary.as_ref().and_then(|side| side.local_date))
        .or_else(|| pair.secondary.as_ref().and_then(|side| side.local_date))
}

#[derive(Default)]
struct SessionAccumulator {
    primary_swing_count: usize,
    secondary_swing_count: usize,
    paired_count: usize,
    sources: Vec<DeviceKind>,
    swings: Vec<SessionSwing>,
}

impl SessionAccumulator {
    fn push(&mut self, pair: MatchedPair) {
        if pair.primary.is_some() {
            self.primary_swing_count += 1;
        }
        if pair.secondary.is_some() {
            self.secondary_swing_count += 1;
        }
        if pair.is_paired() {
            self.paired_count += 1;
        }
        for source in pair.sides().map(|side| side.source()) {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
        self.swings.push(SessionSwing {
            pair,
            derived: SwingDerivedMetrics::default(),
        });
    }

    fn finish(mut self, date: NaiveDate) -> Session {
        self.sources.sort_unstable();
        Session {
            date,
            primary_swing_count: self.primary_swing_count,
            secondary_swing_count: self.secondary_swing_count,
            paired_count: self.paired_count,
            is_paired: self.primary_swing_count > 0 && self.secondary_swing_count > 0,
            sources: self.sources,
            swings: self.swings,
            metrics: SessionMetrics::default(),
        }
    }
}

/// Group matcher output into sessions, newest date first.
///
/// Pairs whose date does not resolve are dropped. No limit is applied.
/// Per-swing and session metrics are left at their defaults; fill them with
/// [`crate::metrics::MetricsCalculator::apply`].
#[must_use]
pub fn build_sessions<I>(pairs: I) -> Vec<Session>
where
    I: IntoIterator<Item = MatchedPair>,
{
    let mut buckets: BTreeMap<NaiveDate, SessionAccumulator> = BTreeMap::new();
    let mut dropped = 0usize;

    for pair in pairs {
        match session_date(&pair) {
            Some(date) => buckets.entry(date).or_default().push(pair),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped pairs without a resolvable date");
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, accumulator)| accumulator.finish(date))
        .collect()
}
