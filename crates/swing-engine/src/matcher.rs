//! Greedy nearest-time, one-to-one matching between two swing streams.
//!
//! Primary swings are visited in time order. Each claims the closest
//! unconsumed secondary swing within the window, so an earlier primary swing
//! can take a secondary swing that a later one would have matched more
//! tightly. The assignment is greedy, not globally optimal.
//!
//! Both streams are sorted, so the candidate scan starts at the first
//! secondary swing inside the window (binary search) and stops at the first
//! one past it. Candidates are visited in the same order a full scan would
//! visit them, which keeps outcomes and tie-breaks identical.

use swing_core::entities::{MatchedPair, NormalizedSwing};

/// Negative or NaN windows match only identical instants.
fn effective_window(window_seconds: f64) -> f64 {
    window_seconds.max(0.0)
}

/// Scan bound in whole milliseconds. Rounds up, so it never excludes a
/// candidate that [`within_window`] would accept.
#[allow(clippy::cast_possible_truncation)]
fn scan_bound_millis(window_seconds: f64) -> i64 {
    (window_seconds * 1000.0).ceil() as i64
}

#[allow(clippy::cast_precision_loss)]
fn diff_seconds(diff_ms: i64) -> f64 {
    diff_ms as f64 / 1000.0
}

/// A pair's reported `time_diff_seconds` never exceeds the window.
fn within_window(diff_ms: i64, window_seconds: f64) -> bool {
    diff_seconds(diff_ms) <= window_seconds
}

/// Matchable swings keyed by epoch milliseconds, stably sorted.
fn timeline(stream: &[NormalizedSwing]) -> Vec<(i64, &NormalizedSwing)> {
    let mut timeline: Vec<(i64, &NormalizedSwing)> = stream
        .iter()
        .filter_map(|swing| swing.epoch_ms().map(|ms| (ms, swing)))
        .collect();
    timeline.sort_by_key(|(ms, _)| *ms);
    timeline
}

/// Pair swings from `primary` and `secondary` recorded within
/// `window_seconds` of each other.
///
/// Swings without an instant do not participate and do not appear in the
/// output. Every other swing appears in exactly one pair: matched pairs in
/// primary time order with their singletons interleaved, then the unconsumed
/// secondary swings in time order. Exact ties go to the earliest secondary
/// swing in sorted order.
#[must_use]
pub fn match_swings(
    primary: &[NormalizedSwing],
    secondary: &[NormalizedSwing],
    window_seconds: f64,
) -> Vec<MatchedPair> {
    let window_seconds = effective_window(window_seconds);
    let window_ms = scan_bound_millis(window_seconds);
    let primary = timeline(primary);
    let secondary = timeline(secondary);

    let mut consumed = vec![false; secondary.len()];
    let mut pairs = Vec::with_capacity(primary.len() + secondary.len());

    for &(primary_ms, primary_swing) in &primary {
        let window_start = primary_ms.saturating_sub(window_ms);
        let window_end = primary_ms.saturating_add(window_ms);
        let first = secondary.partition_point(|(ms, _)| *ms < window_start);

        let mut best: Option<(usize, i64)> = None;
        for (index, &(secondary_ms, _)) in secondary.iter().enumerate().skip(first) {
            if secondary_ms > window_end {
                break;
            }
            let diff = (primary_ms - secondary_ms).abs();
            if consumed[index] || !within_window(diff, window_seconds) {
                continue;
            }
            if best.is_none_or(|(_, best_diff)| diff < best_diff) {
                best = Some((index, diff));
            }
        }

        match best {
            Some((index, diff_ms)) => {
                consumed[index] = true;
                pairs.push(MatchedPair::paired(
                    primary_swing.clone(),
                    secondary[index].1.clone(),
                    diff_seconds(diff_ms),
                ));
            }
            None => pairs.push(MatchedPair::primary_only(primary_swing.clone())),
        }
    }

    pairs.extend(
        secondary
            .iter()
            .zip(&consumed)
            .filter(|(_, consumed)| !**consumed)
            .map(|((_, swing), _)| MatchedPair::secondary_only((*swing).clone())),
    );

    tracing::debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        paired = pairs.iter().filter(|pair| pair.is_paired()).count(),
        window_seconds,
        "matched swing streams"
    );

    pairs
}
