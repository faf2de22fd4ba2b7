//! End-to-end reconciliation: normalize, match, aggregate, measure.

use swing_core::entities::{MatchedPair, NormalizedSwing, RawSwing};
use swing_core::responses::Reconciliation;
use swing_core::settings::ReconcileSettings;

use crate::clock::LocalClock;
use crate::error::EngineError;
use crate::matcher::match_swings;
use crate::metrics::MetricsCalculator;
use crate::normalize::normalize_all;
use crate::sessions::build_sessions;

/// A validated reconciliation configuration.
///
/// Holds no state between runs; `reconcile` may be called any number of
/// times, from any number of threads.
#[derive(Debug, Clone)]
pub struct Reconciler {
    settings: ReconcileSettings,
    clock: LocalClock,
}

impl Reconciler {
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] when `settings` fail validation.
    pub fn new(settings: ReconcileSettings, clock: LocalClock) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(Self { settings, clock })
    }

    #[must_use]
    pub const fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }

    #[must_use]
    pub const fn clock(&self) -> &LocalClock {
        &self.clock
    }

    /// Normalize both streams and split off swings whose timestamp did not resolve.
    fn prepare(
        &self,
        primary: Vec<RawSwing>,
        secondary: Vec<RawSwing>,
    ) -> (Vec<NormalizedSwing>, Vec<NormalizedSwing>, Vec<NormalizedSwing>) {
        let (primary, mut unmatchable): (Vec<_>, Vec<_>) = normalize_all(primary, &self.clock)
            .into_iter()
            .partition(NormalizedSwing::is_matchable);
        let (secondary, secondary_unmatchable): (Vec<_>, Vec<_>) =
            normalize_all(secondary, &self.clock)
                .into_iter()
                .partition(NormalizedSwing::is_matchable);
        unmatchable.extend(secondary_unmatchable);

        if !unmatchable.is_empty() {
            tracing::debug!(
                count = unmatchable.len(),
                "swings with unparseable timestamps excluded from matching"
            );
        }

        (primary, secondary, unmatchable)
    }

    /// Matcher output only, in matcher order. Unmatchable swings are left out.
    #[must_use]
    pub fn pairs(&self, primary: Vec<RawSwing>, secondary: Vec<RawSwing>) -> Vec<MatchedPair> {
        let (primary, secondary, _) = self.prepare(primary, secondary);
        match_swings(&primary, &secondary, self.settings.window_seconds)
    }

    /// Run the full pipeline over one batch.
    #[must_use]
    pub fn reconcile(&self, primary: Vec<RawSwing>, secondary: Vec<RawSwing>) -> Reconciliation {
        let (primary, secondary, unmatchable) = self.prepare(primary, secondary);
        let pairs = match_swings(&primary, &secondary, self.settings.window_seconds);
        let pair_count = pairs.len();

        let mut sessions = build_sessions(pairs);
        MetricsCalculator::new(self.settings.hard_hit_threshold).apply(&mut sessions);

        tracing::debug!(
            sessions = sessions.len(),
            pairs = pair_count,
            unmatchable = unmatchable.len(),
            "reconciliation complete"
        );

        Reconciliation {
            sessions,
            unmatchable,
            pair_count,
            settings: self.settings,
        }
    }
}

/// Reconcile one batch on the system's local clock.
///
/// # Errors
///
/// Returns [`EngineError::Settings`] when `settings` fail validation.
pub fn reconcile(
    primary: Vec<RawSwing>,
    secondary: Vec<RawSwing>,
    settings: ReconcileSettings,
) -> Result<Reconciliation, EngineError> {
    Ok(Reconciler::new(settings, LocalClock::System)?.reconcile(primary, secondary))
}
