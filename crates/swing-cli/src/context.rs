use anyhow::Context;
use swing_config::SwingConfig;
use swing_engine::{LocalClock, Reconciler};

use crate::cli::GlobalFlags;

/// Everything a command needs once configuration is resolved.
#[derive(Debug)]
pub struct AppContext {
    pub config: SwingConfig,
    pub reconciler: Reconciler,
}

impl AppContext {
    /// Apply command-line overrides on top of `config` and build the engine.
    pub fn init(mut config: SwingConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(window) = flags.window {
            config.matching.window_seconds = window;
        }
        if let Some(threshold) = flags.hard_hit_threshold {
            config.metrics.hard_hit_threshold = threshold;
        }
        config.validate().context("invalid swingsync configuration")?;

        let settings = config.reconcile_settings()?;
        let clock = match config.clock.utc_offset_minutes {
            Some(minutes) => LocalClock::from_offset_minutes(minutes)?,
            None => LocalClock::System,
        };
        tracing::debug!(
            window_seconds = settings.window_seconds,
            hard_hit_threshold = settings.hard_hit_threshold,
            clock = ?clock,
            "resolved reconciliation settings"
        );

        let reconciler = Reconciler::new(settings, clock)?;
        Ok(Self { config, reconciler })
    }

    /// Rows to print: `--limit`, else the configured session limit.
    #[must_use]
    pub fn display_limit(&self, flags: &GlobalFlags) -> usize {
        let limit = flags.limit.unwrap_or(self.config.display.session_limit);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}
