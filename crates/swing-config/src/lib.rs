//! # swing-config
//!
//! Layered configuration loading for swingsync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SWINGSYNC_*` prefix, `__` as separator)
//! 2. Project-level `.swingsync/config.toml`
//! 3. User-level `~/.config/swingsync/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SWINGSYNC_MATCHING__WINDOW_SECONDS` -> `matching.window_seconds`,
//! `SWINGSYNC_CLOCK__UTC_OFFSET_MINUTES` -> `clock.utc_offset_minutes`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use swing_config::SwingConfig;
//!
//! let config = SwingConfig::load_with_dotenv().expect("config");
//! let settings = config.reconcile_settings().expect("valid settings");
//! println!("window: {}s", settings.window_seconds);
//! ```

mod clock;
mod display;
mod error;
mod matching;
mod metrics;

pub use clock::ClockConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use matching::MatchingConfig;
pub use metrics::MetricsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use swing_core::errors::CoreError;
use swing_core::settings::ReconcileSettings;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "SWINGSYNC_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwingConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl SwingConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".swingsync/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Engine parameters, validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key when
    /// the window or threshold is unusable.
    pub fn reconcile_settings(&self) -> Result<ReconcileSettings, ConfigError> {
        let settings = ReconcileSettings {
            window_seconds: self.matching.window_seconds,
            hard_hit_threshold: self.metrics.hard_hit_threshold,
        };
        settings.validate().map_err(|error| match error {
            CoreError::InvalidSetting { field, reason } => ConfigError::InvalidValue {
                field: qualified_key(&field),
                reason,
            },
            other => ConfigError::InvalidValue {
                field: "settings".into(),
                reason: other.to_string(),
            },
        })?;
        Ok(settings)
    }

    /// Check every section, not only the engine parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reconcile_settings()?;
        self.clock.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("swingsync").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for a `.env`
    /// file, then falls back to the current directory. Missing files are
    /// not an error.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

/// Config-file key for an engine setting name.
fn qualified_key(field: &str) -> String {
    match field {
        "window_seconds" => "matching.window_seconds".into(),
        "hard_hit_threshold" => "metrics.hard_hit_threshold".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_documented_values() {
        let config = SwingConfig::default();
        let settings = config.reconcile_settings().unwrap();
        assert_eq!(settings, ReconcileSettings::default());
        assert!(!config.clock.is_fixed());
        assert_eq!(config.display.session_limit, 20);
    }

    #[test]
    fn negative_window_names_its_key() {
        let mut config = SwingConfig::default();
        config.matching.window_seconds = -3.0;
        let err = config.reconcile_settings().unwrap_err();
        assert!(err.to_string().contains("matching.window_seconds"));
    }

    #[test]
    fn infinite_threshold_names_its_key() {
        let mut config = SwingConfig::default();
        config.metrics.hard_hit_threshold = f64::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("metrics.hard_hit_threshold"));
    }
}
