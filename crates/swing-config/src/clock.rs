//! Local clock configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest offset chrono accepts, exclusive.
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Timezone that offset-less timestamps and session dates refer to.
///
/// Leaving `utc_offset_minutes` unset uses the machine's local timezone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Minutes east of UTC, e.g. `-300` for UTC-5.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl ClockConfig {
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.utc_offset_minutes.is_some()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an offset of a full day or more.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.utc_offset_minutes {
            Some(minutes) if minutes.saturating_abs() >= MAX_OFFSET_MINUTES => {
                Err(ConfigError::InvalidValue {
                    field: "clock.utc_offset_minutes".into(),
                    reason: format!(
                        "must be strictly between -{MAX_OFFSET_MINUTES} and \
                         {MAX_OFFSET_MINUTES} (got {minutes})"
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}
