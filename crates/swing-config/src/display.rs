//! Presentation configuration for the calling layer.

use serde::{Deserialize, Serialize};

/// Default number of sessions shown.
const fn default_session_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Number of newest sessions the session list is truncated to.
    #[serde(default = "default_session_limit")]
    pub session_limit: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            session_limit: default_session_limit(),
        }
    }
}
