//! Pipeline output types returned to the calling layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{NormalizedSwing, Session};
use crate::settings::ReconcileSettings;

/// Result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Reconciliation {
    /// Sessions, newest date first.
    pub sessions: Vec<Session>,
    /// Swings whose timestamp did not resolve. They belong to no session but
    /// remain available for raw listings.
    pub unmatchable: Vec<NormalizedSwing>,
    /// Number of matcher output rows (paired plus singletons).
    pub pair_count: usize,
    pub settings: ReconcileSettings,
}

impl Reconciliation {
    /// Keep only the `limit` newest sessions.
    pub fn truncate_sessions(&mut self, limit: usize) {
        self.sessions.truncate(limit);
    }
}
