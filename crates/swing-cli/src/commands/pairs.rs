use serde::Serialize;
use swing_core::entities::{MatchedPair, NormalizedSwing};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::context::AppContext;
use crate::input;
use crate::output::{TableRow, number_cell, output};

/// Handle `swingsync pairs`.
pub async fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (primary, secondary) = input::read_streams(args).await?;
    let mut pairs = ctx.reconciler.pairs(primary, secondary);
    pairs.truncate(ctx.display_limit(flags));

    let rows = pairs.iter().map(PairRow::from).collect::<Vec<_>>();
    output(&pairs, &rows, flags.format)
}

/// One matcher output row for table output.
#[derive(Debug, Serialize)]
pub struct PairRow {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub primary_at: Option<String>,
    pub secondary_at: Option<String>,
    pub diff_seconds: Option<f64>,
}

fn instant_cell(side: Option<&NormalizedSwing>) -> Option<String> {
    side.and_then(|swing| swing.instant)
        .map(|instant| instant.format("%Y-%m-%d %H:%M:%S%.3fZ").to_string())
}

impl From<&MatchedPair> for PairRow {
    fn from(pair: &MatchedPair) -> Self {
        Self {
            primary: pair.primary.as_ref().map(|swing| swing.id().to_string()),
            secondary: pair.secondary.as_ref().map(|swing| swing.id().to_string()),
            primary_at: instant_cell(pair.primary.as_ref()),
            secondary_at: instant_cell(pair.secondary.as_ref()),
            diff_seconds: pair.time_diff_seconds,
        }
    }
}

impl TableRow for PairRow {
    const HEADERS: &'static [&'static str] =
        &["primary", "secondary", "primary_at", "secondary_at", "diff_s"];

    fn cells(&self) -> Vec<String> {
        let text = |value: Option<&str>| value.unwrap_or("-").to_string();
        vec![
            text(self.primary.as_deref()),
            text(self.secondary.as_deref()),
            text(self.primary_at.as_deref()),
            text(self.secondary_at.as_deref()),
            number_cell(self.diff_seconds, 3),
        ]
    }
}
