use serde::Serialize;
use swing_core::entities::Session;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::context::AppContext;
use crate::input;
use crate::output::{TableRow, number_cell, output};

/// Handle `swingsync reconcile`.
pub async fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (primary, secondary) = input::read_streams(args).await?;
    let mut reconciliation = ctx.reconciler.reconcile(primary, secondary);

    if !reconciliation.unmatchable.is_empty() {
        tracing::warn!(
            count = reconciliation.unmatchable.len(),
            "some swings have unreadable timestamps and belong to no session"
        );
    }

    reconciliation.truncate_sessions(ctx.display_limit(flags));
    let rows = reconciliation
        .sessions
        .iter()
        .map(SessionRow::from)
        .collect::<Vec<_>>();
    output(&reconciliation, &rows, flags.format)
}

/// One-line session summary for table output.
#[derive(Debug, Serialize)]
pub struct SessionRow {
    pub date: String,
    pub paired: bool,
    pub swings: usize,
    pub matched: usize,
    pub bat_swings: usize,
    pub ball_swings: usize,
    pub avg_bat_speed: Option<f64>,
    pub avg_exit_velocity: Option<f64>,
    pub max_exit_velocity: Option<f64>,
    pub hard_hit_rate: f64,
    pub squared_up_rate: Option<f64>,
}

impl From<&Session> for SessionRow {
    fn from(session: &Session) -> Self {
        Self {
            date: session.date.to_string(),
            paired: session.is_paired,
            swings: session.total_swings(),
            matched: session.paired_count,
            bat_swings: session.primary_swing_count,
            ball_swings: session.secondary_swing_count,
            avg_bat_speed: session.metrics.avg_bat_speed,
            avg_exit_velocity: session.metrics.avg_exit_velocity,
            max_exit_velocity: session.metrics.max_exit_velocity,
            hard_hit_rate: session.metrics.hard_hit_rate,
            squared_up_rate: session.metrics.squared_up_rate,
        }
    }
}

impl TableRow for SessionRow {
    const HEADERS: &'static [&'static str] = &[
        "date",
        "paired",
        "swings",
        "matched",
        "bat",
        "ball",
        "avg_bat",
        "avg_ev",
        "max_ev",
        "hard_hit%",
        "sq_up%",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            if self.paired { "yes" } else { "no" }.to_string(),
            self.swings.to_string(),
            self.matched.to_string(),
            self.bat_swings.to_string(),
            self.ball_swings.to_string(),
            number_cell(self.avg_bat_speed, 1),
            number_cell(self.avg_exit_velocity, 1),
            number_cell(self.max_exit_velocity, 1),
            number_cell(Some(self.hard_hit_rate * 100.0), 0),
            number_cell(self.squared_up_rate, 0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use swing_core::entities::SessionMetrics;
    use swing_core::enums::DeviceKind;

    use super::*;

    #[test]
    fn session_row_formats_headline_metrics() {
        let session = Session {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
            primary_swing_count: 3,
            secondary_swing_count: 2,
            paired_count: 2,
            is_paired: true,
            sources: vec![DeviceKind::BatSensor, DeviceKind::BallTracker],
            swings: Vec::new(),
            metrics: SessionMetrics {
                avg_bat_speed: Some(68.44),
                avg_exit_velocity: Some(87.5),
                max_exit_velocity: Some(95.0),
                hard_hit_rate: 0.5,
                squared_up_rate: Some(93.2),
                ..SessionMetrics::default()
            },
        };

        let cells = SessionRow::from(&session).cells();

        assert_eq!(cells.len(), SessionRow::HEADERS.len());
        assert_eq!(
            cells,
            vec!["2024-05-01", "yes", "0", "2", "3", "2", "68.4", "87.5", "95.0", "50", "93"]
        );
    }
}
