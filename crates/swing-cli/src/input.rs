//! Device export loading.

use std::path::Path;

use anyhow::Context;
use swing_core::entities::RawSwing;
use swing_core::rows::{DecodedBatch, RowBatch};

use crate::cli::root_commands::InputArgs;

/// Decode one device export: a `source`-tagged row array, or
/// `{ "source": ..., "rows": [...] }`.
///
/// Only a payload of the wrong shape is an error. Individual rows that do
/// not decode come back in [`DecodedBatch::rejected`].
pub fn parse_swings(bytes: &[u8]) -> anyhow::Result<DecodedBatch> {
    let batch: RowBatch = serde_json::from_slice(bytes)
        .context("expected a tagged row array or a {source, rows} object")?;
    Ok(batch.into_swings())
}

pub async fn read_swings(path: &Path) -> anyhow::Result<Vec<RawSwing>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let batch = parse_swings(&bytes)
        .with_context(|| format!("invalid device export {}", path.display()))?;

    for row in &batch.rejected {
        tracing::warn!(
            path = %path.display(),
            index = row.index,
            id = row.id.as_deref().unwrap_or("?"),
            reason = %row.reason,
            "skipping undecodable row"
        );
    }
    tracing::debug!(
        path = %path.display(),
        rows = batch.swings.len(),
        skipped = batch.rejected.len(),
        "loaded device export"
    );
    Ok(batch.swings)
}

/// Read both streams concurrently.
pub async fn read_streams(args: &InputArgs) -> anyhow::Result<(Vec<RawSwing>, Vec<RawSwing>)> {
    tokio::try_join!(read_swings(&args.primary), read_swings(&args.secondary))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use swing_core::enums::DeviceKind;

    use super::*;

    #[test]
    fn tagged_and_uniform_batches_both_decode() {
        let tagged = br#"[
            {
                "source": "bat_sensor",
                "id": 1,
                "recorded_at_utc": "2024-05-01T17:03:11Z",
                "bat_speed": 70.2
            },
            {
                "source": "combined_unit",
                "id": "c1",
                "recorded_at": "2024-05-01T10:03:12",
                "exit_velocity": 88
            }
        ]"#;
        let swings = parse_swings(tagged).expect("tagged batch").swings;
        assert_eq!(swings.len(), 2);
        assert_eq!(swings[1].source, DeviceKind::CombinedUnit);

        let uniform = br#"{ "source": "ball_tracker", "rows": [
            { "id": "t1", "date_time": "05/01/2024 10:03:12.250", "exit_velocity": 95.1 }
        ] }"#;
        let swings = parse_swings(uniform).expect("uniform batch").swings;
        assert_eq!(swings[0].id, "t1");
        assert_eq!(swings[0].source, DeviceKind::BallTracker);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let tagged = br#"[
            { "source": "bat_sensor", "id": "b1", "bat_speed": "68.4" },
            { "source": "bat_sensor", "bat_speed": 70.0 },
            { "source": "bat_sensor", "id": "b3", "bat_speed": 71.0 }
        ]"#;

        let batch = parse_swings(tagged).expect("batch with one bad row");

        let ids: Vec<&str> = batch.swings.iter().map(|swing| swing.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3"]);
        assert_eq!(batch.swings[0].metrics.bat_speed, Some(68.4));
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].index, 1);
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(parse_swings(br#"{ "rows": 3 }"#).is_err());
        assert!(parse_swings(b"not json").is_err());
    }

    #[tokio::test]
    async fn streams_are_read_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let primary = dir.path().join("bat.json");
        let secondary = dir.path().join("ball.json");
        std::fs::File::create(&primary)
            .and_then(|mut file| {
                file.write_all(br#"[{ "source": "bat_sensor", "id": "b1" }, { "id": "b2" }]"#)
            })
            .expect("write primary");
        std::fs::write(&secondary, b"[]").expect("write secondary");

        let args = InputArgs { primary, secondary };
        let (primary, secondary) = read_streams(&args).await.expect("streams");
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].id, "b1");
        assert!(secondary.is_empty());
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let args = InputArgs {
            primary: "/nonexistent/bat.json".into(),
            secondary: "/nonexistent/ball.json".into(),
        };
        let err = read_streams(&args).await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/"));
    }
}
