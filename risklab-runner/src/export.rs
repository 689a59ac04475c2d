//! Export — JSON and CSV artifact generation for simulation results.
//!
//! Two formats:
//! - **JSON**: full round-trip serialization with schema versioning.
//!   Unknown versions are rejected on load.
//! - **CSV**: equity curve (`step,balance`) for external charting tools.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{SimulationResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationResult` to pretty JSON.
pub fn export_json(result: &SimulationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize SimulationResult to JSON")
}

/// Deserialize a `SimulationResult` from JSON, rejecting unknown schema
/// versions and regenerating fields the wire format does not carry.
pub fn import_json(json: &str) -> Result<SimulationResult> {
    let result: SimulationResult =
        serde_json::from_str(json).context("failed to deserialize SimulationResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result.rehydrate())
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the equity curve as CSV with step and balance columns.
///
/// Balances are written at full precision; two-decimal display rounding
/// is a presentation concern and stays out of exported data.
pub fn export_equity_csv(result: &SimulationResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["step", "balance"])?;
    for point in &result.equity_curve {
        wtr.write_record([point.step.to_string(), point.balance.to_string()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single run.
///
/// Creates a directory named `run_{timestamp}_{short_id}/` under
/// `output_dir` containing:
/// - `manifest.json` — the full `SimulationResult`
/// - `equity.csv` — the equity curve
///
/// Returns the created directory path.
pub fn save_artifacts(output_dir: &Path, result: &SimulationResult) -> Result<PathBuf> {
    let stamp = result.timestamp.format("%Y%m%d_%H%M%S");
    let short_id = &result.run_id[..8.min(result.run_id.len())];
    let dir = output_dir.join(format!("run_{stamp}_{short_id}"));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create artifact directory {}", dir.display()))?;

    std::fs::write(dir.join("manifest.json"), export_json(result)?)
        .context("failed to write manifest.json")?;
    std::fs::write(dir.join("equity.csv"), export_equity_csv(result)?)
        .context("failed to write equity.csv")?;

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_from_sequence;
    use risklab_core::SimulationConfig;

    fn result() -> SimulationResult {
        run_from_sequence(&SimulationConfig::new(10_000.0, 1.0, 2.0), "WWLB").unwrap()
    }

    #[test]
    fn json_round_trip() {
        let original = result();
        let json = export_json(&original).unwrap();
        let restored = import_json(&json).unwrap();
        assert_eq!(restored.run_id, original.run_id);
        assert_eq!(restored.final_balance, original.final_balance);
        assert_eq!(restored.equity_curve, original.equity_curve);
        assert_eq!(restored.rr_ratio, original.rr_ratio);
    }

    #[test]
    fn json_round_trip_with_infinite_profit_factor() {
        let all_wins =
            run_from_sequence(&SimulationConfig::new(10_000.0, 1.0, 2.0), "WWW").unwrap();
        let json = export_json(&all_wins).unwrap();
        let restored = import_json(&json).unwrap();
        assert_eq!(restored.stats.profit_factor, f64::INFINITY);
    }

    #[test]
    fn future_schema_version_rejected() {
        let mut doctored = result();
        doctored.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&doctored).unwrap();
        assert!(import_json(&json).is_err());
    }

    #[test]
    fn equity_csv_has_one_row_per_point() {
        let r = result();
        let csv = export_equity_csv(&r).unwrap();
        let lines: Vec<&str> = csv.trim().lines().collect();
        assert_eq!(lines[0], "step,balance");
        assert_eq!(lines.len(), r.equity_curve.len() + 1);
        assert!(lines[1].starts_with("0,10000"));
    }

    #[test]
    fn save_artifacts_writes_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = save_artifacts(tmp.path(), &result()).unwrap();
        assert!(dir.join("manifest.json").exists());
        assert!(dir.join("equity.csv").exists());

        let restored = import_json(&std::fs::read_to_string(dir.join("manifest.json")).unwrap());
        assert!(restored.is_ok());
    }
}
