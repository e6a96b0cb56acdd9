//! Screen artifact export — JSON, CSV, and Markdown generation.
//!
//! Three formats for a completed screen:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the annotated table for spreadsheet tools
//! - **Markdown**: human-readable run summary
//!
//! All persisted artifacts include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use screener_core::Table;

use crate::runner::{ScreenResult, SCHEMA_VERSION};
use crate::summary::top_entries;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ScreenResult` to pretty JSON.
pub fn export_json(result: &ScreenResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ScreenResult to JSON")
}

/// Deserialize a `ScreenResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScreenResult> {
    let result: ScreenResult =
        serde_json::from_str(json).context("failed to deserialize ScreenResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export an annotated table as CSV, column order preserved.
///
/// NaN and null cells render as empty fields, the way spreadsheet
/// exports represent missing values.
pub fn export_table_csv(table: &Table) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(table.headers())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.to_csv_field()))?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single screen run.
///
/// Creates a directory named `{source}_{timestamp}/` under `output_dir`
/// containing:
/// - `screen.json` — the full `ScreenResult`
/// - `screen.csv` — the annotated table
/// - `report.md` — human-readable summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &ScreenResult, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        result.source,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(result)?;
    std::fs::write(run_dir.join("screen.json"), &json)?;

    let table_csv = export_table_csv(&result.table)?;
    std::fs::write(run_dir.join("screen.csv"), &table_csv)?;

    let report = generate_report(result);
    std::fs::write(run_dir.join("report.md"), &report)?;

    Ok(run_dir)
}

/// Load a `ScreenResult` from an artifact directory's screen.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<ScreenResult> {
    let json_path = dir.join("screen.json");
    let json = std::fs::read_to_string(&json_path)
        .with_context(|| format!("failed to read {}", json_path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a single screen run.
pub fn generate_report(result: &ScreenResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Screen Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Source | {} |\n", result.source));
    md.push_str(&format!(
        "| Generated | {} |\n",
        result.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    md.push_str(&format!("| Rows | {} |\n", result.row_count));
    md.push_str(&format!("| Config Hash | {} |\n", result.config_hash));
    md.push_str(&format!(
        "| Score ≥ | {:.0} |\n",
        result.config.score_buy_min
    ));
    md.push_str(&format!(
        "| Drawdown ≤ | {:.0}% (buy) / {:.0}% (strong) |\n",
        result.config.dd_buy * 100.0,
        result.config.dd_strong * 100.0
    ));
    md.push('\n');

    md.push_str("## Actions\n\n");
    md.push_str("| Action | Count |\n");
    md.push_str("| --- | --- |\n");
    for (action, count) in &result.action_counts {
        md.push_str(&format!("| {action} | {count} |\n"));
    }
    md.push('\n');

    let top = top_entries(&result.table, 10);
    if !top.is_empty() {
        md.push_str("## Top Entries\n\n");
        md.push_str("| Ticker | Action | Score | Drawdown | Reason |\n");
        md.push_str("| --- | --- | --- | --- | --- |\n");
        for e in &top {
            let score = e.score.map_or(String::new(), |s| format!("{s:.0}"));
            let dd = e.dd_norm.map_or(String::new(), |d| format!("{:.0}%", d * 100.0));
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                e.ticker, e.action, score, dd, e.reason
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{compute_actions, ScreenerConfig, Table};
    use tempfile::tempdir;

    use crate::runner::screen_table;

    // ─── Test helpers ────────────────────────────────────────────────

    fn sample_result() -> ScreenResult {
        let csv = "ticker,score,drawdown_from_52w_high,QUALITY_PASS,ENTRY_PERMITTED,BUY_CANDIDATE,\
pass_debt,pass_interest_cover,pass_fcf\n\
AAA,90,-35,yes,yes,yes,yes,yes,yes\n\
BBB,20,-5,no,yes,yes,yes,yes,yes\n\
CCC,50,-10,yes,no,no,yes,yes,yes\n";
        let table = Table::from_csv_str(csv).unwrap();
        screen_table("sample", &table, &ScreenerConfig::default()).unwrap()
    }

    // ─── JSON round-trip ─────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_result();
        let json = export_json(&original).unwrap();
        let restored = import_json(&json).unwrap();

        assert_eq!(restored.schema_version, SCHEMA_VERSION);
        assert_eq!(restored.source, original.source);
        assert_eq!(restored.row_count, original.row_count);
        assert_eq!(restored.action_counts, original.action_counts);
        assert_eq!(restored.config_hash, original.config_hash);
    }

    #[test]
    fn future_schema_version_rejected() {
        let mut result = sample_result();
        result.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&result).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    // ─── CSV export ──────────────────────────────────────────────────

    #[test]
    fn csv_has_header_and_all_rows() {
        let result = sample_result();
        let csv = export_table_csv(&result.table).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + result.row_count);
        assert!(lines[0].starts_with("ticker,"));
        assert!(lines[0].contains("ACTION"));
    }

    #[test]
    fn csv_renders_missing_numerics_as_empty() {
        let mut table = Table::new(vec!["ticker".into(), "score".into()]);
        table.push_row(vec!["XYZ".into(), screener_core::Cell::Number(f64::NAN)]);
        let annotated = compute_actions(&table, &ScreenerConfig::default());
        let csv = export_table_csv(&annotated).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("XYZ,,"));
    }

    // ─── Artifact bundle ─────────────────────────────────────────────

    #[test]
    fn save_and_load_artifacts() {
        let dir = tempdir().unwrap();
        let result = sample_result();

        let run_dir = save_artifacts(&result, dir.path()).unwrap();
        assert!(run_dir.join("screen.json").exists());
        assert!(run_dir.join("screen.csv").exists());
        assert!(run_dir.join("report.md").exists());
        assert!(run_dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("sample_"));

        let restored = load_artifacts(&run_dir).unwrap();
        assert_eq!(restored.action_counts, result.action_counts);
    }

    // ─── Markdown report ─────────────────────────────────────────────

    #[test]
    fn report_lists_actions_and_top_entries() {
        let result = sample_result();
        let md = generate_report(&result);
        assert!(md.contains("# Screen Report"));
        assert!(md.contains("| Source | sample |"));
        assert!(md.contains("| STRONG BUY | 1 |"));
        assert!(md.contains("| REVIEW SELL | 1 |"));
        assert!(md.contains("| AAA | STRONG BUY |"));
    }
}
