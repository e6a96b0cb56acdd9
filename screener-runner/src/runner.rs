//! Screen orchestration — fetch, classify, summarize.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use screener_core::{compute_actions, ScreenerConfig, SourceError, Table, TableSource};

use crate::summary::action_counts;

/// Version stamp for persisted artifacts. Bump on breaking changes to
/// [`ScreenResult`]'s serialized shape.
pub const SCHEMA_VERSION: u32 = 1;

/// Outcome of one screen run: the annotated table plus everything
/// needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    pub schema_version: u32,
    pub source: String,
    pub generated_at: NaiveDateTime,
    pub config: ScreenerConfig,
    pub config_hash: String,
    pub row_count: usize,
    pub action_counts: BTreeMap<String, usize>,
    pub table: Table,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("source '{0}' returned an empty table")]
    EmptyTable(String),
}

/// Fetch a table from `source` and run the decision engine over it.
///
/// The only failures are at the I/O boundary (unreachable or empty
/// source); a fetched non-empty table always screens successfully.
pub fn run_screen(
    source: &dyn TableSource,
    cfg: &ScreenerConfig,
) -> Result<ScreenResult, ScreenError> {
    let table = source.fetch()?;
    screen_table(source.name(), &table, cfg)
}

/// Run the decision engine over an already-materialized table.
pub fn screen_table(
    name: &str,
    table: &Table,
    cfg: &ScreenerConfig,
) -> Result<ScreenResult, ScreenError> {
    if table.is_empty() {
        return Err(ScreenError::EmptyTable(name.to_string()));
    }

    let annotated = compute_actions(table, cfg);
    Ok(ScreenResult {
        schema_version: SCHEMA_VERSION,
        source: name.to_string(),
        generated_at: chrono::Local::now().naive_local(),
        config: cfg.clone(),
        config_hash: cfg.config_hash(),
        row_count: annotated.height(),
        action_counts: action_counts(&annotated),
        table: annotated,
    })
}

/// Screen several sources in parallel under one configuration.
///
/// Row evaluation inside a single table is already independent; across
/// sources the whole fetch+screen is, so the fan-out happens here.
/// Results come back in input order, one per source.
pub fn screen_all(
    sources: &[Box<dyn TableSource>],
    cfg: &ScreenerConfig,
) -> Vec<Result<ScreenResult, ScreenError>> {
    sources
        .par_iter()
        .map(|source| run_screen(source.as_ref(), cfg))
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────
