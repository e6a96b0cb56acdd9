//! Result summarization for display: action tallies and top entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use screener_core::{Action, Cell, Table};

/// Count rows per action label. All six labels appear in the map even
/// when zero, so tallies are shape-stable across runs.
pub fn action_counts(table: &Table) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = Action::ALL
        .iter()
        .map(|a| (a.as_str().to_string(), 0))
        .collect();

    if let Some(idx) = table.column_index("ACTION") {
        for row in table.rows() {
            if let Cell::Text(label) = &row[idx] {
                if let Some(count) = counts.get_mut(label) {
                    *count += 1;
                }
            }
        }
    }
    counts
}

/// One display row of the annotated table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    pub ticker: String,
    pub action: String,
    pub score: Option<f64>,
    pub dd_norm: Option<f64>,
    pub reason: String,
}

/// The first `n` rows of an annotated (already sorted) table, distilled
/// for terminal display. Missing columns degrade to blanks, not errors.
pub fn top_entries(table: &Table, n: usize) -> Vec<TopEntry> {
    let ticker_idx = table.column_index("ticker");
    let action_idx = table.column_index("ACTION");
    let score_idx = table.column_index("score");
    let dd_idx = table.column_index("dd_norm");
    let buy_idx = table.column_index("REASON_BUY");
    let sell_idx = table.column_index("REASON_SELL");

    let text = |row: &[Cell], idx: Option<usize>| -> String {
        idx.map_or(String::new(), |i| match &row[i] {
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(v) => v.to_string(),
            Cell::Null => String::new(),
        })
    };
    let num = |row: &[Cell], idx: Option<usize>| -> Option<f64> {
        idx.and_then(|i| match row[i] {
            Cell::Number(v) if !v.is_nan() => Some(v),
            _ => None,
        })
    };

    table
        .rows()
        .iter()
        .take(n)
        .map(|row| {
            let reason_buy = text(row, buy_idx);
            let reason = if reason_buy.is_empty() {
                text(row, sell_idx)
            } else {
                reason_buy
            };
            TopEntry {
                ticker: text(row, ticker_idx),
                action: text(row, action_idx),
                score: num(row, score_idx),
                dd_norm: num(row, dd_idx),
                reason,
            }
        })
        .collect()
}
