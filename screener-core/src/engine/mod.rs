//! Decision engine — the single-pass table transformation.
//!
//! `compute_actions` is total: for any syntactically valid table (even
//! one with no recognized columns) it returns an annotated table, never
//! an error. The source table is copied, never mutated.
//!
//! Pipeline: trim headers → normalize typed columns in place → derive
//! `dd_norm` → classify each row independently → append decision
//! columns → stable sort (BUY_SIGNAL desc, SELL_SIGNAL desc, score desc
//! with missing scores last).

pub mod classify;
pub mod rules;

use std::cmp::Ordering;

use crate::config::ScreenerConfig;
use crate::domain::{Decision, Record};
use crate::normalize::{normalize_drawdown, to_bool, to_num, trim_text};
use crate::schema::{BOOL_COLUMNS, NUMERIC_COLUMNS, TEXT_COLUMNS};
use crate::table::{Cell, Table};

pub use classify::{classify, classify_unsold};

/// Resolved indices of the recognized columns in one table.
///
/// Built once per run; row extraction is then index lookups only.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    score: Option<usize>,
    pass_fcf: Option<usize>,
    pass_roic: Option<usize>,
    pass_payout: Option<usize>,
    pass_debt: Option<usize>,
    pass_interest_cover: Option<usize>,
    quality_pass: Option<usize>,
    entry_permitted: Option<usize>,
    buy_candidate: Option<usize>,
    dd_norm: Option<usize>,
}

impl ColumnMap {
    fn resolve(table: &Table) -> Self {
        Self {
            score: table.column_index("score"),
            pass_fcf: table.column_index("pass_fcf"),
            pass_roic: table.column_index("pass_roic"),
            pass_payout: table.column_index("pass_payout"),
            pass_debt: table.column_index("pass_debt"),
            pass_interest_cover: table.column_index("pass_interest_cover"),
            quality_pass: table.column_index("QUALITY_PASS"),
            entry_permitted: table.column_index("ENTRY_PERMITTED"),
            buy_candidate: table.column_index("BUY_CANDIDATE"),
            dd_norm: table.column_index("dd_norm"),
        }
    }

    /// Typed view of one row. Absent columns stay `None` / NaN, and so
    /// do cells a row narrower than the header never reaches. Cells are
    /// coerced on read, so raw (un-normalized) rows classify the same
    /// as rows the pipeline has already typed.
    fn record(&self, row: &[Cell]) -> Record {
        let flag = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(to_bool);
        let num = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or(f64::NAN, to_num);
        Record {
            dd_norm: num(self.dd_norm),
            score: num(self.score),
            pass_fcf: flag(self.pass_fcf),
            pass_roic: flag(self.pass_roic),
            pass_payout: flag(self.pass_payout),
            pass_debt: flag(self.pass_debt),
            pass_interest_cover: flag(self.pass_interest_cover),
            quality_pass: flag(self.quality_pass),
            entry_permitted: flag(self.entry_permitted),
            buy_candidate: flag(self.buy_candidate),
        }
    }
}

/// Run the full decision engine over a table.
///
/// Original columns are preserved (recognized ones normalized in place);
/// `dd_norm`, `ACTION`, `REASON_BUY`, `REASON_SELL`, `FAILED_CHECKS`,
/// `BUY_SIGNAL` and `SELL_SIGNAL` are appended, overwriting columns of
/// the same name if the input already carries them (re-screening the
/// engine's own output is supported and idempotent).
pub fn compute_actions(table: &Table, cfg: &ScreenerConfig) -> Table {
    let mut out = table.clone();
    out.trim_headers();

    normalize_columns(&mut out);

    // Drawdown normalized to a negative fraction, NaN when absent.
    let dd_norm: Vec<Cell> = match out.column("drawdown_from_52w_high") {
        Some(raw) => raw
            .iter()
            .map(|c| Cell::Number(normalize_drawdown(to_num(c))))
            .collect(),
        None => vec![Cell::Number(f64::NAN); out.height()],
    };
    out.set_column("dd_norm", dd_norm);

    let map = ColumnMap::resolve(&out);
    let decisions: Vec<Decision> = out
        .rows()
        .iter()
        .map(|row| classify(&map.record(row), cfg))
        .collect();

    append_decision_columns(&mut out, &decisions);
    sort_results(&mut out);
    out
}

/// Decide one row against `table`'s header layout. Exposed so callers
/// can parallelize row evaluation themselves; rows are independent by
/// construction.
///
/// The row need not be normalized or full width: cells are coerced on
/// read and missing trailing cells count as absent evidence. Drawdown
/// is read from a `dd_norm` column only — raw
/// `drawdown_from_52w_high` input is the pipeline's job to derive.
pub fn decide_row(table: &Table, row: &[Cell], cfg: &ScreenerConfig) -> Decision {
    classify(&ColumnMap::resolve(table).record(row), cfg)
}

fn normalize_columns(out: &mut Table) {
    for name in TEXT_COLUMNS {
        if let Some(idx) = out.column_index(name) {
            out.map_column(idx, trim_text);
        }
    }
    for name in NUMERIC_COLUMNS {
        if let Some(idx) = out.column_index(name) {
            out.map_column(idx, |c| Cell::Number(to_num(c)));
        }
    }
    for name in BOOL_COLUMNS {
        if let Some(idx) = out.column_index(name) {
            out.map_column(idx, |c| Cell::Bool(to_bool(c)));
        }
    }
}

fn append_decision_columns(out: &mut Table, decisions: &[Decision]) {
    let text = |f: fn(&Decision) -> &str| -> Vec<Cell> {
        decisions
            .iter()
            .map(|d| Cell::Text(f(d).to_string()))
            .collect()
    };
    out.set_column("ACTION", text(|d| d.action.as_str()));
    out.set_column("REASON_BUY", text(|d| &d.reason_buy));
    out.set_column("REASON_SELL", text(|d| &d.reason_sell));
    out.set_column("FAILED_CHECKS", text(|d| &d.failed_checks));
    out.set_column(
        "BUY_SIGNAL",
        decisions.iter().map(|d| Cell::Bool(d.buy_signal())).collect(),
    );
    out.set_column(
        "SELL_SIGNAL",
        decisions.iter().map(|d| Cell::Bool(d.sell_signal())).collect(),
    );
}

/// Stable sort: BUY_SIGNAL true first, then SELL_SIGNAL true first, then
/// score descending with NaN/missing scores placed last. With no score
/// column every score key is NaN, which degenerates to the two-boolean
/// sort. Ties keep original row order.
fn sort_results(out: &mut Table) {
    let buy_idx = out.column_index("BUY_SIGNAL");
    let sell_idx = out.column_index("SELL_SIGNAL");
    let score_idx = out.column_index("score");

    let flag = |row: &[Cell], idx: Option<usize>| -> bool {
        idx.is_some_and(|i| matches!(row[i], Cell::Bool(true)))
    };
    let score = |row: &[Cell], idx: Option<usize>| -> f64 {
        idx.map_or(f64::NAN, |i| match row[i] {
            Cell::Number(n) => n,
            _ => f64::NAN,
        })
    };

    out.sort_rows_by(|a, b| {
        flag(b, buy_idx)
            .cmp(&flag(a, buy_idx))
            .then(flag(b, sell_idx).cmp(&flag(a, sell_idx)))
            .then_with(|| desc_nan_last(score(a, score_idx), score(b, score_idx)))
    });
}

/// Descending comparison with NaN ordered after every number.
fn desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
