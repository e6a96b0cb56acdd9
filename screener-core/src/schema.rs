//! Recognized column names and their type classes.
//!
//! Every recognized column is optional: an absent column falls back to a
//! documented default (false for flags, NaN for numerics) instead of
//! failing. Columns not listed here pass through the engine unmodified.

/// Free-text columns, trimmed on normalization but never case-folded.
pub const TEXT_COLUMNS: [&str; 4] = ["ticker", "name", "sector", "drawdown_trigger"];

/// Numeric metric columns, coerced through [`crate::normalize::to_num`].
pub const NUMERIC_COLUMNS: [&str; 10] = [
    "price",
    "drawdown_from_52w_high",
    "fcf_last_year",
    "fcf_positive_last_n_years",
    "fcf_trend_slope",
    "roic_proxy",
    "payout_to_fcf",
    "net_debt_to_ebitda",
    "interest_cover",
    "score",
];

/// Boolean quality-flag columns, coerced through [`crate::normalize::to_bool`].
pub const BOOL_COLUMNS: [&str; 8] = [
    "pass_fcf",
    "pass_roic",
    "pass_payout",
    "pass_debt",
    "pass_interest_cover",
    "QUALITY_PASS",
    "ENTRY_PERMITTED",
    "BUY_CANDIDATE",
];

/// Columns the engine appends (or overwrites, when re-run on its own
/// output) to the annotated result table.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "dd_norm",
    "ACTION",
    "REASON_BUY",
    "REASON_SELL",
    "FAILED_CHECKS",
    "BUY_SIGNAL",
    "SELL_SIGNAL",
];

/// Type class of a column as the normalizer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
    Boolean,
    /// Unrecognized: passes through untouched.
    Passthrough,
}

pub fn column_kind(name: &str) -> ColumnKind {
    if TEXT_COLUMNS.contains(&name) {
        ColumnKind::Text
    } else if NUMERIC_COLUMNS.contains(&name) {
        ColumnKind::Numeric
    } else if BOOL_COLUMNS.contains(&name) {
        ColumnKind::Boolean
    } else {
        ColumnKind::Passthrough
    }
}
