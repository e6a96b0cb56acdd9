//! Record — the typed per-row view the rule evaluator consumes.

use serde::{Deserialize, Serialize};

/// Normalized evaluator input for one row.
///
/// Quality flags are `Option<bool>`: `None` means the column is absent
/// from the table, which is not the same as present-and-false. The watch
/// list only collects flags present on the record, and the sell gate
/// treats a missing `QUALITY_PASS` as passing while the buy gate treats
/// it as failing. Numerics use NaN as the missing sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Drawdown from the 52-week high, already normalized to a negative
    /// fraction (NaN when missing).
    pub dd_norm: f64,

    /// Composite quality score (NaN when missing).
    pub score: f64,

    pub pass_fcf: Option<bool>,
    pub pass_roic: Option<bool>,
    pub pass_payout: Option<bool>,
    pub pass_debt: Option<bool>,
    pub pass_interest_cover: Option<bool>,

    pub quality_pass: Option<bool>,
    pub entry_permitted: Option<bool>,
    pub buy_candidate: Option<bool>,
}

impl Record {
    /// A record as an empty table would yield it: every column absent.
    pub fn absent() -> Self {
        Self {
            dd_norm: f64::NAN,
            score: f64::NAN,
            pass_fcf: None,
            pass_roic: None,
            pass_payout: None,
            pass_debt: None,
            pass_interest_cover: None,
            quality_pass: None,
            entry_permitted: None,
            buy_candidate: None,
        }
    }
}
