//! Action classifier — first-match-wins state machine over the rule
//! evaluator's outputs.

use crate::config::ScreenerConfig;
use crate::domain::{Action, Decision, Record};
use crate::engine::rules::{buy_gate, sell_signal};

/// Quality flags considered for the WATCH list, in reporting order.
/// Note: payout before roic here, unlike the required-checks gate.
const WATCH_FLAGS: [(&str, fn(&Record) -> Option<bool>); 5] = [
    ("pass_debt", |r| r.pass_debt),
    ("pass_interest_cover", |r| r.pass_interest_cover),
    ("pass_fcf", |r| r.pass_fcf),
    ("pass_payout", |r| r.pass_payout),
    ("pass_roic", |r| r.pass_roic),
];

/// Classify one record into exactly one action with supporting reasons.
///
/// Branch order is the contract:
/// 1. sell signal → REVIEW SELL
/// 2. buy eligible, drawdown ≤ DD_STRONG, no flagged failures → STRONG BUY
/// 3. buy eligible with flagged failures (speculative allowed) → SPECULATIVE / WATCH
/// 4. buy eligible otherwise → BUY
/// 5. not eligible but entry permitted and some quality flag present-and-false → WATCH
/// 6. otherwise → HOLD
pub fn classify(record: &Record, cfg: &ScreenerConfig) -> Decision {
    let (sell, sell_reason) = sell_signal(record, cfg);
    if sell {
        return Decision {
            action: Action::ReviewSell,
            reason_buy: String::new(),
            reason_sell: sell_reason.clone(),
            failed_checks: sell_reason,
        };
    }
    classify_unsold(record, cfg)
}

/// Steps 2–7 of the classifier: the buy path and the watch/hold
/// fallback, without the sell check.
///
/// Under the composed flow a record reaching this point has no failed
/// required checks (they would have sold), which makes the
/// SPECULATIVE / WATCH branch unreachable from [`classify`]. The branch
/// is kept for callers that evaluate eligibility without the sell gate
/// (a watchlist that ignores structural breaks, for instance).
pub fn classify_unsold(record: &Record, cfg: &ScreenerConfig) -> Decision {
    let (buy, buy_reason) = buy_gate(record, cfg);
    if buy {
        // Flags come back embedded in the reason string; re-derive the
        // display list from it rather than re-running the gate.
        let flags = buy_reason
            .strip_prefix("ENTRY_OK_WITH_FLAGS:")
            .unwrap_or("");
        let failed = if flags.is_empty() {
            String::new()
        } else {
            flags.replace(',', " / ")
        };

        let dd = record.dd_norm;
        if !dd.is_nan() && dd <= cfg.dd_strong && failed.is_empty() {
            return Decision {
                action: Action::StrongBuy,
                reason_buy: buy_reason,
                reason_sell: String::new(),
                failed_checks: String::new(),
            };
        }
        if !failed.is_empty() && cfg.allow_speculative {
            return Decision {
                action: Action::SpeculativeWatch,
                reason_buy: buy_reason,
                reason_sell: String::new(),
                failed_checks: failed,
            };
        }
        return Decision {
            action: Action::Buy,
            reason_buy: buy_reason,
            reason_sell: String::new(),
            failed_checks: String::new(),
        };
    }

    // Not buy eligible: flag present-and-false quality gates for watching,
    // but only where entry is affirmatively permitted.
    let mut watch: Vec<&str> = Vec::new();
    if record.entry_permitted.unwrap_or(false) {
        for (name, get) in WATCH_FLAGS {
            if get(record) == Some(false) {
                watch.push(name);
            }
        }
    }

    if !watch.is_empty() {
        let joined = watch.join(" / ");
        return Decision {
            action: Action::Watch,
            reason_buy: String::new(),
            reason_sell: joined.clone(),
            failed_checks: joined,
        };
    }

    Decision {
        action: Action::Hold,
        reason_buy: String::new(),
        reason_sell: String::new(),
        failed_checks: String::new(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
