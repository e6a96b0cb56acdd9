//! Rule evaluator — pure functions of (record, config).
//!
//! Sell and buy logic share the required-checks gate. Evaluation order
//! and reason strings are part of the engine contract: downstream
//! consumers parse the `ENTRY_OK_WITH_FLAGS:` / `FAILED_REQUIRED:`
//! prefixes and the `" / "` joins.

use crate::config::ScreenerConfig;
use crate::domain::Record;

/// Required-checks gate: for each quality flag whose `REQUIRE_PASS_*`
/// toggle is enabled, a flag that is not affirmatively true fails.
/// Order is fixed: debt, interest cover, fcf, roic, payout.
pub fn failed_required_checks(record: &Record, cfg: &ScreenerConfig) -> Vec<&'static str> {
    let mut failed = Vec::new();

    if cfg.require_pass_debt && !record.pass_debt.unwrap_or(false) {
        failed.push("pass_debt");
    }
    if cfg.require_pass_interest && !record.pass_interest_cover.unwrap_or(false) {
        failed.push("pass_interest_cover");
    }
    if cfg.require_pass_fcf && !record.pass_fcf.unwrap_or(false) {
        failed.push("pass_fcf");
    }
    if cfg.require_pass_roic && !record.pass_roic.unwrap_or(false) {
        failed.push("pass_roic");
    }
    if cfg.require_pass_payout && !record.pass_payout.unwrap_or(false) {
        failed.push("pass_payout");
    }

    failed
}

/// Structural sell check.
///
/// A failed `QUALITY_PASS` short-circuits; the required-checks reason is
/// only computed when `QUALITY_PASS` holds. A missing `QUALITY_PASS`
/// column defaults to passing here — only affirmative evidence of a
/// quality break triggers a sell review.
pub fn sell_signal(record: &Record, cfg: &ScreenerConfig) -> (bool, String) {
    if !record.quality_pass.unwrap_or(true) {
        return (true, "QUALITY_PASS=FALSE".to_string());
    }
    let failed = failed_required_checks(record, cfg);
    if !failed.is_empty() {
        return (true, failed.join(" / "));
    }
    (false, String::new())
}

/// Buy eligibility gate, evaluated only for records with no sell signal.
///
/// The `QUALITY_PASS` step is unreachable under the default flow (a
/// false flag already produced a sell signal) but is kept for callers
/// that evaluate the buy gate in isolation; here, unlike the sell side,
/// a missing column fails closed.
pub fn buy_gate(record: &Record, cfg: &ScreenerConfig) -> (bool, String) {
    if !record.entry_permitted.unwrap_or(false) {
        return (false, "ENTRY_PERMITTED=FALSE".to_string());
    }
    if !record.quality_pass.unwrap_or(false) {
        return (false, "QUALITY_PASS=FALSE".to_string());
    }

    let buy_candidate = record.buy_candidate.unwrap_or(false);
    let score_ok = !record.score.is_nan() && record.score >= cfg.score_buy_min;
    if !(buy_candidate || score_ok) {
        return (false, "NO_BUY_CANDIDATE_OR_SCORE".to_string());
    }

    // Drawdown not deep enough: both values are negative fractions, so
    // "greater than" means closer to zero.
    let dd = record.dd_norm;
    if !dd.is_nan() && dd > cfg.dd_buy {
        return (false, format!("INSUFFICIENT_DRAWDOWN({:.0}%)", dd * 100.0));
    }

    let failed = failed_required_checks(record, cfg);
    if !failed.is_empty() {
        if cfg.allow_speculative {
            return (true, format!("ENTRY_OK_WITH_FLAGS:{}", failed.join(",")));
        }
        return (false, format!("FAILED_REQUIRED:{}", failed.join(",")));
    }

    (true, "ENTRY_OK".to_string())
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn healthy() -> Record {
        Record {
            dd_norm: -0.25,
            score: 80.0,
            pass_fcf: Some(true),
            pass_roic: Some(true),
            pass_payout: Some(true),
            pass_debt: Some(true),
            pass_interest_cover: Some(true),
            quality_pass: Some(true),
            entry_permitted: Some(true),
            buy_candidate: Some(true),
        }
    }

    // ── Required checks ──

    #[test]
    fn required_checks_honor_toggles() {
        let cfg = ScreenerConfig::default();
        let mut r = healthy();
        r.pass_roic = Some(false); // roic not required by default
        assert!(failed_required_checks(&r, &cfg).is_empty());

        let cfg = ScreenerConfig {
            require_pass_roic: true,
            ..ScreenerConfig::default()
        };
        assert_eq!(failed_required_checks(&r, &cfg), vec!["pass_roic"]);
    }

    #[test]
    fn required_checks_fixed_order() {
        let cfg = ScreenerConfig {
            require_pass_roic: true,
            require_pass_payout: true,
            ..ScreenerConfig::default()
        };
        let mut r = healthy();
        r.pass_debt = Some(false);
        r.pass_interest_cover = Some(false);
        r.pass_fcf = Some(false);
        r.pass_roic = Some(false);
        r.pass_payout = Some(false);
        assert_eq!(
            failed_required_checks(&r, &cfg),
            vec![
                "pass_debt",
                "pass_interest_cover",
                "pass_fcf",
                "pass_roic",
                "pass_payout"
            ]
        );
    }

    #[test]
    fn missing_required_flag_fails_closed() {
        let cfg = ScreenerConfig::default();
        let mut r = healthy();
        r.pass_debt = None;
        assert_eq!(failed_required_checks(&r, &cfg), vec!["pass_debt"]);
    }

    // ── Sell signal ──

    #[test]
    fn quality_break_short_circuits() {
        let cfg = ScreenerConfig::default();
        let mut r = healthy();
        r.quality_pass = Some(false);
        r.pass_debt = Some(false); // would also fail, but must not be reported
        let (sell, reason) = sell_signal(&r, &cfg);
        assert!(sell);
        assert_eq!(reason, "QUALITY_PASS=FALSE");
    }

    #[test]
    fn required_failures_trigger_sell() {
        let cfg = ScreenerConfig::default();
        let mut r = healthy();
        r.pass_debt = Some(false);
        r.pass_fcf = Some(false);
        let (sell, reason) = sell_signal(&r, &cfg);
        assert!(sell);
        assert_eq!(reason, "pass_debt / pass_fcf");
    }

    #[test]
    fn missing_quality_pass_does_not_sell() {
        let cfg = ScreenerConfig::default();
        let mut r = healthy();
        r.quality_pass = None;
        let (sell, reason) = sell_signal(&r, &cfg);
        assert!(!sell);
        assert!(reason.is_empty());
    }

    #[test]
    fn healthy_record_no_sell() {
        let (sell, reason) = sell_signal(&healthy(), &ScreenerConfig::default());
        assert!(!sell);
        assert!(reason.is_empty());
    }

    // ── Buy gate ──

    #[test]
    fn entry_not_permitted_blocks() {
        let mut r = healthy();
        r.entry_permitted = Some(false);
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(!buy);
        assert_eq!(reason, "ENTRY_PERMITTED=FALSE");
    }

    #[test]
    fn missing_quality_pass_blocks_buy() {
        // Asymmetric with the sell gate: no evidence fails closed here.
        let mut r = healthy();
        r.quality_pass = None;
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(!buy);
        assert_eq!(reason, "QUALITY_PASS=FALSE");
    }

    #[test]
    fn candidate_or_score_required() {
        let mut r = healthy();
        r.buy_candidate = Some(false);
        r.score = 50.0;
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(!buy);
        assert_eq!(reason, "NO_BUY_CANDIDATE_OR_SCORE");

        r.score = 70.0; // at threshold qualifies
        let (buy, _) = buy_gate(&r, &ScreenerConfig::default());
        assert!(buy);
    }

    #[test]
    fn nan_score_never_qualifies() {
        let mut r = healthy();
        r.buy_candidate = Some(false);
        r.score = f64::NAN;
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(!buy);
        assert_eq!(reason, "NO_BUY_CANDIDATE_OR_SCORE");
    }

    #[test]
    fn shallow_drawdown_blocks_with_formatted_reason() {
        let mut r = healthy();
        r.dd_norm = -0.05;
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(!buy);
        assert_eq!(reason, "INSUFFICIENT_DRAWDOWN(-5%)");
    }

    #[test]
    fn nan_drawdown_skips_the_gate() {
        let mut r = healthy();
        r.dd_norm = f64::NAN;
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(buy);
        assert_eq!(reason, "ENTRY_OK");
    }

    #[test]
    fn flagged_entry_when_speculative_allowed() {
        let mut r = healthy();
        r.pass_debt = Some(false);
        let (buy, reason) = buy_gate(&r, &ScreenerConfig::default());
        assert!(buy);
        assert_eq!(reason, "ENTRY_OK_WITH_FLAGS:pass_debt");
    }

    #[test]
    fn flagged_entry_blocked_without_speculative() {
        let cfg = ScreenerConfig {
            allow_speculative: false,
            ..ScreenerConfig::default()
        };
        let mut r = healthy();
        r.pass_debt = Some(false);
        r.pass_fcf = Some(false);
        let (buy, reason) = buy_gate(&r, &cfg);
        assert!(!buy);
        assert_eq!(reason, "FAILED_REQUIRED:pass_debt,pass_fcf");
    }

    #[test]
    fn clean_entry_ok() {
        let (buy, reason) = buy_gate(&healthy(), &ScreenerConfig::default());
        assert!(buy);
        assert_eq!(reason, "ENTRY_OK");
    }
}
