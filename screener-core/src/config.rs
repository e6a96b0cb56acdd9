//! Screener configuration — thresholds and gating toggles.
//!
//! One immutable `ScreenerConfig` is resolved per run (profile + risk
//! slider + overrides happen upstream in the runner) and shared read-only
//! by every record evaluation. Serde keys use the upstream sheet's
//! SCREAMING_SNAKE_CASE spelling so config maps round-trip unchanged.

use serde::{Deserialize, Serialize};

/// Fully enumerated configuration with defaults baked into `Default`.
///
/// `dd_strong` is expected to sit at or below `dd_buy` (more negative is
/// a deeper drawdown); the engine tolerates a violation rather than
/// enforcing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ScreenerConfig {
    /// Minimum composite score that qualifies a record for BUY when it is
    /// not already flagged as a buy candidate.
    pub score_buy_min: f64,

    /// Drawdown (negative fraction) a record must reach for BUY.
    pub dd_buy: f64,

    /// Drawdown (negative fraction) a record must reach for STRONG BUY.
    pub dd_strong: f64,

    pub require_pass_debt: bool,
    pub require_pass_interest: bool,
    pub require_pass_fcf: bool,
    pub require_pass_roic: bool,
    pub require_pass_payout: bool,

    /// Permit buy eligibility despite failed required checks
    /// (classified as SPECULATIVE / WATCH instead of BUY).
    pub allow_speculative: bool,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            score_buy_min: 70.0,
            dd_buy: -0.20,
            dd_strong: -0.30,
            require_pass_debt: true,
            require_pass_interest: true,
            require_pass_fcf: true,
            require_pass_roic: false,
            require_pass_payout: false,
            allow_speculative: true,
        }
    }
}

impl ScreenerConfig {
    /// Deterministic content hash of this configuration.
    ///
    /// Embedded in result artifacts so a screen run can be tied back to
    /// the exact thresholds that produced it.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("ScreenerConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_contract() {
        let cfg = ScreenerConfig::default();
        assert_eq!(cfg.score_buy_min, 70.0);
        assert_eq!(cfg.dd_buy, -0.20);
        assert_eq!(cfg.dd_strong, -0.30);
        assert!(cfg.require_pass_debt);
        assert!(cfg.require_pass_interest);
        assert!(cfg.require_pass_fcf);
        assert!(!cfg.require_pass_roic);
        assert!(!cfg.require_pass_payout);
        assert!(cfg.allow_speculative);
    }

    #[test]
    fn serde_uses_upstream_keys() {
        let json = serde_json::to_string(&ScreenerConfig::default()).unwrap();
        assert!(json.contains("\"SCORE_BUY_MIN\""));
        assert!(json.contains("\"DD_STRONG\""));
        assert!(json.contains("\"REQUIRE_PASS_INTEREST\""));
        assert!(json.contains("\"ALLOW_SPECULATIVE\""));
    }

    #[test]
    fn partial_map_fills_defaults() {
        let cfg: ScreenerConfig =
            serde_json::from_str(r#"{"SCORE_BUY_MIN": 55.0, "ALLOW_SPECULATIVE": false}"#).unwrap();
        assert_eq!(cfg.score_buy_min, 55.0);
        assert!(!cfg.allow_speculative);
        assert_eq!(cfg.dd_buy, -0.20);
        assert!(cfg.require_pass_fcf);
    }

    #[test]
    fn config_hash_deterministic() {
        let a = ScreenerConfig::default();
        let b = ScreenerConfig::default();
        assert_eq!(a.config_hash(), b.config_hash());
        assert!(!a.config_hash().is_empty());
    }

    #[test]
    fn config_hash_changes_with_thresholds() {
        let a = ScreenerConfig::default();
        let b = ScreenerConfig {
            score_buy_min: 85.0,
            ..ScreenerConfig::default()
        };
        assert_ne!(a.config_hash(), b.config_hash());
    }
}
