//! Named profiles and risk-slider threshold resolution.
//!
//! A profile contributes the boolean gating toggles; the three numeric
//! thresholds come from the risk slider by piecewise-linear
//! interpolation over three anchor risk levels {0, 50, 100}:
//!
//! - minimum score: 85 → 70 → 55 (truncated to a whole number)
//! - buy drawdown: −0.35 → −0.20 → −0.10
//! - strong-buy drawdown: −0.45 → −0.30 → −0.20
//!
//! Explicit numeric overrides beat the interpolated defaults. The
//! resolver's output is one immutable [`ScreenerConfig`] shared
//! read-only by every record evaluation in the run.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use screener_core::ScreenerConfig;

/// Anchor risk levels for threshold interpolation.
const RISK_ANCHORS: [f64; 3] = [0.0, 50.0, 100.0];
const SCORE_ANCHORS: [f64; 3] = [85.0, 70.0, 55.0];
const DD_BUY_ANCHORS: [f64; 3] = [-0.35, -0.20, -0.10];
const DD_STRONG_ANCHORS: [f64; 3] = [-0.45, -0.30, -0.20];

/// Gating toggles of one named profile. Absent toggles fall back to
/// the documented defaults at resolution time, so profile files only
/// need to spell out what they change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Profile {
    pub require_pass_debt: Option<bool>,
    pub require_pass_interest: Option<bool>,
    pub require_pass_fcf: Option<bool>,
    pub require_pass_roic: Option<bool>,
    pub require_pass_payout: Option<bool>,
    pub allow_speculative: Option<bool>,
}

/// User-supplied numeric overrides; each one beats its interpolated
/// default when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub score_buy_min: Option<f64>,
    pub dd_buy: Option<f64>,
    pub dd_strong: Option<f64>,
}

/// A named collection of profiles, built-in or loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read profile file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown profile '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

impl ProfileSet {
    /// The three built-in profiles.
    ///
    /// `balanced` is the documented fallback set; `conservative` arms
    /// every gate and forbids speculative entries; `aggressive` keeps
    /// only the debt gate.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("balanced".to_string(), Profile::default());
        profiles.insert(
            "conservative".to_string(),
            Profile {
                require_pass_debt: Some(true),
                require_pass_interest: Some(true),
                require_pass_fcf: Some(true),
                require_pass_roic: Some(true),
                require_pass_payout: Some(true),
                allow_speculative: Some(false),
            },
        );
        profiles.insert(
            "aggressive".to_string(),
            Profile {
                require_pass_debt: Some(true),
                require_pass_interest: Some(false),
                require_pass_fcf: Some(false),
                require_pass_roic: Some(false),
                require_pass_payout: Some(false),
                allow_speculative: Some(true),
            },
        );
        Self { profiles }
    }

    /// Parse a profile set from TOML: one table per profile name.
    pub fn from_toml_str(data: &str) -> Result<Self, ProfileError> {
        let profiles: BTreeMap<String, Profile> = toml::from_str(data)?;
        Ok(Self { profiles })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ProfileError> {
        let data = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(|k| k.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Result<&Profile, ProfileError> {
        self.profiles.get(name).ok_or_else(|| ProfileError::Unknown {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }
}

/// Piecewise-linear interpolation of `x` over the (sorted) anchor grid.
/// Values outside the grid clamp to the edge anchors.
fn interp(x: f64, xs: &[f64; 3], ys: &[f64; 3]) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[2] {
        return ys[2];
    }
    let (x0, x1, y0, y1) = if x <= xs[1] {
        (xs[0], xs[1], ys[0], ys[1])
    } else {
        (xs[1], xs[2], ys[1], ys[2])
    };
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Resolve a profile, a risk slider value and overrides into the
/// immutable run configuration.
pub fn resolve(profile: &Profile, risk: u8, overrides: &ThresholdOverrides) -> ScreenerConfig {
    let risk = f64::from(risk.min(100));

    // Truncation (not rounding) of the score default matches the
    // upstream slider behavior.
    let score_buy_min = overrides
        .score_buy_min
        .unwrap_or_else(|| interp(risk, &RISK_ANCHORS, &SCORE_ANCHORS).trunc());
    let dd_buy = overrides
        .dd_buy
        .unwrap_or_else(|| interp(risk, &RISK_ANCHORS, &DD_BUY_ANCHORS));
    let dd_strong = overrides
        .dd_strong
        .unwrap_or_else(|| interp(risk, &RISK_ANCHORS, &DD_STRONG_ANCHORS));

    ScreenerConfig {
        score_buy_min,
        dd_buy,
        dd_strong,
        require_pass_debt: profile.require_pass_debt.unwrap_or(true),
        require_pass_interest: profile.require_pass_interest.unwrap_or(true),
        require_pass_fcf: profile.require_pass_fcf.unwrap_or(true),
        require_pass_roic: profile.require_pass_roic.unwrap_or(false),
        require_pass_payout: profile.require_pass_payout.unwrap_or(false),
        allow_speculative: profile.allow_speculative.unwrap_or(true),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
