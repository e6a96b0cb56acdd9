//! Action and Decision — the classification attached to each record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive investment action for one record.
///
/// The serialized labels are the exact strings written to the `ACTION`
/// column of the annotated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SPECULATIVE / WATCH")]
    SpeculativeWatch,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "REVIEW SELL")]
    ReviewSell,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::StrongBuy,
        Action::Buy,
        Action::SpeculativeWatch,
        Action::Watch,
        Action::Hold,
        Action::ReviewSell,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::StrongBuy => "STRONG BUY",
            Action::Buy => "BUY",
            Action::SpeculativeWatch => "SPECULATIVE / WATCH",
            Action::Watch => "WATCH",
            Action::Hold => "HOLD",
            Action::ReviewSell => "REVIEW SELL",
        }
    }

    pub fn from_label(label: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.as_str() == label)
    }

    /// BUY_SIGNAL is a pure function of the action.
    pub fn is_buy_signal(self) -> bool {
        matches!(self, Action::Buy | Action::StrongBuy)
    }

    /// SELL_SIGNAL is a pure function of the action.
    pub fn is_sell_signal(self) -> bool {
        self == Action::ReviewSell
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one record. Reason fields are pipe-style
/// free text (`" / "`-joined check identifiers); signals are derived
/// from the action, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason_buy: String,
    pub reason_sell: String,
    pub failed_checks: String,
}

impl Decision {
    pub fn buy_signal(&self) -> bool {
        self.action.is_buy_signal()
    }

    pub fn sell_signal(&self) -> bool {
        self.action.is_sell_signal()
    }
}
