use std::fmt;

use serde::{Deserialize, Serialize};

/// Ledger name of the founders' entry.
pub const FOUNDERS_STAKEHOLDER: &str = "Founders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeholderKind {
    Founder,
    Safe,
    Investor,
}

impl StakeholderKind {
    pub const ALL: [StakeholderKind; 3] = [Self::Founder, Self::Safe, Self::Investor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Safe => "safe",
            Self::Investor => "investor",
        }
    }

    /// Short badge used in per-stakeholder tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Founder => "Founder",
            Self::Safe => "SAFE",
            Self::Investor => "Equity",
        }
    }

    /// Name of the aggregate bucket when ownership is grouped by kind.
    #[must_use]
    pub const fn group_label(self) -> &'static str {
        match self {
            Self::Founder => "Founders",
            Self::Safe => "SAFE Investors",
            Self::Investor => "Equity Investors",
        }
    }
}

impl fmt::Display for StakeholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A derived cap table row. Rebuilt on every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub name: String,
    pub shares: f64,
    /// Percent of the fully diluted total, after renormalization.
    pub ownership: f64,
    pub investment: f64,
    #[serde(rename = "type")]
    pub kind: StakeholderKind,
}
