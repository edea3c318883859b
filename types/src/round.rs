use serde::{Deserialize, Serialize};

use crate::RoundId;
use crate::validation::{ValidationError, require_name, require_positive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestor {
    pub name: String,
    pub investment: f64,
}

impl NewInvestor {
    #[must_use]
    pub fn new(name: impl Into<String>, investment: f64) -> Self {
        Self {
            name: name.into(),
            investment,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("investor name", &self.name)?;
        require_positive("investor investment", self.investment)
    }
}

/// A priced round that has not been committed yet.
///
/// Carries only what is needed to price it, which is what a live preview has
/// before investors are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundCandidate {
    pub name: String,
    pub pre_money_valuation: f64,
    pub investment: f64,
}

impl RoundCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, pre_money_valuation: f64, investment: f64) -> Self {
        Self {
            name: name.into(),
            pre_money_valuation,
            investment,
        }
    }

    #[must_use]
    pub fn post_money_valuation(&self) -> f64 {
        self.pre_money_valuation + self.investment
    }
}

/// Terms of a priced round as entered, before it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTerms {
    pub name: String,
    pub pre_money_valuation: f64,
    pub investment: f64,
    #[serde(default)]
    pub new_investors: Vec<NewInvestor>,
}

impl RoundTerms {
    #[must_use]
    pub fn new(name: impl Into<String>, pre_money_valuation: f64, investment: f64) -> Self {
        Self {
            name: name.into(),
            pre_money_valuation,
            investment,
            new_investors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_investor(mut self, name: impl Into<String>, investment: f64) -> Self {
        self.new_investors.push(NewInvestor::new(name, investment));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_round(
            &self.name,
            self.pre_money_valuation,
            self.investment,
            &self.new_investors,
        )
    }
}

/// A committed priced round. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRound {
    #[serde(default = "RoundId::generate")]
    pub id: RoundId,
    pub name: String,
    pub pre_money_valuation: f64,
    pub investment: f64,
    #[serde(default)]
    pub new_investors: Vec<NewInvestor>,
}

impl PricingRound {
    #[must_use]
    pub fn from_terms(terms: RoundTerms) -> Self {
        Self {
            id: RoundId::generate(),
            name: terms.name,
            pre_money_valuation: terms.pre_money_valuation,
            investment: terms.investment,
            new_investors: terms.new_investors,
        }
    }

    #[must_use]
    pub fn post_money_valuation(&self) -> f64 {
        self.pre_money_valuation + self.investment
    }

    #[must_use]
    pub fn candidate(&self) -> RoundCandidate {
        RoundCandidate::new(self.name.clone(), self.pre_money_valuation, self.investment)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_round(
            &self.name,
            self.pre_money_valuation,
            self.investment,
            &self.new_investors,
        )
    }
}

fn validate_round(
    name: &str,
    pre_money_valuation: f64,
    investment: f64,
    new_investors: &[NewInvestor],
) -> Result<(), ValidationError> {
    require_name("round name", name)?;
    require_positive("pre-money valuation", pre_money_valuation)?;
    require_positive("investment", investment)?;
    new_investors.iter().try_for_each(NewInvestor::validate)
}
