use serde::{Deserialize, Serialize};

use crate::SafeId;
use crate::validation::{ValidationError, require_discount, require_name, require_positive};

/// Terms of a SAFE as entered, before it is recorded in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeTerms {
    pub investor_name: String,
    pub amount: f64,
    /// Discount in percent, `0..=50`.
    pub discount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_cap: Option<f64>,
}

impl SafeTerms {
    #[must_use]
    pub fn new(investor_name: impl Into<String>, amount: f64, discount: f64) -> Self {
        Self {
            investor_name: investor_name.into(),
            amount,
            discount,
            valuation_cap: None,
        }
    }

    #[must_use]
    pub fn with_cap(mut self, valuation_cap: f64) -> Self {
        self.valuation_cap = Some(valuation_cap);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("investor name", &self.investor_name)?;
        require_positive("amount", self.amount)?;
        require_discount(self.discount)?;
        if let Some(cap) = self.valuation_cap {
            require_positive("valuation cap", cap)?;
        }
        Ok(())
    }
}

/// A recorded SAFE.
///
/// `converted` flips to true once any priced round has been committed after
/// it. Only converted SAFEs contribute shares to the cap table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeInvestment {
    #[serde(default = "SafeId::generate")]
    pub id: SafeId,
    pub investor_name: String,
    pub amount: f64,
    pub discount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_cap: Option<f64>,
    #[serde(default)]
    pub converted: bool,
}

impl SafeInvestment {
    /// Record new terms under a fresh id, not yet converted.
    #[must_use]
    pub fn from_terms(terms: SafeTerms) -> Self {
        Self {
            id: SafeId::generate(),
            investor_name: terms.investor_name,
            amount: terms.amount,
            discount: terms.discount,
            valuation_cap: terms.valuation_cap,
            converted: false,
        }
    }

    #[must_use]
    pub fn converted(mut self) -> Self {
        self.converted = true;
        self
    }

    #[must_use]
    pub fn terms(&self) -> SafeTerms {
        SafeTerms {
            investor_name: self.investor_name.clone(),
            amount: self.amount,
            discount: self.discount,
            valuation_cap: self.valuation_cap,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.terms().validate()
    }
}
