//! A full financing scenario: company, SAFEs and priced rounds.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;
use crate::{Company, PricingRound, RoundId, RoundTerms, SafeId, SafeInvestment, SafeTerms};

/// Everything the engine needs, as plain data.
///
/// `pricing_rounds` is kept in commitment order; that order is significant.
/// The order of `safes` only affects display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub company: Company,
    #[serde(default)]
    pub safes: Vec<SafeInvestment>,
    #[serde(default)]
    pub pricing_rounds: Vec<PricingRound>,
}

impl Scenario {
    #[must_use]
    pub fn new(company: Company) -> Self {
        Self {
            company,
            safes: Vec::new(),
            pricing_rounds: Vec::new(),
        }
    }

    /// Record a SAFE. It stays unconverted until the next priced round.
    pub fn add_safe(&mut self, terms: SafeTerms) -> SafeId {
        let safe = SafeInvestment::from_terms(terms);
        let id = safe.id;
        self.safes.push(safe);
        id
    }

    /// Commit a priced round. Every SAFE on the books converts.
    pub fn add_pricing_round(&mut self, terms: RoundTerms) -> RoundId {
        let round = PricingRound::from_terms(terms);
        let id = round.id;
        self.pricing_rounds.push(round);
        for safe in &mut self.safes {
            safe.converted = true;
        }
        id
    }

    #[must_use]
    pub fn safe_count(&self) -> usize {
        self.safes.len()
    }

    #[must_use]
    pub fn round_count(&self) -> usize {
        self.pricing_rounds.len()
    }

    /// SAFE money plus priced-round money, each counted once.
    #[must_use]
    pub fn total_raised(&self) -> f64 {
        let safe_total: f64 = self.safes.iter().map(|safe| safe.amount).sum();
        let round_total: f64 = self.pricing_rounds.iter().map(|round| round.investment).sum();
        safe_total + round_total
    }

    /// Check the whole scenario against the input contract.
    ///
    /// Errors on SAFEs and rounds carry their 1-based position so a caller can
    /// point at the offending entry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.company.validate()?;
        for (index, safe) in self.safes.iter().enumerate() {
            safe.validate().map_err(|source| ValidationError::Safe {
                index: index + 1,
                investor: safe.investor_name.clone(),
                source: Box::new(source),
            })?;
        }
        for (index, round) in self.pricing_rounds.iter().enumerate() {
            round.validate().map_err(|source| ValidationError::Round {
                index: index + 1,
                round: round.name.clone(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}
