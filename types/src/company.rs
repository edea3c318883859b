use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, require_name, require_positive, require_shares};

/// The company as it stands before any financing.
///
/// `total_shares` is the share count at time zero. Anything above
/// `founders_shares` (an option pool, early employees) is outstanding but not
/// tracked as a stakeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub founders_shares: u64,
    pub total_shares: u64,
    pub initial_valuation: f64,
}

impl Company {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        founders_shares: u64,
        total_shares: u64,
        initial_valuation: f64,
    ) -> Self {
        Self {
            name: name.into(),
            founders_shares,
            total_shares,
            initial_valuation,
        }
    }

    /// Founder ownership at time zero, in percent.
    #[must_use]
    pub fn initial_founder_ownership(&self) -> f64 {
        self.founders_shares as f64 / self.total_shares as f64 * 100.0
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("company name", &self.name)?;
        require_shares("founder shares", self.founders_shares)?;
        require_shares("total shares", self.total_shares)?;
        if self.founders_shares > self.total_shares {
            return Err(ValidationError::FoundersExceedTotal {
                founders: self.founders_shares,
                total: self.total_shares,
            });
        }
        require_positive("initial valuation", self.initial_valuation)
    }
}
