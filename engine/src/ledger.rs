//! Name-keyed stakeholder accumulation.

use std::collections::HashMap;

use captable_types::{FOUNDERS_STAKEHOLDER, Stakeholder, StakeholderKind};

/// Insertion-ordered accumulator of shares and money per stakeholder name.
///
/// The same name showing up in several SAFEs or rounds collapses into one
/// row. The row keeps the kind it was first credited with.
#[derive(Debug, Clone, Default)]
pub struct StakeholderLedger {
    entries: Vec<Stakeholder>,
    index: HashMap<String, usize>,
}

impl StakeholderLedger {
    /// A ledger holding only the founders' entry.
    #[must_use]
    pub fn with_founders(shares: f64) -> Self {
        let mut ledger = Self::default();
        ledger.credit(FOUNDERS_STAKEHOLDER, StakeholderKind::Founder, shares, 0.0);
        ledger
    }

    pub fn credit(&mut self, name: &str, kind: StakeholderKind, shares: f64, investment: f64) {
        if let Some(&slot) = self.index.get(name) {
            let entry = &mut self.entries[slot];
            entry.shares += shares;
            entry.investment += investment;
            return;
        }

        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Stakeholder {
            name: name.to_string(),
            shares,
            ownership: 0.0,
            investment,
            kind,
        });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Stakeholder> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in order of first appearance. Ownership is left at zero.
    #[must_use]
    pub fn into_stakeholders(self) -> Vec<Stakeholder> {
        self.entries
    }
}
