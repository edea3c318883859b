//! The main pass: every priced round applied in order to a running total.

use serde::Serialize;
use tracing::{debug, warn};

use captable_types::{
    Company, PricingRound, SafeInvestment, Scenario, Stakeholder, StakeholderKind,
};

use crate::chart::{KindShare, ownership_by_kind};
use crate::conversion::{RoundPricing, SafeSelection};
use crate::dilution::{DilutionPoint, dilution_trajectory};
use crate::ledger::StakeholderLedger;

/// Ownership percentages are rescaled when their sum drifts further than
/// this from 100.
pub const RENORMALIZATION_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapTableResult {
    /// Sorted by ownership, largest first. Ties keep first-appearance order.
    pub stakeholders: Vec<Stakeholder>,
    pub ownership_by_kind: Vec<KindShare>,
    pub dilution: Vec<DilutionPoint>,
    pub total_shares: f64,
    pub current_valuation: f64,
    pub total_investment: f64,
}

impl CapTableResult {
    #[must_use]
    pub fn stakeholder(&self, name: &str) -> Option<&Stakeholder> {
        self.stakeholders.iter().find(|row| row.name == name)
    }

    /// The founders' row. Every table [`compute_cap_table`] builds has one;
    /// `None` only for a hand-assembled result.
    #[must_use]
    pub fn founders(&self) -> Option<&Stakeholder> {
        self.stakeholders
            .iter()
            .find(|row| row.kind == StakeholderKind::Founder)
    }

    #[must_use]
    pub fn ownership_sum(&self) -> f64 {
        self.stakeholders.iter().map(|row| row.ownership).sum()
    }
}

/// Result of [`compute_cap_table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "table", rename_all = "snake_case")]
pub enum CapTableOutcome {
    /// No priced round yet, so there is nothing to show. Carries the
    /// zero-round baseline for callers that want it anyway.
    InsufficientData(CapTableResult),
    Computed(CapTableResult),
}

impl CapTableOutcome {
    #[must_use]
    pub fn computed(&self) -> Option<&CapTableResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::InsufficientData(_) => None,
        }
    }

    #[must_use]
    pub fn table(&self) -> &CapTableResult {
        match self {
            Self::Computed(result) | Self::InsufficientData(result) => result,
        }
    }

    #[must_use]
    pub fn into_table(self) -> CapTableResult {
        match self {
            Self::Computed(result) | Self::InsufficientData(result) => result,
        }
    }

    #[must_use]
    pub const fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }

    /// Same tag the outcome serializes under.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Computed(_) => "computed",
            Self::InsufficientData(_) => "insufficient_data",
        }
    }
}

/// Derive the cap table for `company` after `pricing_rounds`, in order.
///
/// Converted SAFEs take shares in every round, priced against the share
/// count left by the previous round. Every SAFE's money is backed out of
/// pre-money whether or not it converted.
#[must_use]
pub fn compute_cap_table(
    company: &Company,
    safes: &[SafeInvestment],
    pricing_rounds: &[PricingRound],
) -> CapTableOutcome {
    let mut total_shares = company.total_shares as f64;
    let mut ledger = StakeholderLedger::with_founders(company.founders_shares as f64);

    for round in pricing_rounds {
        let pricing = RoundPricing::price(
            total_shares,
            safes,
            round.pre_money_valuation,
            round.investment,
            SafeSelection::ConvertedOnly,
        );

        for conversion in &pricing.conversions {
            ledger.credit(
                &conversion.safe.investor_name,
                StakeholderKind::Safe,
                conversion.shares,
                conversion.safe.amount,
            );
        }
        for investor in &round.new_investors {
            ledger.credit(
                &investor.name,
                StakeholderKind::Investor,
                pricing.investor_shares(investor.investment),
                investor.investment,
            );
        }

        if !pricing.is_well_priced() {
            warn!(
                round = %round.name,
                effective_pre_money = pricing.effective_pre_money,
                price_per_share = pricing.price_per_share,
                "Round priced to a non-positive or non-finite share price"
            );
        }
        debug!(
            round = %round.name,
            shares_before = pricing.shares_before,
            safe_shares = pricing.safe_shares,
            new_shares = pricing.new_shares,
            price_per_share = pricing.price_per_share,
            "Applied pricing round"
        );

        total_shares = pricing.shares_after();
    }

    let mut stakeholders = ledger.into_stakeholders();
    assign_ownership(&mut stakeholders, total_shares);
    let ownership_by_kind = ownership_by_kind(&stakeholders);
    stakeholders.sort_by(|a, b| b.ownership.total_cmp(&a.ownership));

    let current_valuation = pricing_rounds
        .last()
        .map_or(company.initial_valuation, PricingRound::post_money_valuation);
    let safe_total = safes.iter().fold(0.0, |sum, safe| sum + safe.amount);
    let round_total = pricing_rounds
        .iter()
        .fold(0.0, |sum, round| sum + round.investment);

    let result = CapTableResult {
        stakeholders,
        ownership_by_kind,
        dilution: dilution_trajectory(company, safes, pricing_rounds),
        total_shares,
        current_valuation,
        total_investment: safe_total + round_total,
    };

    if pricing_rounds.is_empty() {
        CapTableOutcome::InsufficientData(result)
    } else {
        CapTableOutcome::Computed(result)
    }
}

#[must_use]
pub fn compute_scenario(scenario: &Scenario) -> CapTableOutcome {
    compute_cap_table(
        &scenario.company,
        &scenario.safes,
        &scenario.pricing_rounds,
    )
}

fn assign_ownership(stakeholders: &mut [Stakeholder], total_shares: f64) {
    for row in stakeholders.iter_mut() {
        row.ownership = row.shares / total_shares * 100.0;
    }

    let sum = stakeholders.iter().fold(0.0, |sum, row| sum + row.ownership);
    if (sum - 100.0).abs() > RENORMALIZATION_TOLERANCE {
        let scale = 100.0 / sum;
        debug!(sum, scale, "Renormalizing ownership");
        for row in stakeholders.iter_mut() {
            row.ownership *= scale;
        }
    }
}
