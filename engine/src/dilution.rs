//! Founder ownership after each priced round.

use serde::Serialize;

use captable_types::{Company, PricingRound, SafeInvestment};

use crate::conversion::{RoundPricing, SafeSelection};

/// Label of the point before any round.
pub const INITIAL_POINT_LABEL: &str = "Initial";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DilutionPoint {
    pub round: String,
    /// Founder shares over the running total, in percent. Not renormalized.
    pub founder_ownership: f64,
}

/// Founder ownership at time zero and immediately after every round.
///
/// Runs its own share count, seeded at `company.total_shares`, through the
/// same pricing step as the main pass.
#[must_use]
pub fn dilution_trajectory(
    company: &Company,
    safes: &[SafeInvestment],
    pricing_rounds: &[PricingRound],
) -> Vec<DilutionPoint> {
    let founders_shares = company.founders_shares as f64;
    let mut running_shares = company.total_shares as f64;

    let mut points = Vec::with_capacity(pricing_rounds.len() + 1);
    points.push(DilutionPoint {
        round: INITIAL_POINT_LABEL.to_string(),
        founder_ownership: company.initial_founder_ownership(),
    });

    for round in pricing_rounds {
        let pricing = RoundPricing::price(
            running_shares,
            safes,
            round.pre_money_valuation,
            round.investment,
            SafeSelection::ConvertedOnly,
        );
        running_shares = pricing.shares_after();
        points.push(DilutionPoint {
            round: round.name.clone(),
            founder_ownership: founders_shares / running_shares * 100.0,
        });
    }

    points
}
