//! Live numbers for a round that has not been committed.

use serde::Serialize;
use tracing::debug;

use captable_types::{Company, RoundCandidate, SafeInvestment};

use crate::conversion::{RoundPricing, SafeSelection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundPreview {
    pub pre_money_price_per_share: f64,
    pub post_money_price_per_share: f64,
    pub post_money_valuation: f64,
    pub new_shares: f64,
    pub safe_shares: f64,
    pub total_shares_after: f64,
    pub founder_ownership: f64,
    pub safe_ownership: f64,
    pub new_investor_ownership: f64,
}

/// Price `candidate` against the company's starting share count.
///
/// Every listed SAFE converts, since committing the round would mark them
/// all converted. Nothing is recorded; the caller's lists are untouched.
#[must_use]
pub fn preview_round(
    company: &Company,
    safes: &[SafeInvestment],
    candidate: &RoundCandidate,
) -> RoundPreview {
    let pricing = RoundPricing::price(
        company.total_shares as f64,
        safes,
        candidate.pre_money_valuation,
        candidate.investment,
        SafeSelection::All,
    );

    let total_shares_after = pricing.shares_after();
    let post_money_valuation = candidate.post_money_valuation();

    debug!(
        round = %candidate.name,
        price_per_share = pricing.price_per_share,
        new_shares = pricing.new_shares,
        safe_shares = pricing.safe_shares,
        "Previewed pricing round"
    );

    RoundPreview {
        pre_money_price_per_share: pricing.price_per_share,
        post_money_price_per_share: post_money_valuation / total_shares_after,
        post_money_valuation,
        new_shares: pricing.new_shares,
        safe_shares: pricing.safe_shares,
        total_shares_after,
        founder_ownership: company.founders_shares as f64 / total_shares_after * 100.0,
        safe_ownership: pricing.safe_shares / total_shares_after * 100.0,
        new_investor_ownership: pricing.new_shares / total_shares_after * 100.0,
    }
}
