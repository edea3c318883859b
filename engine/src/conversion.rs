//! SAFE conversion and round pricing.
//!
//! One pricing step is shared by the main pass, the dilution trajectory and
//! the single-round preview, so the three can never disagree on a number.

use captable_types::SafeInvestment;

/// Which SAFEs take part in a pricing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSelection {
    /// Only SAFEs whose `converted` flag is set. Used for committed rounds.
    ConvertedOnly,
    /// Every SAFE. Used when previewing a round that would convert them all.
    All,
}

impl SafeSelection {
    fn includes(self, safe: &SafeInvestment) -> bool {
        match self {
            Self::ConvertedOnly => safe.converted,
            Self::All => true,
        }
    }
}

/// The cap as a valuation, if it bounds the conversion at all.
///
/// A zero or NaN cap reads as "no cap".
fn effective_cap(safe: &SafeInvestment) -> Option<f64> {
    safe.valuation_cap.filter(|cap| *cap != 0.0 && !cap.is_nan())
}

/// Valuation at which `safe` converts in a round priced at `pre_money`.
///
/// The lower of the discounted pre-money and the valuation cap. A NaN
/// discount price stays NaN rather than silently yielding the cap.
#[must_use]
pub fn conversion_price(safe: &SafeInvestment, pre_money: f64) -> f64 {
    let discount_price = pre_money * (1.0 - safe.discount / 100.0);
    match effective_cap(safe) {
        Some(cap) if cap < discount_price => cap,
        _ => discount_price,
    }
}

/// Shares issued to one SAFE in one pricing step.
#[derive(Debug, Clone, Copy)]
pub struct SafeConversion<'a> {
    pub safe: &'a SafeInvestment,
    pub conversion_price: f64,
    /// `conversion_price` spread over the pre-round share count.
    pub share_price: f64,
    pub shares: f64,
}

/// Everything one priced round does to the share count.
#[derive(Debug, Clone)]
pub struct RoundPricing<'a> {
    pub shares_before: f64,
    pub conversions: Vec<SafeConversion<'a>>,
    pub safe_shares: f64,
    /// Sum of every SAFE's amount, converted or not.
    pub safe_money: f64,
    /// Pre-money with SAFE money backed out. May go negative.
    pub effective_pre_money: f64,
    pub price_per_share: f64,
    /// Shares issued to the round's new money, all investors combined.
    pub new_shares: f64,
}

impl<'a> RoundPricing<'a> {
    /// Price a round against a running share count.
    ///
    /// SAFE money is subtracted from pre-money for every SAFE listed, even
    /// the ones `selection` excludes from conversion.
    #[must_use]
    pub fn price(
        shares_before: f64,
        safes: &'a [SafeInvestment],
        pre_money: f64,
        investment: f64,
        selection: SafeSelection,
    ) -> Self {
        let safe_money = safes.iter().fold(0.0, |sum, safe| sum + safe.amount);

        let mut safe_shares = 0.0;
        let conversions: Vec<SafeConversion<'a>> = safes
            .iter()
            .filter(|safe| selection.includes(safe))
            .map(|safe| {
                let conversion_price = conversion_price(safe, pre_money);
                let share_price = conversion_price / shares_before;
                let shares = safe.amount / share_price;
                safe_shares += shares;
                SafeConversion {
                    safe,
                    conversion_price,
                    share_price,
                    shares,
                }
            })
            .collect();

        let effective_pre_money = pre_money - safe_money;
        let price_per_share = effective_pre_money / shares_before;
        let new_shares = investment / price_per_share;

        Self {
            shares_before,
            conversions,
            safe_shares,
            safe_money,
            effective_pre_money,
            price_per_share,
            new_shares,
        }
    }

    /// Shares issued to a single investor putting in `investment`.
    #[must_use]
    pub fn investor_shares(&self, investment: f64) -> f64 {
        investment / self.price_per_share
    }

    #[must_use]
    pub fn shares_after(&self) -> f64 {
        self.shares_before + (self.safe_shares + self.new_shares)
    }

    /// False when the price per share is non-finite or not positive.
    #[must_use]
    pub fn is_well_priced(&self) -> bool {
        self.price_per_share.is_finite() && self.price_per_share > 0.0
    }
}
