//! Cap table engine for captable.
//!
//! Given a company, its SAFEs and an ordered list of priced rounds, derive
//! share counts, ownership percentages, price per share and the founders'
//! dilution over time. Everything here is a pure, synchronous function of
//! its arguments: no IO, no hidden state, identical inputs give identical
//! outputs.
//!
//! ```text
//! compute_cap_table(company, safes, rounds)
//!     |
//!     +-- for each round: RoundPricing::price(running total, safes, round)
//!     |       SAFE conversions -> StakeholderLedger (kind = safe)
//!     |       new investors    -> StakeholderLedger (kind = investor)
//!     |
//!     +-- ownership = shares / total * 100, renormalized to 100
//!     +-- ownership_by_kind (chart buckets)
//!     +-- dilution_trajectory (same pricing, separate running total)
//! ```
//!
//! The engine does not validate. Zero share counts, negative effective
//! pre-money and non-finite amounts flow through as `NaN`/`inf` results;
//! validate with [`captable_types::Scenario::validate`] before calling.

mod cap_table;
mod chart;
mod conversion;
mod dilution;
mod ledger;
mod preview;

pub use cap_table::{
    CapTableOutcome, CapTableResult, RENORMALIZATION_TOLERANCE, compute_cap_table,
    compute_scenario,
};
pub use chart::{KindShare, ownership_by_kind};
pub use conversion::{RoundPricing, SafeConversion, SafeSelection, conversion_price};
pub use dilution::{DilutionPoint, INITIAL_POINT_LABEL, dilution_trajectory};
pub use ledger::StakeholderLedger;
pub use preview::{RoundPreview, preview_round};
