//! Core domain types for captable.
//!
//! This crate contains the plain data a scenario is made of: the company at
//! time zero, the SAFEs raised before pricing, and the priced rounds in the
//! order they were committed. There is no IO and no async here; everything
//! can be used from any layer of the application.
//!
//! Validation lives next to the types but is never applied implicitly.
//! The engine consumes whatever it is given, so callers that build values
//! from user input are expected to run [`Scenario::validate`] (or the
//! per-type `validate` methods) first.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod company;
mod ids;
mod round;
mod safe;
mod scenario;
mod stakeholder;
mod validation;

pub use company::Company;
pub use ids::{RoundId, SafeId};
pub use round::{NewInvestor, PricingRound, RoundCandidate, RoundTerms};
pub use safe::{SafeInvestment, SafeTerms};
pub use scenario::Scenario;
pub use stakeholder::{FOUNDERS_STAKEHOLDER, Stakeholder, StakeholderKind};
pub use validation::{MAX_SAFE_DISCOUNT, ValidationError};
