//! Shared test utilities and fixtures

#![allow(dead_code)]

use captable_types::{Company, RoundTerms, SafeTerms, Scenario};

pub const TOLERANCE: f64 = 1e-6;

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// 8M founder shares out of 10M, valued at $2M before any financing.
pub fn seed_company() -> Company {
    Company::new("Acme Robotics", 8_000_000, 10_000_000, 2_000_000.0)
}

/// One capped SAFE converted by a single Series A.
pub fn series_a_scenario() -> Scenario {
    let mut scenario = Scenario::new(seed_company());
    scenario.add_safe(SafeTerms::new("Angel Syndicate", 250_000.0, 20.0).with_cap(5_000_000.0));
    scenario.add_pricing_round(
        RoundTerms::new("Series A", 8_000_000.0, 2_000_000.0).with_investor("VC Fund", 2_000_000.0),
    );
    scenario
}
