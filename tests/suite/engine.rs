//! End-to-end behavior of the cap table engine over whole scenarios.

use captable_engine::{
    CapTableOutcome, INITIAL_POINT_LABEL, RoundPricing, SafeSelection, compute_cap_table,
    compute_scenario, conversion_price, preview_round,
};
use captable_types::{
    Company, PricingRound, RoundCandidate, RoundTerms, SafeInvestment, SafeTerms, Scenario,
    StakeholderKind,
};

use crate::common::{TOLERANCE, assert_close, seed_company, series_a_scenario};

#[test]
fn series_a_converts_safe_and_dilutes_founders() {
    let scenario = series_a_scenario();
    let outcome = compute_scenario(&scenario);
    let CapTableOutcome::Computed(table) = &outcome else {
        panic!("expected a computed table, got {outcome:?}");
    };

    // 10M + 500k SAFE shares + 2M / 0.775 new shares.
    assert_close(table.total_shares, 13_080_645.161_290_32, TOLERANCE);
    assert_close(table.current_valuation, 10_000_000.0, TOLERANCE);
    assert_close(table.total_investment, 2_250_000.0, TOLERANCE);

    let safe = table.stakeholder("Angel Syndicate").expect("SAFE holder");
    assert_eq!(safe.kind, StakeholderKind::Safe);
    assert_close(safe.shares, 500_000.0, TOLERANCE);
    assert_close(safe.investment, 250_000.0, TOLERANCE);

    let vc = table.stakeholder("VC Fund").expect("new investor");
    assert_eq!(vc.kind, StakeholderKind::Investor);
    assert_close(vc.shares, 2_580_645.161_290_32, TOLERANCE);

    let points: Vec<_> = table
        .dilution
        .iter()
        .map(|point| (point.round.as_str(), point.founder_ownership))
        .collect();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, INITIAL_POINT_LABEL);
    assert_close(points[0].1, 80.0, TOLERANCE);
    assert_eq!(points[1].0, "Series A");
    assert_close(points[1].1, 61.159_06, 1e-4);
}

#[test]
fn table_ownership_is_renormalized_over_allocated_shares() {
    let table = compute_scenario(&series_a_scenario()).into_table();

    // The 2M unassigned shares from the company's starting count are
    // rescaled away, so founders read higher here than on the trajectory.
    let founders = table.founders().expect("founders row");
    assert_close(founders.ownership, 72.197_96, 1e-4);
    assert_close(
        table.stakeholder("VC Fund").map_or(0.0, |row| row.ownership),
        23.289_67,
        1e-4,
    );
    assert_close(
        table.stakeholder("Angel Syndicate").map_or(0.0, |row| row.ownership),
        4.512_37,
        1e-4,
    );
    assert_close(table.ownership_sum(), 100.0, 1e-9);

    let names: Vec<_> = table.stakeholders.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["Founders", "VC Fund", "Angel Syndicate"]);
}

#[test]
fn ownership_by_kind_sums_each_group() {
    let mut scenario = series_a_scenario();
    scenario.add_safe(SafeTerms::new("Late Angel", 100_000.0, 10.0));
    scenario.add_pricing_round(
        RoundTerms::new("Series B", 30_000_000.0, 6_000_000.0)
            .with_investor("VC Fund", 2_000_000.0)
            .with_investor("Growth Partners", 4_000_000.0),
    );
    let table = compute_scenario(&scenario).into_table();

    let kinds: Vec<_> = table
        .ownership_by_kind
        .iter()
        .map(|share| (share.name, share.kind))
        .collect();
    assert_eq!(
        kinds,
        [
            ("Founders", StakeholderKind::Founder),
            ("SAFE Investors", StakeholderKind::Safe),
            ("Equity Investors", StakeholderKind::Investor),
        ]
    );

    for share in &table.ownership_by_kind {
        let expected: f64 = table
            .stakeholders
            .iter()
            .filter(|row| row.kind == share.kind)
            .map(|row| row.ownership)
            .sum();
        assert_close(share.ownership, expected, 1e-9);
    }
    let total: f64 = table.ownership_by_kind.iter().map(|share| share.ownership).sum();
    assert_close(total, 100.0, 1e-9);
}

#[test]
fn cap_beats_discount_when_lower() {
    let capped = SafeInvestment::from_terms(
        SafeTerms::new("Capped", 100_000.0, 20.0).with_cap(5_000_000.0),
    );
    assert_close(conversion_price(&capped, 8_000_000.0), 5_000_000.0, TOLERANCE);

    let uncapped = SafeInvestment::from_terms(SafeTerms::new("Uncapped", 100_000.0, 20.0));
    assert_close(conversion_price(&uncapped, 8_000_000.0), 6_400_000.0, TOLERANCE);
    assert_close(conversion_price(&uncapped, 80_000_000.0), 64_000_000.0, TOLERANCE);
}

#[test]
fn repeated_investor_name_accumulates_into_one_row() {
    let company = seed_company();
    let safes = [
        SafeInvestment::from_terms(
            SafeTerms::new("Acme Ventures", 100_000.0, 20.0).with_cap(5_000_000.0),
        )
        .converted(),
        SafeInvestment::from_terms(SafeTerms::new("Acme Ventures", 50_000.0, 0.0)).converted(),
    ];
    let rounds = [PricingRound::from_terms(RoundTerms::new("Seed", 8_000_000.0, 0.0))];

    let pricing = RoundPricing::price(
        company.total_shares as f64,
        &safes,
        8_000_000.0,
        0.0,
        SafeSelection::ConvertedOnly,
    );
    let independent: f64 = pricing.conversions.iter().map(|conv| conv.shares).sum();
    // 100k at 0.5 plus 50k at 0.8.
    assert_close(independent, 262_500.0, TOLERANCE);

    let table = compute_cap_table(&company, &safes, &rounds).into_table();
    let rows: Vec<_> = table
        .stakeholders
        .iter()
        .filter(|row| row.name == "Acme Ventures")
        .collect();
    assert_eq!(rows.len(), 1);
    assert_close(rows[0].investment, 150_000.0, TOLERANCE);
    assert_close(rows[0].shares, independent, TOLERANCE);
}

#[test]
fn founder_ownership_falls_with_every_funded_round() {
    let mut scenario = Scenario::new(seed_company());
    scenario.add_safe(SafeTerms::new("Angel", 200_000.0, 15.0).with_cap(6_000_000.0));
    for (name, pre_money, investment) in [
        ("Seed", 6_000_000.0, 1_500_000.0),
        ("Series A", 20_000_000.0, 5_000_000.0),
        ("Series B", 60_000_000.0, 15_000_000.0),
    ] {
        scenario.add_pricing_round(
            RoundTerms::new(name, pre_money, investment).with_investor("Lead", investment),
        );
    }

    let table = compute_scenario(&scenario).into_table();
    assert_eq!(table.dilution.len(), 4);
    for pair in table.dilution.windows(2) {
        assert!(
            pair[1].founder_ownership < pair[0].founder_ownership,
            "{} did not dilute founders: {:?}",
            pair[1].round,
            pair
        );
    }
}

#[test]
fn zero_investment_round_without_safes_keeps_founders_flat() {
    let mut scenario = Scenario::new(seed_company());
    scenario.add_pricing_round(RoundTerms::new("Bridge", 10_000_000.0, 0.0));

    let table = compute_scenario(&scenario).into_table();
    assert_close(table.dilution[0].founder_ownership, table.dilution[1].founder_ownership, 1e-12);
}

#[test]
fn identical_inputs_give_identical_results() {
    let scenario = series_a_scenario();
    let first = compute_scenario(&scenario);
    let second = compute_scenario(&scenario);
    assert_eq!(first, second);

    let first = serde_json::to_string(&first).expect("serialize");
    let second = serde_json::to_string(&second).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn company_without_rounds_reports_insufficient_data() {
    let mut scenario = Scenario::new(seed_company());
    scenario.add_safe(SafeTerms::new("Angel", 250_000.0, 20.0));

    let outcome = compute_scenario(&scenario);
    assert!(outcome.is_insufficient());
    assert_eq!(outcome.status(), "insufficient_data");

    let baseline = outcome.table();
    assert_eq!(baseline.stakeholders.len(), 1);
    assert_close(baseline.stakeholders[0].ownership, 100.0, 1e-9);
    assert_close(baseline.current_valuation, 2_000_000.0, TOLERANCE);
    assert_close(baseline.total_investment, 250_000.0, TOLERANCE);
    assert_eq!(baseline.dilution.len(), 1);
    assert_close(baseline.dilution[0].founder_ownership, 80.0, TOLERANCE);
}

#[test]
fn unconverted_safe_money_still_lowers_the_round_price() {
    let company = seed_company();
    let safes = [SafeInvestment::from_terms(SafeTerms::new("Pending", 250_000.0, 20.0))];
    let rounds = [PricingRound::from_terms(
        RoundTerms::new("Series A", 8_000_000.0, 2_000_000.0).with_investor("VC Fund", 2_000_000.0),
    )];

    let table = compute_cap_table(&company, &safes, &rounds).into_table();
    assert!(table.stakeholder("Pending").is_none());
    // Price is still 7.75M / 10M even though the SAFE took no shares.
    assert_close(table.total_shares, 12_580_645.161_290_32, TOLERANCE);
    assert_close(table.total_investment, 2_250_000.0, TOLERANCE);
}

#[test]
fn preview_matches_the_committed_round() {
    let company = seed_company();
    let mut scenario = Scenario::new(company.clone());
    scenario.add_safe(SafeTerms::new("Angel Syndicate", 250_000.0, 20.0).with_cap(5_000_000.0));

    let candidate = RoundCandidate::new("Series A", 8_000_000.0, 2_000_000.0);
    let preview = preview_round(&company, &scenario.safes, &candidate);

    scenario.add_pricing_round(
        RoundTerms::new("Series A", 8_000_000.0, 2_000_000.0).with_investor("VC Fund", 2_000_000.0),
    );
    let table = compute_scenario(&scenario).into_table();

    assert_close(preview.total_shares_after, table.total_shares, TOLERANCE);
    assert_close(preview.post_money_price_per_share, 0.764_488_286_066_584_5, 1e-12);
    assert_close(preview.pre_money_price_per_share, 0.775, 1e-12);
    assert_close(
        preview.founder_ownership,
        table.dilution[1].founder_ownership,
        1e-9,
    );
    assert_close(
        preview.founder_ownership + preview.safe_ownership + preview.new_investor_ownership,
        100.0 - 2_000_000.0 / table.total_shares * 100.0,
        1e-9,
    );
}

#[test]
fn preview_does_not_touch_the_scenario() {
    let scenario = series_a_scenario();
    let before = scenario.clone();
    let _ = preview_round(
        &scenario.company,
        &scenario.safes,
        &RoundCandidate::new("Series B", 30_000_000.0, 5_000_000.0),
    );
    assert_eq!(scenario, before);
}

#[test]
fn later_rounds_reconvert_earlier_safes() {
    let company = Company::new("Acme", 1_000_000, 1_000_000, 1_000_000.0);
    let mut scenario = Scenario::new(company);
    scenario.add_safe(SafeTerms::new("Angel", 100_000.0, 0.0));
    scenario.add_pricing_round(RoundTerms::new("Seed", 1_000_000.0, 0.0));
    let after_seed = compute_scenario(&scenario).into_table();

    scenario.add_pricing_round(RoundTerms::new("Series A", 1_000_000.0, 0.0));
    let after_a = compute_scenario(&scenario).into_table();

    let seed_shares = after_seed.stakeholder("Angel").map_or(0.0, |row| row.shares);
    let a_shares = after_a.stakeholder("Angel").map_or(0.0, |row| row.shares);
    assert!(a_shares > seed_shares);
    assert_close(a_shares, 210_000.0, TOLERANCE);
}
