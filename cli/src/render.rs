//! Text and JSON rendering of reports.

use std::fmt::Write;
use std::iter;

use serde::Serialize;

use captable_config::DisplaySettings;
use captable_engine::{CapTableOutcome, CapTableResult, DilutionPoint, RoundPreview};
use captable_types::{Company, RoundCandidate, Scenario};

const NO_ROUNDS_NOTICE: &str = "No pricing rounds yet. Add a pricing round to see ownership \
calculations and dilution analysis.";

/// Round to a whole number and group digits by thousands.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub struct Renderer<'a> {
    settings: &'a DisplaySettings,
}

impl<'a> Renderer<'a> {
    pub fn new(settings: &'a DisplaySettings) -> Self {
        Self { settings }
    }

    pub fn money(&self, value: f64) -> String {
        let symbol = &self.settings.currency_symbol;
        if value.is_finite() && value < 0.0 {
            format!("-{symbol}{}", group_thousands(-value))
        } else {
            format!("{symbol}{}", group_thousands(value))
        }
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{value:.prec$}%", prec = self.settings.percent_decimals)
    }

    /// Share price, which is usually well below one currency unit.
    pub fn price(&self, value: f64) -> String {
        format!("{}{value:.4}", self.settings.currency_symbol)
    }

    pub fn report(&self, scenario: &Scenario, outcome: &CapTableOutcome) -> String {
        let mut out = String::new();
        self.write_header(&mut out, scenario);

        let Some(table) = outcome.computed() else {
            out.push('\n');
            out.push_str(NO_ROUNDS_NOTICE);
            out.push('\n');
            return out;
        };

        out.push('\n');
        self.write_summary(&mut out, table);
        out.push('\n');
        self.write_stakeholders(&mut out, table);
        out.push('\n');
        self.write_kinds(&mut out, table);
        out.push('\n');
        write_dilution(&mut out, &table.dilution);
        out
    }

    pub fn preview(
        &self,
        company: &Company,
        candidate: &RoundCandidate,
        preview: &RoundPreview,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Preview: {}", candidate.name);
        let rows = [
            ("Pre-money price/share", self.price(preview.pre_money_price_per_share)),
            ("Post-money price/share", self.price(preview.post_money_price_per_share)),
            ("Post-money valuation", self.money(preview.post_money_valuation)),
            ("New shares", group_thousands(preview.new_shares)),
            ("SAFE shares", group_thousands(preview.safe_shares)),
            ("Total shares after", group_thousands(preview.total_shares_after)),
        ]
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value])
        .collect::<Vec<_>>();
        write_table(&mut out, &[], &rows, &[false, true]);

        out.push('\n');
        out.push_str("Resulting ownership\n");
        let mut split = vec![vec![
            "Founders".to_string(),
            self.percent(preview.founder_ownership),
        ]];
        if preview.safe_ownership > 0.0 {
            split.push(vec!["SAFE".to_string(), self.percent(preview.safe_ownership)]);
        }
        split.push(vec![
            "New investors".to_string(),
            self.percent(preview.new_investor_ownership),
        ]);
        write_table(&mut out, &[], &split, &[false, true]);

        let _ = writeln!(
            out,
            "\nPriced against {}'s initial {} shares; nothing was recorded.",
            company.name,
            group_thousands(company.total_shares as f64)
        );
        out
    }

    fn write_header(&self, out: &mut String, scenario: &Scenario) {
        let company = &scenario.company;
        let _ = writeln!(out, "{}", company.name);
        let _ = writeln!(
            out,
            "Initial valuation: {} | Founder shares: {}",
            self.money(company.initial_valuation),
            group_thousands(company.founders_shares as f64)
        );
        let _ = writeln!(
            out,
            "SAFE rounds: {} | Pricing rounds: {} | Total raised: {}",
            scenario.safe_count(),
            scenario.round_count(),
            self.money(scenario.total_raised())
        );
    }

    fn write_summary(&self, out: &mut String, table: &CapTableResult) {
        out.push_str("Summary\n");
        let rows = vec![
            vec!["Total shares".to_string(), group_thousands(table.total_shares)],
            vec!["Current valuation".to_string(), self.money(table.current_valuation)],
            vec!["Total investment".to_string(), self.money(table.total_investment)],
        ];
        write_table(out, &[], &rows, &[false, true]);
    }

    fn write_stakeholders(&self, out: &mut String, table: &CapTableResult) {
        out.push_str("Stakeholders\n");
        let rows: Vec<Vec<String>> = table
            .stakeholders
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.kind.label().to_string(),
                    group_thousands(row.shares),
                    self.percent(row.ownership),
                    self.money(row.investment),
                ]
            })
            .collect();
        write_table(
            out,
            &["Stakeholder", "Type", "Shares", "Ownership", "Investment"],
            &rows,
            &[false, false, true, true, true],
        );
    }

    fn write_kinds(&self, out: &mut String, table: &CapTableResult) {
        out.push_str("Ownership by type\n");
        let rows: Vec<Vec<String>> = table
            .ownership_by_kind
            .iter()
            .map(|bucket| {
                vec![
                    bucket.name.to_string(),
                    self.percent(bucket.ownership),
                    group_thousands(bucket.shares),
                    self.money(bucket.investment),
                ]
            })
            .collect();
        write_table(
            out,
            &["Group", "Ownership", "Shares", "Investment"],
            &rows,
            &[false, true, true, true],
        );
    }
}

/// Founder ownership per round, one decimal place.
fn write_dilution(out: &mut String, points: &[DilutionPoint]) {
    out.push_str("Founder dilution\n");
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|point| vec![point.round.clone(), format!("{:.1}%", point.founder_ownership)])
        .collect();
    write_table(out, &["Round", "Founder ownership"], &rows, &[false, true]);
}

/// Two-space indented columns, two spaces apart, trailing blanks trimmed.
fn write_table(out: &mut String, headers: &[&str], rows: &[Vec<String>], right_align: &[bool]) {
    let columns = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0; columns];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = widths[i].max(header.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    if !headers.is_empty() {
        push_row(out, headers.iter().copied(), &widths, right_align);
    }
    for row in rows {
        push_row(out, row.iter().map(String::as_str), &widths, right_align);
    }
}

fn push_row<'c>(
    out: &mut String,
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
    right_align: &[bool],
) {
    let mut line = String::from("  ");
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = widths[i].saturating_sub(cell.chars().count());
        if right_align.get(i).copied().unwrap_or(false) {
            line.extend(iter::repeat_n(' ', pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.extend(iter::repeat_n(' ', pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[derive(Serialize)]
struct ReportJson<'a> {
    company: &'a Company,
    safe_rounds: usize,
    pricing_rounds: usize,
    total_raised: f64,
    status: &'static str,
    table: &'a CapTableResult,
}

pub fn report_json(scenario: &Scenario, outcome: &CapTableOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportJson {
        company: &scenario.company,
        safe_rounds: scenario.safe_count(),
        pricing_rounds: scenario.round_count(),
        total_raised: scenario.total_raised(),
        status: outcome.status(),
        table: outcome.table(),
    })
}

#[derive(Serialize)]
struct PreviewJson<'a> {
    round: &'a RoundCandidate,
    preview: &'a RoundPreview,
}

pub fn preview_json(
    candidate: &RoundCandidate,
    preview: &RoundPreview,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PreviewJson {
        round: candidate,
        preview,
    })
}
