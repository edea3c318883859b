//! Ownership grouped by stakeholder kind, for pie charts and summaries.

use serde::Serialize;

use captable_types::{Stakeholder, StakeholderKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindShare {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: StakeholderKind,
    /// Summed ownership percent of every stakeholder of this kind.
    pub ownership: f64,
    pub shares: f64,
    pub investment: f64,
}

/// Sum rows per kind. Buckets appear in the order their kind first shows up.
#[must_use]
pub fn ownership_by_kind(stakeholders: &[Stakeholder]) -> Vec<KindShare> {
    let mut buckets: Vec<KindShare> = Vec::with_capacity(StakeholderKind::ALL.len());
    for row in stakeholders {
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.kind == row.kind) {
            bucket.ownership += row.ownership;
            bucket.shares += row.shares;
            bucket.investment += row.investment;
        } else {
            buckets.push(KindShare {
                name: row.kind.group_label(),
                kind: row.kind,
                ownership: row.ownership,
                shares: row.shares,
                investment: row.investment,
            });
        }
    }
    buckets
}
