//! Compliance scoring and risk classification.
//!
//! Converts a set of per-control assessment results into a weighted
//! compliance score, a three-tier risk level, per-domain breakdowns, and
//! remediation recommendations. Everything here is a pure function of its
//! inputs: no I/O, no clock, deterministic.
//!
//! Score formula (applied identically overall and per domain):
//!
//! ```text
//! applicable = results where status != not_applicable
//! score = 100 * (implemented + 0.5 * partially_implemented) / applicable
//! ```
//!
//! An empty applicable set scores 0 and classifies as High risk: "no data"
//! must read as "not yet compliant", never as success.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::assessment::{AssessmentResult, ControlStatus};
use crate::models::framework::{Control, SecurityDomain};
use crate::models::report::{DetailedResult, Priority, Recommendation};

/// Three-tier risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Per-status result counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusCounts {
    pub total_controls: u32,
    pub implemented_controls: u32,
    pub partially_implemented_controls: u32,
    pub not_implemented_controls: u32,
    pub not_applicable_controls: u32,
}

impl StatusCounts {
    /// Results that count toward the score denominator.
    pub fn applicable(&self) -> u32 {
        self.total_controls - self.not_applicable_controls
    }
}

/// Score, risk level, and counts for one result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreSummary {
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Score, risk level, and counts scoped to one security domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DomainScore {
    pub domain_id: Uuid,
    pub domain_name: String,
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Tally statuses into per-status counts.
pub fn status_counts<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = ControlStatus>,
{
    let mut counts = StatusCounts::default();
    for status in statuses {
        counts.total_controls += 1;
        match status {
            ControlStatus::Implemented => counts.implemented_controls += 1,
            ControlStatus::PartiallyImplemented => counts.partially_implemented_controls += 1,
            ControlStatus::NotImplemented => counts.not_implemented_controls += 1,
            ControlStatus::NotApplicable => counts.not_applicable_controls += 1,
        }
    }
    counts
}

/// The weighted compliance score for a set of counts, in [0, 100].
///
/// Unrounded; callers round to the precision they need.
pub fn compliance_score(counts: &StatusCounts) -> f64 {
    let applicable = counts.applicable();
    if applicable == 0 {
        return 0.0;
    }
    100.0
        * (f64::from(counts.implemented_controls)
            + 0.5 * f64::from(counts.partially_implemented_controls))
        / f64::from(applicable)
}

/// Classify a score into a risk level.
pub fn risk_level(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Low
    } else if score >= 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Score and classify one result set.
pub fn summarize<I>(statuses: I) -> ScoreSummary
where
    I: IntoIterator<Item = ControlStatus>,
{
    let counts = status_counts(statuses);
    let compliance_score = compliance_score(&counts);
    ScoreSummary {
        compliance_score,
        risk_level: risk_level(compliance_score),
        counts,
    }
}

/// Round a score to one decimal place for persistence.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Remediation priority for a control, from its static maturity level.
pub fn priority(maturity_level: i32) -> Priority {
    if maturity_level >= 3 {
        Priority::High
    } else if maturity_level == 1 {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Recommendation text for a control that is not fully implemented.
///
/// The two templates are distinct on purpose: they signal different
/// remediation effort to the reader.
pub fn recommendation_text(status: ControlStatus, control: &Control) -> Option<String> {
    match status {
        ControlStatus::NotImplemented => Some(format!(
            "Implement {} to address {}",
            control.name, control.description
        )),
        ControlStatus::PartiallyImplemented => Some(format!(
            "Complete the implementation of {} to fully address {}",
            control.name, control.description
        )),
        ControlStatus::Implemented | ControlStatus::NotApplicable => None,
    }
}

/// Per-domain score breakdown.
///
/// Partitions results by the domain owning each result's control, then
/// applies the same formula and classification per partition. Every domain
/// of the framework appears, ordered by `display_order`; a domain with zero
/// applicable controls scores 0 / High so under-evaluated domains are
/// flagged rather than silently excluded.
pub fn domain_breakdown(
    domains: &[SecurityDomain],
    controls: &[Control],
    results: &[AssessmentResult],
) -> Vec<DomainScore> {
    let control_domain: HashMap<Uuid, Uuid> =
        controls.iter().map(|c| (c.id, c.domain_id)).collect();

    let mut by_domain: HashMap<Uuid, Vec<ControlStatus>> = HashMap::new();
    for result in results {
        if let Some(domain_id) = control_domain.get(&result.control_id) {
            by_domain.entry(*domain_id).or_default().push(result.status);
        }
    }

    let mut ordered: Vec<&SecurityDomain> = domains.iter().collect();
    ordered.sort_by_key(|d| d.display_order);

    ordered
        .into_iter()
        .map(|domain| {
            let statuses = by_domain.remove(&domain.id).unwrap_or_default();
            let counts = status_counts(statuses);
            let score = compliance_score(&counts);
            DomainScore {
                domain_id: domain.id,
                domain_name: domain.display_name.clone(),
                compliance_score: score,
                risk_level: risk_level(score),
                counts,
            }
        })
        .collect()
}

/// Denormalized per-result entries for the report payload.
///
/// Includes every result, `not_applicable` ones included; unknown control
/// ids (catalog drift) are skipped rather than failing the whole report.
pub fn detailed_results(
    domains: &[SecurityDomain],
    controls: &[Control],
    results: &[AssessmentResult],
) -> Vec<DetailedResult> {
    let domain_names: HashMap<Uuid, &str> = domains
        .iter()
        .map(|d| (d.id, d.display_name.as_str()))
        .collect();
    let controls_by_id: HashMap<Uuid, &Control> = controls.iter().map(|c| (c.id, c)).collect();

    results
        .iter()
        .filter_map(|result| {
            let control = controls_by_id.get(&result.control_id)?;
            let domain_name = domain_names
                .get(&control.domain_id)
                .copied()
                .unwrap_or_default();
            Some(DetailedResult {
                control_id: control.id,
                control_code: control.code.clone(),
                control_name: control.name.clone(),
                domain_name: domain_name.to_string(),
                status: result.status,
                evidence: result.evidence.clone(),
                comments: result.comments.clone(),
            })
        })
        .collect()
}

/// One recommendation per result with status not_implemented or
/// partially_implemented, carrying the maturity-derived priority.
pub fn recommendations(
    domains: &[SecurityDomain],
    controls: &[Control],
    results: &[AssessmentResult],
) -> Vec<Recommendation> {
    let domain_names: HashMap<Uuid, &str> = domains
        .iter()
        .map(|d| (d.id, d.display_name.as_str()))
        .collect();
    let controls_by_id: HashMap<Uuid, &Control> = controls.iter().map(|c| (c.id, c)).collect();

    results
        .iter()
        .filter(|result| result.status.needs_remediation())
        .filter_map(|result| {
            let control = controls_by_id.get(&result.control_id)?;
            let text = recommendation_text(result.status, control)?;
            let domain_name = domain_names
                .get(&control.domain_id)
                .copied()
                .unwrap_or_default();
            Some(Recommendation {
                control_id: control.id,
                control_code: control.code.clone(),
                control_name: control.name.clone(),
                domain_name: domain_name.to_string(),
                status: result.status,
                priority: priority(control.maturity_level),
                recommendation: text,
            })
        })
        .collect()
}
