//! Compliance report model and the frozen report payload.
//!
//! A report is a point-in-time snapshot: once the row is written its
//! `report_data` is never recomputed or mutated. Regenerating a report for
//! the same assessment produces a new row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::scoring::{DomainScore, ScoreSummary};
use crate::models::assessment::ControlStatus;

/// Requested output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "report_format", rename_all = "snake_case")]
pub enum ReportFormat {
    Pdf,
    Html,
    #[default]
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// An immutable compliance report snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComplianceReport {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// The frozen computed payload; shape of [`ReportData`].
    pub report_data: serde_json::Value,
    pub format: ReportFormat,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Framework identity carried inside the report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FrameworkInfo {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One denormalized result entry for downstream rendering.
///
/// Carries control and domain identity alongside the raw outcome so
/// consumers never need the catalog to display a report. Includes every
/// result, `not_applicable` ones included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DetailedResult {
    pub control_id: Uuid,
    pub control_code: String,
    pub control_name: String,
    pub domain_name: String,
    pub status: ControlStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Remediation priority derived from a control's maturity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One remediation recommendation for a control that is not fully implemented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Recommendation {
    pub control_id: Uuid,
    pub control_code: String,
    pub control_name: String,
    pub domain_name: String,
    pub status: ControlStatus,
    pub priority: Priority,
    pub recommendation: String,
}

/// The full computed report payload, persisted as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportData {
    pub framework: FrameworkInfo,
    pub summary: ScoreSummary,
    pub domain_risk_levels: Vec<DomainScore>,
    pub detailed_results: Vec<DetailedResult>,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

/// Request to build a new report for an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateReportRequest {
    pub assessment_id: Uuid,
    #[validate(length(min = 1, max = 300, message = "title must be 1-300 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "summary must be at most 5000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default)]
    pub is_public: bool,
}
