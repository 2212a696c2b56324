//! Assessment domain model and per-control result tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of an assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "assessment_status", rename_all = "snake_case")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown assessment status: {}", other)),
        }
    }
}

/// Implementation status of a single control within an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "control_status", rename_all = "snake_case")]
pub enum ControlStatus {
    Implemented,
    PartiallyImplemented,
    NotImplemented,
    NotApplicable,
}

impl ControlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implemented => "implemented",
            Self::PartiallyImplemented => "partially_implemented",
            Self::NotImplemented => "not_implemented",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Whether this result counts toward the compliance-score denominator.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Whether this result warrants a remediation recommendation.
    pub fn needs_remediation(&self) -> bool {
        matches!(self, Self::NotImplemented | Self::PartiallyImplemented)
    }
}

impl std::str::FromStr for ControlStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implemented" => Ok(Self::Implemented),
            "partially_implemented" => Ok(Self::PartiallyImplemented),
            "not_implemented" => Ok(Self::NotImplemented),
            "not_applicable" => Ok(Self::NotApplicable),
            other => Err(format!("unknown control status: {}", other)),
        }
    }
}

/// A named evaluation run of one framework by one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Assessment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub framework_id: Uuid,
    pub name: String,
    pub status: AssessmentStatus,
    /// Final compliance score, written once by report generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// One control's assessment outcome within one assessment run.
///
/// Exactly one row exists per (assessment, control) pair; edits are upserts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssessmentResult {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub control_id: Uuid,
    pub status: ControlStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request to start a new assessment against a framework.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateAssessmentRequest {
    pub framework_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
}

/// Request to record the outcome for one control.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateResultRequest {
    pub status: ControlStatus,
    #[validate(length(max = 10000, message = "evidence must be at most 10000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[validate(length(max = 10000, message = "comments must be at most 10000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
