//! Compliance report entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::report::{ComplianceReport, ReportFormat};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for compliance reports.
#[derive(Debug, Clone, FromRow)]
pub struct ComplianceReportEntity {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub report_data: serde_json::Value,
    pub format: ReportFormat,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ComplianceReportEntity> for ComplianceReport {
    fn from(entity: ComplianceReportEntity) -> Self {
        ComplianceReport {
            id: entity.id,
            assessment_id: entity.assessment_id,
            company_id: entity.company_id,
            title: entity.title,
            summary: entity.summary,
            report_data: entity.report_data,
            format: entity.format,
            is_public: entity.is_public,
            created_at: entity.created_at,
        }
    }
}
