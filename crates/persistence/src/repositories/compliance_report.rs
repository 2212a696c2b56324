//! Compliance report repository for database operations.
//!
//! Reports are write-once: there is deliberately no update method here.

use domain::models::report::{ComplianceReport, ReportFormat};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ComplianceReportEntity;

/// Repository for compliance report database operations.
#[derive(Clone)]
pub struct ComplianceReportRepository {
    pool: PgPool,
}

impl ComplianceReportRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new report snapshot as a single atomic insert.
    pub async fn create(
        &self,
        assessment_id: Uuid,
        company_id: Uuid,
        title: &str,
        summary: Option<&str>,
        report_data: &serde_json::Value,
        format: ReportFormat,
        is_public: bool,
    ) -> Result<ComplianceReport, sqlx::Error> {
        let entity = sqlx::query_as::<_, ComplianceReportEntity>(
            r#"
            INSERT INTO compliance_reports (assessment_id, company_id, title, summary, report_data, format, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, assessment_id, company_id, title, summary, report_data, format, is_public, created_at
            "#,
        )
        .bind(assessment_id)
        .bind(company_id)
        .bind(title)
        .bind(summary)
        .bind(report_data)
        .bind(format)
        .bind(is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find report by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ComplianceReport>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ComplianceReportEntity>(
            r#"
            SELECT id, assessment_id, company_id, title, summary, report_data, format, is_public, created_at
            FROM compliance_reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
