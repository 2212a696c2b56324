//! Report assembly service.
//!
//! Loads an assessment and its framework catalog, computes the score
//! breakdown through the scoring service, and persists the result as one
//! immutable `compliance_reports` row. Generating a report also finalizes
//! an in-progress assessment: the report is evidence the user considers the
//! assessment done.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::report::{ComplianceReport, CreateReportRequest, FrameworkInfo, ReportData};
use domain::services::scoring;
use persistence::repositories::{
    AssessmentRepository, AssessmentResultRepository, ComplianceReportRepository,
    FrameworkRepository,
};

use crate::error::ApiError;

/// Service that builds immutable compliance report snapshots.
pub struct ReportBuilder {
    pool: PgPool,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build and persist a report for one assessment.
    ///
    /// All loads happen before the single insert; if any load fails no row
    /// is written. The persisted payload is never recomputed afterward.
    pub async fn build(
        &self,
        company_id: Uuid,
        request: &CreateReportRequest,
    ) -> Result<ComplianceReport, ApiError> {
        let assessments = AssessmentRepository::new(self.pool.clone());
        let frameworks = FrameworkRepository::new(self.pool.clone());
        let results_repo = AssessmentResultRepository::new(self.pool.clone());
        let reports = ComplianceReportRepository::new(self.pool.clone());

        let assessment = assessments
            .find_by_id(request.assessment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Assessment not found".to_string()))?;

        if assessment.company_id != company_id {
            return Err(ApiError::Forbidden(
                "Assessment belongs to another company".to_string(),
            ));
        }

        let framework = frameworks
            .find_by_id(assessment.framework_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "framework {} referenced by assessment {} is missing",
                    assessment.framework_id, assessment.id
                ))
            })?;

        let domains = frameworks.list_domains(framework.id).await?;
        let controls = frameworks.list_controls_by_framework(framework.id).await?;
        let results = results_repo.list_by_assessment(assessment.id).await?;

        let summary = scoring::summarize(results.iter().map(|r| r.status));
        let domain_risk_levels = scoring::domain_breakdown(&domains, &controls, &results);
        let detailed_results = scoring::detailed_results(&domains, &controls, &results);
        let recommendations = scoring::recommendations(&domains, &controls, &results);

        let compliance_score = summary.compliance_score;

        let data = ReportData {
            framework: FrameworkInfo {
                id: framework.id,
                name: framework.name,
                display_name: framework.display_name,
                version: framework.version,
            },
            summary,
            domain_risk_levels,
            detailed_results,
            recommendations,
            generated_at: Utc::now(),
        };

        let report_data = serde_json::to_value(&data)
            .map_err(|e| ApiError::Internal(format!("failed to serialize report data: {}", e)))?;

        let report = reports
            .create(
                assessment.id,
                company_id,
                &request.title,
                request.summary.as_deref(),
                &report_data,
                request.format,
                request.is_public,
            )
            .await?;

        // Generating a report finalizes an in-progress assessment.
        let finalized = assessments
            .complete(assessment.id, scoring::round_score(compliance_score))
            .await?;

        tracing::info!(
            report_id = %report.id,
            assessment_id = %assessment.id,
            compliance_score,
            finalized,
            "Compliance report generated"
        );

        Ok(report)
    }
}
