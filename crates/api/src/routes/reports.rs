//! Compliance report routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CompanyAuth;
use crate::services::ReportBuilder;
use domain::models::report::{ComplianceReport, CreateReportRequest};
use persistence::repositories::ComplianceReportRepository;

/// Load a report and verify it belongs to the caller's company.
pub(crate) async fn load_owned_report(
    state: &AppState,
    auth: &CompanyAuth,
    report_id: Uuid,
) -> Result<ComplianceReport, ApiError> {
    let report = ComplianceReportRepository::new(state.pool.clone())
        .find_by_id(report_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    if report.company_id != auth.company_id {
        return Err(ApiError::Forbidden(
            "Report belongs to another company".to_string(),
        ));
    }

    Ok(report)
}

/// Generate a compliance report for an assessment.
///
/// POST /api/v1/reports
///
/// Also finalizes the assessment if it is still in progress.
pub async fn create_report(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ComplianceReport>), ApiError> {
    request.validate()?;

    let report = ReportBuilder::new(state.pool.clone())
        .build(auth.company_id, &request)
        .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

/// Get a report.
///
/// GET /api/v1/reports/:id
pub async fn get_report(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(report_id): Path<Uuid>,
) -> Result<Json<ComplianceReport>, ApiError> {
    let report = load_owned_report(&state, &auth, report_id).await?;
    Ok(Json(report))
}
