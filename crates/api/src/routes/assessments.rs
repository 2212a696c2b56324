//! Assessment management routes.

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
use domain::models::{
    Assessment, AssessmentResult, CreateAssessmentRequest, UpdateResultRequest,
};
use persistence::repositories::{
    AssessmentRepository, AssessmentResultRepository, FrameworkRepository,
};

/// Load an assessment and verify it belongs to the caller's company.
async fn load_owned_assessment(
    state: &AppState,
    auth: &CompanyAuth,
    assessment_id: Uuid,
) -> Result<Assessment, ApiError> {
    let assessment = AssessmentRepository::new(state.pool.clone())
        .find_by_id(assessment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assessment not found".to_string()))?;

    if assessment.company_id != auth.company_id {
        return Err(ApiError::Forbidden(
            "Assessment belongs to another company".to_string(),
        ));
    }

    Ok(assessment)
}

/// Start a new assessment against a framework.
///
/// POST /api/v1/assessments
///
/// Seeds one `not_implemented` result per control of the framework.
pub async fn create_assessment(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Json(request): Json<CreateAssessmentRequest>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    request.validate()?;

    let frameworks = FrameworkRepository::new(state.pool.clone());
    let framework = frameworks
        .find_by_id(request.framework_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Framework not found".to_string()))?;

    let assessment = AssessmentRepository::new(state.pool.clone())
        .create(auth.company_id, framework.id, &request.name)
        .await?;

    let controls = frameworks.list_controls_by_framework(framework.id).await?;
    let control_ids: Vec<Uuid> = controls.iter().map(|c| c.id).collect();
    let seeded = AssessmentResultRepository::new(state.pool.clone())
        .seed_for_controls(assessment.id, &control_ids)
        .await?;

    tracing::info!(
        assessment_id = %assessment.id,
        framework_id = %framework.id,
        company_id = %auth.company_id,
        seeded,
        "Assessment created"
    );

    Ok((StatusCode::CREATED, Json(assessment)))
}

/// Get an assessment.
///
/// GET /api/v1/assessments/:id
pub async fn get_assessment(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(assessment_id): Path<Uuid>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = load_owned_assessment(&state, &auth, assessment_id).await?;
    Ok(Json(assessment))
}

/// List all per-control results of an assessment.
///
/// GET /api/v1/assessments/:id/results
pub async fn list_results(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(assessment_id): Path<Uuid>,
) -> Result<Json<Vec<AssessmentResult>>, ApiError> {
    let assessment = load_owned_assessment(&state, &auth, assessment_id).await?;

    let results = AssessmentResultRepository::new(state.pool.clone())
        .list_by_assessment(assessment.id)
        .await?;

    Ok(Json(results))
}

/// Record the outcome for one control.
///
/// PUT /api/v1/assessments/:id/results/:control_id
///
/// Upserts on the (assessment, control) pair, so repeated edits and
/// concurrent writers converge on a single row.
pub async fn update_result(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path((assessment_id, control_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateResultRequest>,
) -> Result<Json<AssessmentResult>, ApiError> {
    request.validate()?;

    let assessment = load_owned_assessment(&state, &auth, assessment_id).await?;

    // The control must belong to the assessment's framework.
    let frameworks = FrameworkRepository::new(state.pool.clone());
    let control = frameworks
        .find_control_by_id(control_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Control not found".to_string()))?;
    let domain = frameworks
        .find_domain_by_id(control.domain_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Control not found".to_string()))?;
    if domain.framework_id != assessment.framework_id {
        return Err(ApiError::NotFound(
            "Control does not belong to the assessment's framework".to_string(),
        ));
    }

    let result = AssessmentResultRepository::new(state.pool.clone())
        .upsert(
            assessment.id,
            control.id,
            request.status,
            request.evidence.as_deref(),
            request.comments.as_deref(),
        )
        .await?;

    Ok(Json(result))
}
