//! Report share-link routes.
//!
//! Owning-company routes are authenticated; resolution is public, gated
//! only by the token itself (plus password, expiry, and view limits).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CompanyAuth;
use crate::routes::reports::load_owned_report;
use crate::services::ShareLinkManager;
use domain::models::report::ComplianceReport;
use domain::models::share_link::{CreateShareLinkRequest, ShareLinkResponse};
use persistence::repositories::ReportShareLinkRepository;

/// Create a share link for a report.
///
/// POST /api/v1/reports/:id/share
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(report_id): Path<Uuid>,
    Json(request): Json<CreateShareLinkRequest>,
) -> Result<(StatusCode, Json<ShareLinkResponse>), ApiError> {
    request.validate()?;

    let report = load_owned_report(&state, &auth, report_id).await?;

    let link = ShareLinkManager::new(state.pool.clone())
        .create(report.id, &request)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// List share links for a report, newest first.
///
/// GET /api/v1/reports/:id/share
pub async fn list_share_links(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(report_id): Path<Uuid>,
) -> Result<Json<Vec<ShareLinkResponse>>, ApiError> {
    let report = load_owned_report(&state, &auth, report_id).await?;

    let links = ReportShareLinkRepository::new(state.pool.clone())
        .list_by_report(report.id)
        .await?;

    Ok(Json(links.into_iter().map(Into::into).collect()))
}

/// Deactivate a share link.
///
/// POST /api/v1/reports/share/:id/deactivate
///
/// Idempotent; deactivating an already-inactive link succeeds.
pub async fn deactivate_share_link(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(link_id): Path<Uuid>,
) -> Result<Json<ShareLinkResponse>, ApiError> {
    let links = ReportShareLinkRepository::new(state.pool.clone());
    let link = links
        .find_by_id(link_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Share link not found".to_string()))?;

    // Ownership is established through the linked report.
    load_owned_report(&state, &auth, link.report_id).await?;

    let link = ShareLinkManager::new(state.pool.clone())
        .deactivate(link.id)
        .await?;

    Ok(Json(link.into()))
}

#[derive(Debug, Deserialize)]
pub struct ResolveShareLinkQuery {
    pub password: Option<String>,
}

/// Resolve a share token to its report, consuming one view.
///
/// GET /api/v1/reports/share/:token
///
/// Public: the token is the capability.
pub async fn resolve_share_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<ResolveShareLinkQuery>,
) -> Result<Json<ComplianceReport>, ApiError> {
    let report = ShareLinkManager::new(state.pool.clone())
        .resolve(&token, query.password.as_deref())
        .await?;

    Ok(Json(report))
}
