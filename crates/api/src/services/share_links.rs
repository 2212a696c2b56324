//! Share-link lifecycle service.
//!
//! Issues, resolves, and retires the capability tokens that grant
//! unauthenticated read access to a compliance report.

use sqlx::PgPool;
use uuid::Uuid;

use chrono::Utc;
use domain::models::report::ComplianceReport;
use domain::models::share_link::{
    generate_share_token, CreateShareLinkRequest, ReportShareLink,
};
use persistence::repositories::{ComplianceReportRepository, ReportShareLinkRepository};
use shared::crypto::sha256_hex;

use crate::error::ApiError;

/// Service managing the share-link lifecycle.
pub struct ShareLinkManager {
    pool: PgPool,
}

impl ShareLinkManager {
    /// Create a new share-link manager.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issue a new share link for a report.
    ///
    /// Links are independent: creating one never invalidates another.
    pub async fn create(
        &self,
        report_id: Uuid,
        request: &CreateShareLinkRequest,
    ) -> Result<ReportShareLink, ApiError> {
        let links = ReportShareLinkRepository::new(self.pool.clone());

        let share_token = generate_share_token();
        let password_hash = request.password.as_deref().map(sha256_hex);

        let link = links
            .create(
                report_id,
                &share_token,
                password_hash.as_deref(),
                request.expires_at,
                request.max_views,
            )
            .await?;

        tracing::info!(
            link_id = %link.id,
            report_id = %report_id,
            has_password = link.password_hash.is_some(),
            max_views = ?link.max_views,
            "Share link created"
        );

        Ok(link)
    }

    /// Resolve a share token to its report, consuming one view.
    ///
    /// The gates run in the order defined by
    /// [`ReportShareLink::check_access`]; the view is consumed through a
    /// guarded atomic increment, so concurrent resolutions of a link with
    /// one remaining view cannot both succeed. When the increment loses
    /// that race, the row is re-read and the precise denial re-derived.
    pub async fn resolve(
        &self,
        token: &str,
        provided_password: Option<&str>,
    ) -> Result<ComplianceReport, ApiError> {
        let links = ReportShareLinkRepository::new(self.pool.clone());
        let reports = ComplianceReportRepository::new(self.pool.clone());

        let link = links
            .find_by_token(token)
            .await?
            .ok_or_else(|| ApiError::NotFound("Share link not found".to_string()))?;

        link.check_access(provided_password, Utc::now())?;

        if !links.increment_view_count(link.id).await? {
            let current = links
                .find_by_token(token)
                .await?
                .ok_or_else(|| ApiError::NotFound("Share link not found".to_string()))?;
            return match current.check_access(provided_password, Utc::now()) {
                Err(denied) => Err(denied.into()),
                // The guard and the re-read disagree (clock edge); the
                // increment refusing is still a spent view.
                Ok(()) => Err(ApiError::ShareLinkViewLimit),
            };
        }

        let report = reports
            .find_by_id(link.report_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "report {} referenced by share link {} is missing",
                    link.report_id, link.id
                ))
            })?;

        tracing::info!(
            link_id = %link.id,
            report_id = %report.id,
            "Share link resolved"
        );

        Ok(report)
    }

    /// Deactivate a share link.
    ///
    /// Idempotent: deactivating an already-inactive link succeeds.
    pub async fn deactivate(&self, link_id: Uuid) -> Result<ReportShareLink, ApiError> {
        let links = ReportShareLinkRepository::new(self.pool.clone());

        let link = links
            .deactivate(link_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Share link not found".to_string()))?;

        tracing::info!(link_id = %link.id, "Share link deactivated");

        Ok(link)
    }
}
