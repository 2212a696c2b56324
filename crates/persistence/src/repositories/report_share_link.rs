//! Report share link repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::share_link::ReportShareLink;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ReportShareLinkEntity;

/// Repository for report share link database operations.
#[derive(Clone)]
pub struct ReportShareLinkRepository {
    pool: PgPool,
}

impl ReportShareLinkRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new share link.
    pub async fn create(
        &self,
        report_id: Uuid,
        share_token: &str,
        password_hash: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
        max_views: Option<i32>,
    ) -> Result<ReportShareLink, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReportShareLinkEntity>(
            r#"
            INSERT INTO report_share_links (report_id, share_token, password_hash, expires_at, max_views)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, report_id, share_token, password_hash, expires_at, max_views, view_count, is_active, created_at
            "#,
        )
        .bind(report_id)
        .bind(share_token)
        .bind(password_hash)
        .bind(expires_at)
        .bind(max_views)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find share link by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ReportShareLink>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReportShareLinkEntity>(
            r#"
            SELECT id, report_id, share_token, password_hash, expires_at, max_views, view_count, is_active, created_at
            FROM report_share_links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find share link by token.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ReportShareLink>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReportShareLinkEntity>(
            r#"
            SELECT id, report_id, share_token, password_hash, expires_at, max_views, view_count, is_active, created_at
            FROM report_share_links
            WHERE share_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List all share links for a report, newest first.
    pub async fn list_by_report(
        &self,
        report_id: Uuid,
    ) -> Result<Vec<ReportShareLink>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ReportShareLinkEntity>(
            r#"
            SELECT id, report_id, share_token, password_hash, expires_at, max_views, view_count, is_active, created_at
            FROM report_share_links
            WHERE report_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Consume one view, atomically with respect to concurrent resolutions.
    ///
    /// The guard repeats the access gates so two simultaneous resolutions of
    /// a link with one remaining view cannot both succeed: the row count of
    /// this single UPDATE is the arbiter.
    pub async fn increment_view_count(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE report_share_links
            SET view_count = view_count + 1
            WHERE id = $1
              AND is_active
              AND (expires_at IS NULL OR expires_at > NOW())
              AND (max_views IS NULL OR view_count < max_views)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a share link.
    ///
    /// Idempotent: deactivating an already-inactive link rewrites `false`
    /// and still returns the row.
    pub async fn deactivate(&self, id: Uuid) -> Result<Option<ReportShareLink>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ReportShareLinkEntity>(
            r#"
            UPDATE report_share_links
            SET is_active = FALSE
            WHERE id = $1
            RETURNING id, report_id, share_token, password_hash, expires_at, max_views, view_count, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
