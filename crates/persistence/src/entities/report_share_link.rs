//! Report share link entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::share_link::ReportShareLink;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for report share links.
#[derive(Debug, Clone, FromRow)]
pub struct ReportShareLinkEntity {
    pub id: Uuid,
    pub report_id: Uuid,
    pub share_token: String,
    pub password_hash: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<i32>,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ReportShareLinkEntity> for ReportShareLink {
    fn from(entity: ReportShareLinkEntity) -> Self {
        ReportShareLink {
            id: entity.id,
            report_id: entity.report_id,
            share_token: entity.share_token,
            password_hash: entity.password_hash,
            expires_at: entity.expires_at,
            max_views: entity.max_views,
            view_count: entity.view_count,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
