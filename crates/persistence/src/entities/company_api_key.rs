//! Company API key entity for database operations.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for company API keys.
///
/// There is no separate domain model: the key row is only consumed by the
/// authentication extractor.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyApiKeyEntity {
    pub id: Uuid,
    pub company_id: Uuid,
    pub key_hash: String,
    pub key_prefix: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl CompanyApiKeyEntity {
    /// A key grants access while active and not revoked.
    pub fn is_valid(&self) -> bool {
        self.is_active && self.revoked_at.is_none()
    }
}
