//! Company API key repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CompanyApiKeyEntity;

/// Repository for company API key database operations.
#[derive(Clone)]
pub struct CompanyApiKeyRepository {
    pool: PgPool,
}

impl CompanyApiKeyRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new API key (hash only; the plaintext never reaches here).
    pub async fn create(
        &self,
        company_id: Uuid,
        key_hash: &str,
        key_prefix: &str,
        name: &str,
    ) -> Result<CompanyApiKeyEntity, sqlx::Error> {
        sqlx::query_as::<_, CompanyApiKeyEntity>(
            r#"
            INSERT INTO company_api_keys (company_id, key_hash, key_prefix, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, company_id, key_hash, key_prefix, name, is_active, created_at, revoked_at
            "#,
        )
        .bind(company_id)
        .bind(key_hash)
        .bind(key_prefix)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    /// Look up a key by its SHA-256 hash.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<CompanyApiKeyEntity>, sqlx::Error> {
        sqlx::query_as::<_, CompanyApiKeyEntity>(
            r#"
            SELECT id, company_id, key_hash, key_prefix, name, is_active, created_at, revoked_at
            FROM company_api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await
    }
}
