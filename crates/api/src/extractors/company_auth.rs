//! Company API key authentication extractor.
//!
//! Authenticated endpoints expect `Authorization: Bearer cpk_…`. The key is
//! looked up by its SHA-256 hash; the plaintext is never stored.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::CompanyApiKeyRepository;
use shared::crypto::sha256_hex;

/// Company API key prefix.
pub const API_KEY_PREFIX: &str = "cpk_";

/// Authenticated company identity.
#[derive(Debug, Clone)]
pub struct CompanyAuth {
    /// Company the key belongs to; all data access is scoped to it.
    pub company_id: Uuid,
    /// Database ID of the authenticated API key.
    pub api_key_id: Uuid,
}

impl CompanyAuth {
    /// Validates an API key and returns the company identity.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !api_key.starts_with(API_KEY_PREFIX) || api_key.len() < 12 {
            return Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            ));
        }

        let key_hash = sha256_hex(api_key);

        let repo = CompanyApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&key_hash)
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::Internal("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        if !key.is_valid() {
            return Err(ApiError::Unauthorized("API key has been revoked".to_string()));
        }

        Ok(CompanyAuth {
            company_id: key.company_id,
            api_key_id: key.id,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CompanyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let api_key = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        Self::validate(&state.pool, api_key).await
    }
}
