//! Report share-link domain model.
//!
//! A share link is a capability token over one compliance report: whoever
//! holds the token can read the report without authenticating as a company
//! user, subject to password, expiry, and view-count gates. Deactivation is
//! the only persisted state transition; expiry and exhaustion are derived at
//! access time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use shared::crypto::verify_sha256;
use shared::token::generate_token;

/// Share token prefix.
pub const SHARE_TOKEN_PREFIX: &str = "shr_";

/// Random bytes behind each share token (256 bits of entropy).
const SHARE_TOKEN_RANDOM_BYTES: usize = 32;

/// Why a share-link access attempt was denied.
///
/// Each variant is a distinct caller-visible outcome; the checks are
/// evaluated strictly in the order the variants are declared so that, for
/// example, an expired link reports `Expired` rather than asking for a
/// password it would never accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShareAccessDenied {
    #[error("share link has been deactivated")]
    Deactivated,
    #[error("share link has expired")]
    Expired,
    #[error("share link view limit has been reached")]
    ViewLimitExceeded,
    #[error("share link requires a password")]
    PasswordRequired,
    #[error("invalid share link password")]
    InvalidPassword,
}

/// A capability token granting read access to one compliance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportShareLink {
    pub id: Uuid,
    pub report_id: Uuid,
    pub share_token: String,
    /// SHA-256 hex of the optional password; the plaintext is never stored.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_views: Option<i32>,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ReportShareLink {
    /// Check if the link is expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now > exp)
    }

    /// Check if the link has consumed all of its allowed views.
    pub fn is_exhausted(&self) -> bool {
        self.max_views.is_some_and(|max| self.view_count >= max)
    }

    /// Get remaining views (None if unlimited).
    pub fn remaining_views(&self) -> Option<i32> {
        self.max_views.map(|max| (max - self.view_count).max(0))
    }

    /// Evaluate the access gates for one resolution attempt.
    ///
    /// Order is load-bearing: deactivation, then expiry, then view limit,
    /// then the password gates. A caller holding an expired link must be
    /// told "expired", never be misled into retrying passwords.
    pub fn check_access(
        &self,
        provided_password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), ShareAccessDenied> {
        if !self.is_active {
            return Err(ShareAccessDenied::Deactivated);
        }
        if self.is_expired(now) {
            return Err(ShareAccessDenied::Expired);
        }
        if self.is_exhausted() {
            return Err(ShareAccessDenied::ViewLimitExceeded);
        }
        if let Some(hash) = &self.password_hash {
            match provided_password {
                None => return Err(ShareAccessDenied::PasswordRequired),
                Some(password) if !verify_sha256(password, hash) => {
                    return Err(ShareAccessDenied::InvalidPassword)
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Generate a new share token.
pub fn generate_share_token() -> String {
    generate_token(SHARE_TOKEN_PREFIX, SHARE_TOKEN_RANDOM_BYTES)
}

/// Request to create a new share link for a report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateShareLinkRequest {
    #[validate(length(min = 4, max = 128, message = "password must be 4-128 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 100000, message = "max_views must be between 1 and 100000"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_views: Option<i32>,
}

/// Share link as serialized to the owning company.
///
/// Deliberately omits the password hash; only whether a password is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShareLinkResponse {
    pub id: Uuid,
    pub report_id: Uuid,
    pub share_token: String,
    pub has_password: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_views: Option<i32>,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_views: Option<i32>,
}

impl From<ReportShareLink> for ShareLinkResponse {
    fn from(link: ReportShareLink) -> Self {
        let remaining_views = link.remaining_views();

        Self {
            id: link.id,
            report_id: link.report_id,
            share_token: link.share_token,
            has_password: link.password_hash.is_some(),
            expires_at: link.expires_at,
            max_views: link.max_views,
            view_count: link.view_count,
            is_active: link.is_active,
            created_at: link.created_at,
            remaining_views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::crypto::sha256_hex;

    fn link() -> ReportShareLink {
        ReportShareLink {
            id: Uuid::new_v4(),
            report_id: Uuid::new_v4(),
            share_token: generate_share_token(),
            password_hash: None,
            expires_at: None,
            max_views: None,
            view_count: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_share_token_prefix_and_entropy() {
        let token = generate_share_token();
        assert!(token.starts_with(SHARE_TOKEN_PREFIX));
        assert!(token.len() > 40);
        assert_ne!(token, generate_share_token());
    }

    #[test]
    fn test_open_link_grants_access() {
        assert_eq!(link().check_access(None, Utc::now()), Ok(()));
    }

    #[test]
    fn test_deactivated_link_denied() {
        let mut link = link();
        link.is_active = false;
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::Deactivated)
        );
    }

    #[test]
    fn test_expired_link_denied() {
        let mut link = link();
        link.expires_at = Some(Utc::now() - Duration::hours(1));
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::Expired)
        );
    }

    #[test]
    fn test_future_expiry_still_valid() {
        let mut link = link();
        link.expires_at = Some(Utc::now() + Duration::hours(1));
        assert_eq!(link.check_access(None, Utc::now()), Ok(()));
    }

    #[test]
    fn test_exhausted_link_denied() {
        let mut link = link();
        link.max_views = Some(3);
        link.view_count = 3;
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::ViewLimitExceeded)
        );
    }

    #[test]
    fn test_password_required_when_missing() {
        let mut link = link();
        link.password_hash = Some(sha256_hex("s3cret"));
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::PasswordRequired)
        );
    }

    #[test]
    fn test_wrong_password_denied() {
        let mut link = link();
        link.password_hash = Some(sha256_hex("s3cret"));
        assert_eq!(
            link.check_access(Some("guess"), Utc::now()),
            Err(ShareAccessDenied::InvalidPassword)
        );
    }

    #[test]
    fn test_correct_password_accepted() {
        let mut link = link();
        link.password_hash = Some(sha256_hex("s3cret"));
        assert_eq!(link.check_access(Some("s3cret"), Utc::now()), Ok(()));
    }

    #[test]
    fn test_expiry_checked_before_password() {
        // An expired, password-protected link accessed without a password
        // must report Expired, not PasswordRequired.
        let mut link = link();
        link.expires_at = Some(Utc::now() - Duration::minutes(5));
        link.password_hash = Some(sha256_hex("s3cret"));
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::Expired)
        );
    }

    #[test]
    fn test_deactivation_checked_before_expiry() {
        let mut link = link();
        link.is_active = false;
        link.expires_at = Some(Utc::now() - Duration::minutes(5));
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::Deactivated)
        );
    }

    #[test]
    fn test_view_limit_checked_before_password() {
        let mut link = link();
        link.max_views = Some(1);
        link.view_count = 1;
        link.password_hash = Some(sha256_hex("s3cret"));
        assert_eq!(
            link.check_access(None, Utc::now()),
            Err(ShareAccessDenied::ViewLimitExceeded)
        );
    }

    #[test]
    fn test_remaining_views() {
        let mut link = link();
        link.max_views = Some(10);
        link.view_count = 7;
        assert_eq!(link.remaining_views(), Some(3));
        link.max_views = None;
        assert_eq!(link.remaining_views(), None);
    }

    #[test]
    fn test_response_never_carries_password_hash() {
        let mut link = link();
        link.password_hash = Some(sha256_hex("s3cret"));
        let response: ShareLinkResponse = link.into();
        assert!(response.has_password);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_create_request_rejects_zero_max_views() {
        let request = CreateShareLinkRequest {
            password: None,
            expires_at: None,
            max_views: Some(0),
        };
        assert!(request.validate().is_err());
    }
}
