//! Framework catalog repository (read-only at runtime).

use domain::models::framework::{Control, Framework, SecurityDomain};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ControlEntity, FrameworkEntity, SecurityDomainEntity};

/// Repository for framework, domain, and control lookups.
#[derive(Clone)]
pub struct FrameworkRepository {
    pool: PgPool,
}

impl FrameworkRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find framework by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Framework>, sqlx::Error> {
        let entity = sqlx::query_as::<_, FrameworkEntity>(
            r#"
            SELECT id, name, display_name, version, description
            FROM frameworks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find security domain by ID.
    pub async fn find_domain_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SecurityDomain>, sqlx::Error> {
        let entity = sqlx::query_as::<_, SecurityDomainEntity>(
            r#"
            SELECT id, framework_id, name, display_name, display_order
            FROM security_domains
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find control by ID.
    pub async fn find_control_by_id(&self, id: Uuid) -> Result<Option<Control>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ControlEntity>(
            r#"
            SELECT id, domain_id, code, name, description, maturity_level
            FROM controls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List the security domains of a framework, in display order.
    pub async fn list_domains(
        &self,
        framework_id: Uuid,
    ) -> Result<Vec<SecurityDomain>, sqlx::Error> {
        let entities = sqlx::query_as::<_, SecurityDomainEntity>(
            r#"
            SELECT id, framework_id, name, display_name, display_order
            FROM security_domains
            WHERE framework_id = $1
            ORDER BY display_order
            "#,
        )
        .bind(framework_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// List every control of a framework across all of its domains.
    pub async fn list_controls_by_framework(
        &self,
        framework_id: Uuid,
    ) -> Result<Vec<Control>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ControlEntity>(
            r#"
            SELECT c.id, c.domain_id, c.code, c.name, c.description, c.maturity_level
            FROM controls c
            JOIN security_domains d ON d.id = c.domain_id
            WHERE d.framework_id = $1
            ORDER BY d.display_order, c.code
            "#,
        )
        .bind(framework_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
