//! Assessment repository for database operations.

use domain::models::assessment::{Assessment, AssessmentStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AssessmentEntity;

/// Repository for assessment database operations.
#[derive(Clone)]
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new in-progress assessment.
    pub async fn create(
        &self,
        company_id: Uuid,
        framework_id: Uuid,
        name: &str,
    ) -> Result<Assessment, sqlx::Error> {
        let entity = sqlx::query_as::<_, AssessmentEntity>(
            r#"
            INSERT INTO assessments (company_id, framework_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, company_id, framework_id, name, status, score, started_at, completed_at
            "#,
        )
        .bind(company_id)
        .bind(framework_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find assessment by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Assessment>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AssessmentEntity>(
            r#"
            SELECT id, company_id, framework_id, name, status, score, started_at, completed_at
            FROM assessments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Mark an in-progress assessment completed and write its final score.
    ///
    /// A no-op for assessments that are already completed; the affected-row
    /// count says whether the transition happened.
    pub async fn complete(&self, id: Uuid, score: f64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE assessments
            SET status = $2, score = $3, completed_at = NOW()
            WHERE id = $1 AND status <> $2
            "#,
        )
        .bind(id)
        .bind(AssessmentStatus::Completed)
        .bind(score)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
