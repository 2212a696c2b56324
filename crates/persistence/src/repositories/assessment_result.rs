//! Assessment result repository for database operations.

use domain::models::assessment::{AssessmentResult, ControlStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AssessmentResultEntity;

/// Repository for per-control assessment results.
#[derive(Clone)]
pub struct AssessmentResultRepository {
    pool: PgPool,
}

impl AssessmentResultRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seed one `not_implemented` row per control for a new assessment.
    ///
    /// Idempotent: re-seeding skips pairs that already exist.
    pub async fn seed_for_controls(
        &self,
        assessment_id: Uuid,
        control_ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO assessment_results (assessment_id, control_id)
            SELECT $1, control_id FROM UNNEST($2::uuid[]) AS t(control_id)
            ON CONFLICT (assessment_id, control_id) DO NOTHING
            "#,
        )
        .bind(assessment_id)
        .bind(control_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List all results for an assessment.
    pub async fn list_by_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<AssessmentResult>, sqlx::Error> {
        let entities = sqlx::query_as::<_, AssessmentResultEntity>(
            r#"
            SELECT id, assessment_id, control_id, status, evidence, comments, updated_at
            FROM assessment_results
            WHERE assessment_id = $1
            ORDER BY updated_at, id
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Record the outcome for one control.
    ///
    /// Upsert on the (assessment_id, control_id) unique pair so concurrent
    /// writers can never produce duplicate rows.
    pub async fn upsert(
        &self,
        assessment_id: Uuid,
        control_id: Uuid,
        status: ControlStatus,
        evidence: Option<&str>,
        comments: Option<&str>,
    ) -> Result<AssessmentResult, sqlx::Error> {
        let entity = sqlx::query_as::<_, AssessmentResultEntity>(
            r#"
            INSERT INTO assessment_results (assessment_id, control_id, status, evidence, comments)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (assessment_id, control_id) DO UPDATE
            SET status = EXCLUDED.status,
                evidence = EXCLUDED.evidence,
                comments = EXCLUDED.comments,
                updated_at = NOW()
            RETURNING id, assessment_id, control_id, status, evidence, comments, updated_at
            "#,
        )
        .bind(assessment_id)
        .bind(control_id)
        .bind(status)
        .bind(evidence)
        .bind(comments)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }
}
