//! Assessment result entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::assessment::{AssessmentResult, ControlStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for per-control assessment results.
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentResultEntity {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub control_id: Uuid,
    pub status: ControlStatus,
    pub evidence: Option<String>,
    pub comments: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<AssessmentResultEntity> for AssessmentResult {
    fn from(entity: AssessmentResultEntity) -> Self {
        AssessmentResult {
            id: entity.id,
            assessment_id: entity.assessment_id,
            control_id: entity.control_id,
            status: entity.status,
            evidence: entity.evidence,
            comments: entity.comments,
            updated_at: entity.updated_at,
        }
    }
}
