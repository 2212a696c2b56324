//! Assessment entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::assessment::{Assessment, AssessmentStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for assessments.
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentEntity {
    pub id: Uuid,
    pub company_id: Uuid,
    pub framework_id: Uuid,
    pub name: String,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<AssessmentEntity> for Assessment {
    fn from(entity: AssessmentEntity) -> Self {
        Assessment {
            id: entity.id,
            company_id: entity.company_id,
            framework_id: entity.framework_id,
            name: entity.name,
            status: entity.status,
            score: entity.score,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
        }
    }
}
