//! Framework catalog entities: frameworks, security domains, controls.

use domain::models::framework::{Control, Framework, SecurityDomain};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for frameworks.
#[derive(Debug, Clone, FromRow)]
pub struct FrameworkEntity {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl From<FrameworkEntity> for Framework {
    fn from(entity: FrameworkEntity) -> Self {
        Framework {
            id: entity.id,
            name: entity.name,
            display_name: entity.display_name,
            version: entity.version,
            description: entity.description,
        }
    }
}

/// Database entity for security domains.
#[derive(Debug, Clone, FromRow)]
pub struct SecurityDomainEntity {
    pub id: Uuid,
    pub framework_id: Uuid,
    pub name: String,
    pub display_name: String,
    pub display_order: i32,
}

impl From<SecurityDomainEntity> for SecurityDomain {
    fn from(entity: SecurityDomainEntity) -> Self {
        SecurityDomain {
            id: entity.id,
            framework_id: entity.framework_id,
            name: entity.name,
            display_name: entity.display_name,
            display_order: entity.display_order,
        }
    }
}

/// Database entity for controls.
#[derive(Debug, Clone, FromRow)]
pub struct ControlEntity {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub maturity_level: i32,
}

impl From<ControlEntity> for Control {
    fn from(entity: ControlEntity) -> Self {
        Control {
            id: entity.id,
            domain_id: entity.domain_id,
            code: entity.code,
            name: entity.name,
            description: entity.description,
            maturity_level: entity.maturity_level,
        }
    }
}
