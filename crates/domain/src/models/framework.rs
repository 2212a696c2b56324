//! Static framework metadata: frameworks, security domains, controls.
//!
//! Metadata is read-only at runtime; frameworks are loaded into the database
//! out of band (catalog import) and referenced by assessments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A regulatory framework (e.g. NCA ECC, SAMA CSF).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Framework {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A security domain grouping controls within a framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SecurityDomain {
    pub id: Uuid,
    pub framework_id: Uuid,
    pub name: String,
    pub display_name: String,
    pub display_order: i32,
}

/// A single control within a security domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Control {
    pub id: Uuid,
    pub domain_id: Uuid,
    /// Human-readable control code, e.g. "ECC-1-1-1".
    pub code: String,
    pub name: String,
    pub description: String,
    /// Maturity level 1-5; drives recommendation priority.
    pub maturity_level: i32,
}
