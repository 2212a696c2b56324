//! HTTP route handlers.

pub mod assessments;
pub mod health;
pub mod reports;
pub mod share_links;
