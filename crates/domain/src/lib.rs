//! Domain layer for the compliance platform backend.
//!
//! This crate contains:
//! - Domain models (frameworks, assessments, reports, share links)
//! - Pure business services (compliance scoring)

pub mod models;
pub mod services;
