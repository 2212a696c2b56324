//! Pure business services.

pub mod scoring;
