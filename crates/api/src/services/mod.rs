//! Orchestration services.

pub mod report_builder;
pub mod share_links;

pub use report_builder::ReportBuilder;
pub use share_links::ShareLinkManager;
