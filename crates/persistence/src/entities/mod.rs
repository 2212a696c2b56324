//! Database entities (row mappings).

pub mod assessment;
pub mod assessment_result;
pub mod company_api_key;
pub mod compliance_report;
pub mod framework;
pub mod report_share_link;

pub use assessment::AssessmentEntity;
pub use assessment_result::AssessmentResultEntity;
pub use company_api_key::CompanyApiKeyEntity;
pub use compliance_report::ComplianceReportEntity;
pub use framework::{ControlEntity, FrameworkEntity, SecurityDomainEntity};
pub use report_share_link::ReportShareLinkEntity;
