//! Repository implementations.

pub mod assessment;
pub mod assessment_result;
pub mod company_api_key;
pub mod compliance_report;
pub mod framework;
pub mod report_share_link;

pub use assessment::AssessmentRepository;
pub use assessment_result::AssessmentResultRepository;
pub use company_api_key::CompanyApiKeyRepository;
pub use compliance_report::ComplianceReportRepository;
pub use framework::FrameworkRepository;
pub use report_share_link::ReportShareLinkRepository;
