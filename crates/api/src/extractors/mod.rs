//! Request extractors.

pub mod company_auth;

pub use company_auth::CompanyAuth;
