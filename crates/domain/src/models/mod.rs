//! Domain models.

pub mod assessment;
pub mod framework;
pub mod report;
pub mod share_link;

pub use assessment::*;
pub use framework::*;
pub use report::*;
pub use share_link::*;
