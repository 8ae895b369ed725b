mod roster;
mod summary;
pub mod views;

pub use roster::ComplianceRoster;
pub use summary::{ComplianceReport, ComplianceRow};
