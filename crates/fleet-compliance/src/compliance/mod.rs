//! Compliance status engine for carrier, driver and asset profiles.
//!
//! Statuses are never stored: every call recomputes them from the catalog,
//! the entity snapshot and the evaluation date.

pub mod aggregate;
pub mod catalog;
pub mod domain;
pub mod items;
pub mod monitoring;
pub mod report;
pub mod resolver;
pub mod router;
pub mod snapshot;

pub use aggregate::{aggregate, ComplianceBadge, ComplianceCounts, ComplianceFilter};
pub use catalog::{
    CatalogError, ComplianceCatalog, DocumentType, KeyNumberCategory, KeyNumberType,
    RequirementLevel,
};
pub use domain::{BadgeTone, ComplianceStatus, DocumentStatus, EntityKind};
pub use items::{monitored_items, DocumentItem, KeyNumberItem, MonitoredItem};
pub use monitoring::{MonitoringConfig, ReminderThreshold};
pub use report::{ComplianceReport, ComplianceRoster, ComplianceRow};
pub use resolver::{days_remaining, resolve_status, StatusInputs};
pub use router::compliance_router;
pub use snapshot::{
    DocumentRecord, EntitySnapshot, KeyNumberCsvImporter, KeyNumberValue, SnapshotError,
    UploadedFile,
};
