use super::super::aggregate::{ComplianceBadge, ComplianceCounts, ComplianceFilter};
use super::super::domain::{BadgeTone, ComplianceStatus, DocumentStatus, EntityKind};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct KeyNumberRowView {
    pub type_id: String,
    pub name: String,
    pub value: String,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub tone: BadgeTone,
    pub expiry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    pub document_status: DocumentStatus,
    pub document_status_label: &'static str,
    pub document_tone: BadgeTone,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceGroupView {
    pub key: String,
    pub label: String,
    pub items: Vec<KeyNumberRowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentRowView {
    pub type_id: String,
    pub name: String,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub tone: BadgeTone,
    pub file_name: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReportSummary {
    pub entity_id: String,
    pub entity: EntityKind,
    pub entity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ComplianceFilter>,
    pub counts: ComplianceCounts,
    pub badge: ComplianceBadge,
    pub groups: Vec<ComplianceGroupView>,
    pub documents: Vec<DocumentRowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntryView {
    pub entity_id: String,
    pub entity: EntityKind,
    pub entity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub counts: ComplianceCounts,
    pub badge: ComplianceBadge,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterTotalsView {
    pub entity: EntityKind,
    pub entity_label: &'static str,
    pub entities: usize,
    pub compliant: usize,
    pub counts: ComplianceCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceRosterSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ComplianceFilter>,
    pub entities: usize,
    pub compliant: usize,
    pub counts: ComplianceCounts,
    pub badge: ComplianceBadge,
    pub totals: Vec<RosterTotalsView>,
    pub entries: Vec<RosterEntryView>,
}
