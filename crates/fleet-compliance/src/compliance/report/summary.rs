use super::super::aggregate::{ComplianceCounts, ComplianceFilter};
use super::super::catalog::{ComplianceCatalog, KeyNumberCategory};
use super::super::domain::{ComplianceStatus, EntityKind};
use super::super::items::{monitored_items, MonitoredItem};
use super::super::resolver::days_remaining;
use super::super::snapshot::EntitySnapshot;
use super::views::{ComplianceGroupView, ComplianceReportSummary, DocumentRowView, KeyNumberRowView};
use chrono::NaiveDate;
use tracing::debug;

const NOT_ENTERED: &str = "Not entered";
const NOT_SET: &str = "Not set";
const NOT_TRACKED: &str = "-";

/// One monitored item together with its status on the report date.
#[derive(Debug, Clone)]
pub struct ComplianceRow {
    pub item: MonitoredItem,
    pub status: ComplianceStatus,
    pub days_remaining: Option<i64>,
}

impl ComplianceRow {
    pub fn evaluate(item: MonitoredItem, today: NaiveDate) -> Self {
        let status = item.status(today);
        let days_remaining = if item.has_expiry() {
            item.expiry_date().map(|expiry| days_remaining(expiry, today))
        } else {
            None
        };

        Self {
            item,
            status,
            days_remaining,
        }
    }

    pub fn matches(&self, filter: Option<ComplianceFilter>) -> bool {
        filter.map_or(true, |filter| filter.matches(&self.item, self.status))
    }

    fn expiry_display(&self) -> String {
        match (self.item.has_expiry(), self.item.expiry_date()) {
            (false, _) => NOT_TRACKED.to_string(),
            (true, None) => NOT_SET.to_string(),
            (true, Some(expiry)) => expiry.format("%Y-%m-%d").to_string(),
        }
    }

    fn to_key_number_view(&self) -> Option<(KeyNumberCategory, KeyNumberRowView)> {
        let MonitoredItem::KeyNumber(item) = &self.item else {
            return None;
        };
        let document_status = self.item.document_status();

        let view = KeyNumberRowView {
            type_id: item.type_id.clone(),
            name: item.name.clone(),
            value: item
                .value
                .clone()
                .unwrap_or_else(|| NOT_ENTERED.to_string()),
            status: self.status,
            status_label: self.status.label(),
            tone: self.status.tone(),
            expiry: self.expiry_display(),
            days_remaining: self.days_remaining,
            document_status,
            document_status_label: document_status.label(),
            document_tone: document_status.tone(),
        };
        Some((item.category, view))
    }

    fn to_document_view(&self) -> Option<DocumentRowView> {
        let MonitoredItem::Document(item) = &self.item else {
            return None;
        };

        Some(DocumentRowView {
            type_id: item.type_id.clone(),
            name: item.name.clone(),
            status: self.status,
            status_label: self.status.label(),
            tone: self.status.tone(),
            file_name: item.file_name.clone(),
            issue_date: item.issue_date,
            expiry_date: item.expiry_date,
            days_remaining: self.days_remaining,
        })
    }
}

/// Evaluated compliance state for one carrier, driver or asset.
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    pub entity_id: String,
    pub entity: EntityKind,
    pub display_name: Option<String>,
    pub today: NaiveDate,
    pub counts: ComplianceCounts,
    pub rows: Vec<ComplianceRow>,
}

impl ComplianceReport {
    pub fn build(catalog: &ComplianceCatalog, snapshot: &EntitySnapshot, today: NaiveDate) -> Self {
        let mut counts = ComplianceCounts::default();
        let rows: Vec<ComplianceRow> = monitored_items(catalog, snapshot)
            .into_iter()
            .map(|item| {
                let row = ComplianceRow::evaluate(item, today);
                counts.record(&row.item, row.status);
                row
            })
            .collect();

        debug!(
            entity_id = %snapshot.entity_id,
            entity = snapshot.entity.label(),
            total = counts.total,
            missing_number = counts.missing_number,
            missing_expiry = counts.missing_expiry,
            missing_doc = counts.missing_doc,
            expiring_soon = counts.expiring_soon,
            expired = counts.expired,
            "compliance report built"
        );

        Self {
            entity_id: snapshot.entity_id.clone(),
            entity: snapshot.entity,
            display_name: snapshot.display_name.clone(),
            today,
            counts,
            rows,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.counts.is_compliant()
    }

    pub fn row(&self, type_id: &str) -> Option<&ComplianceRow> {
        self.rows.iter().find(|row| row.item.type_id() == type_id)
    }

    pub fn rows_matching(
        &self,
        filter: Option<ComplianceFilter>,
    ) -> impl Iterator<Item = &ComplianceRow> + '_ {
        self.rows.iter().filter(move |row| row.matches(filter))
    }

    /// Key-number rows grouped by category in catalog order. Groups left
    /// empty by the filter are dropped.
    pub fn groups(&self, filter: Option<ComplianceFilter>) -> Vec<ComplianceGroupView> {
        let mut groups: Vec<ComplianceGroupView> = Vec::new();

        for (category, view) in self
            .rows_matching(filter)
            .filter_map(ComplianceRow::to_key_number_view)
        {
            let label = category.label();
            let key = group_key(label);
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.items.push(view),
                None => groups.push(ComplianceGroupView {
                    key,
                    label: label.to_uppercase(),
                    items: vec![view],
                }),
            }
        }

        groups
    }

    pub fn documents(&self, filter: Option<ComplianceFilter>) -> Vec<DocumentRowView> {
        self.rows_matching(filter)
            .filter_map(ComplianceRow::to_document_view)
            .collect()
    }

    /// Counts always describe the whole entity; the filter only narrows rows.
    pub fn summary(&self, filter: Option<ComplianceFilter>) -> ComplianceReportSummary {
        ComplianceReportSummary {
            entity_id: self.entity_id.clone(),
            entity: self.entity,
            entity_label: self.entity.label(),
            display_name: self.display_name.clone(),
            filter,
            counts: self.counts,
            badge: self.counts.badge(),
            groups: self.groups(filter),
            documents: self.documents(filter),
        }
    }
}

fn group_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;

    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    key
}
