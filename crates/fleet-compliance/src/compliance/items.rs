use super::catalog::{
    ComplianceCatalog, DocumentType, KeyNumberCategory, KeyNumberType, RequirementLevel,
};
use super::domain::{ComplianceStatus, DocumentStatus};
use super::monitoring::MonitoringConfig;
use super::resolver::{resolve_status, StatusInputs};
use super::snapshot::{DocumentRecord, EntitySnapshot, KeyNumberValue};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNumberItem {
    pub type_id: String,
    pub name: String,
    pub category: KeyNumberCategory,
    pub value: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub has_expiry: bool,
    pub number_required: bool,
    pub document_required: bool,
    pub has_document: bool,
    pub monitoring: MonitoringConfig,
}

impl KeyNumberItem {
    pub fn new(config: &KeyNumberType, stored: Option<&KeyNumberValue>) -> Self {
        Self {
            type_id: config.id.clone(),
            name: config.name.clone(),
            category: config.category,
            value: stored.and_then(|stored| stored.value.clone()),
            expiry_date: stored.and_then(|stored| stored.expiry_date),
            issue_date: stored.and_then(|stored| stored.issue_date),
            has_expiry: config.has_expiry,
            number_required: config.number_required,
            document_required: config.document_required,
            has_document: stored.is_some_and(KeyNumberValue::has_document),
            monitoring: config.monitoring.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    pub type_id: String,
    pub name: String,
    pub required: bool,
    pub expiry_required: bool,
    pub expiry_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub file_name: Option<String>,
    pub uploaded: bool,
    pub monitoring: MonitoringConfig,
}

impl DocumentItem {
    pub fn new(config: &DocumentType, stored: Option<&DocumentRecord>) -> Self {
        Self {
            type_id: config.id.clone(),
            name: config.name.clone(),
            required: config.requirement_level == RequirementLevel::Required,
            expiry_required: config.expiry_required,
            expiry_date: stored.and_then(|stored| stored.expiry_date),
            issue_date: stored.and_then(|stored| stored.issue_date),
            file_name: stored
                .and_then(|stored| stored.files.first())
                .map(|file| file.file_name.clone()),
            uploaded: stored.is_some_and(DocumentRecord::has_upload),
            monitoring: config.monitoring.clone(),
        }
    }
}

/// Uniform view over key numbers and documents for status computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitoredItem {
    KeyNumber(KeyNumberItem),
    Document(DocumentItem),
}

impl MonitoredItem {
    pub fn type_id(&self) -> &str {
        match self {
            Self::KeyNumber(item) => &item.type_id,
            Self::Document(item) => &item.type_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::KeyNumber(item) => &item.name,
            Self::Document(item) => &item.name,
        }
    }

    pub fn is_key_number(&self) -> bool {
        matches!(self, Self::KeyNumber(_))
    }

    pub fn has_expiry(&self) -> bool {
        match self {
            Self::KeyNumber(item) => item.has_expiry,
            Self::Document(item) => item.expiry_required,
        }
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match self {
            Self::KeyNumber(item) => item.expiry_date,
            Self::Document(item) => item.expiry_date,
        }
    }

    /// Number entered for key numbers, file uploaded for documents.
    pub fn has_value_or_upload(&self) -> bool {
        match self {
            Self::KeyNumber(item) => item.value.is_some(),
            Self::Document(item) => item.uploaded,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::KeyNumber(item) => item.number_required,
            Self::Document(item) => item.required,
        }
    }

    pub fn monitoring(&self) -> &MonitoringConfig {
        match self {
            Self::KeyNumber(item) => &item.monitoring,
            Self::Document(item) => &item.monitoring,
        }
    }

    /// Whether a supporting file is part of this item's requirement.
    pub fn expects_document(&self) -> bool {
        match self {
            Self::KeyNumber(item) => item.document_required,
            Self::Document(item) => item.required,
        }
    }

    pub fn has_document(&self) -> bool {
        match self {
            Self::KeyNumber(item) => item.has_document,
            Self::Document(item) => item.uploaded,
        }
    }

    /// Expiry expected but not recorded. Optional items that were never
    /// filled in are informational and stay out of this bucket.
    pub fn missing_expiry(&self) -> bool {
        self.has_expiry()
            && self.expiry_date().is_none()
            && (self.has_value_or_upload() || self.is_required())
    }

    pub fn missing_document(&self) -> bool {
        self.expects_document() && !self.has_document()
    }

    pub fn document_status(&self) -> DocumentStatus {
        if self.has_document() {
            DocumentStatus::Uploaded
        } else if self.expects_document() {
            DocumentStatus::Missing
        } else {
            DocumentStatus::NotApplicable
        }
    }

    pub fn status_inputs(&self) -> StatusInputs {
        StatusInputs::new(
            self.has_value_or_upload(),
            self.has_expiry(),
            self.is_required(),
        )
        .with_expiry(self.expiry_date())
        .with_monitoring(self.monitoring())
    }

    pub fn status(&self, today: NaiveDate) -> ComplianceStatus {
        resolve_status(&self.status_inputs(), today)
    }
}

/// Map every tracked catalog entry for the snapshot's entity kind onto a
/// monitored item: key numbers first, then standalone document requirements.
pub fn monitored_items(catalog: &ComplianceCatalog, snapshot: &EntitySnapshot) -> Vec<MonitoredItem> {
    let key_numbers = catalog
        .key_numbers_for(snapshot.entity)
        .into_iter()
        .map(|config| {
            MonitoredItem::KeyNumber(KeyNumberItem::new(config, snapshot.key_number(&config.id)))
        });

    let documents = catalog
        .document_types_for(snapshot.entity)
        .into_iter()
        .map(|config| MonitoredItem::Document(DocumentItem::new(config, snapshot.document(&config.id))));

    key_numbers.chain(documents).collect()
}
