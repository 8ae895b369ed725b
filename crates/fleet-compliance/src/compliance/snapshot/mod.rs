//! Point-in-time values held for one carrier, driver or asset.
//!
//! Snapshots arrive from whatever store owns profile data. Dates are
//! normalized here: anything that is not a `YYYY-MM-DD` date is treated as
//! "not entered" so the status engine only ever sees well-formed input.

mod import;

pub use import::KeyNumberCsvImporter;

use super::domain::EntityKind;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read entity snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid entity snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid key number CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub uploaded_on: Option<NaiveDate>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            uploaded_on: None,
        }
    }
}

/// Stored number, dates and attachments for one key number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNumberValue {
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub documents: Vec<UploadedFile>,
}

impl KeyNumberValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: non_blank(value.into()),
            ..Self::default()
        }
    }

    pub fn expiring(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn with_document(mut self, file: UploadedFile) -> Self {
        self.documents.push(file);
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_document(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Uploaded files and dates recorded against one document type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

impl DocumentRecord {
    pub fn uploaded(file: UploadedFile) -> Self {
        Self {
            files: vec![file],
            ..Self::default()
        }
    }

    pub fn expiring(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn has_upload(&self) -> bool {
        !self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: String,
    pub entity: EntityKind,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub key_numbers: BTreeMap<String, KeyNumberValue>,
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentRecord>,
}

impl EntitySnapshot {
    pub fn new(entity_id: impl Into<String>, entity: EntityKind) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity,
            display_name: None,
            key_numbers: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }

    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_key_number(mut self, type_id: impl Into<String>, value: KeyNumberValue) -> Self {
        self.key_numbers.insert(type_id.into(), value);
        self
    }

    pub fn with_document(mut self, type_id: impl Into<String>, record: DocumentRecord) -> Self {
        self.documents.insert(type_id.into(), record);
        self
    }

    pub fn key_number(&self, type_id: &str) -> Option<&KeyNumberValue> {
        self.key_numbers.get(type_id)
    }

    pub fn document(&self, type_id: &str) -> Option<&DocumentRecord> {
        self.documents.get(type_id)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Strict `YYYY-MM-DD` parse used by CLI flags and the CSV importer.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parse a stored date, treating blanks and malformed values as absent.
pub fn normalize_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(reason) => {
            warn!(%reason, "ignoring malformed stored date");
            None
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(text)) => normalize_date(Some(&text)),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            warn!(value = %other, "ignoring non-string stored date");
            None
        }
    })
}

/// Numbers and booleans are kept as their text form; stores often hold DOT
/// or EIN numbers as JSON integers.
fn lenient_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(text)) => non_blank(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            warn!(value = %other, "ignoring structured key number value");
            None
        }
    })
}
