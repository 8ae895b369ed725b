use super::{normalize_date, EntitySnapshot, KeyNumberValue, SnapshotError, UploadedFile};
use crate::compliance::catalog::ComplianceCatalog;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Merges key-number values from a spreadsheet export into a snapshot.
///
/// Expected headers: `Key Number,Value,Expiry Date,Issue Date,Document`. The
/// `Key Number` column may hold either the catalog id or its display name.
pub struct KeyNumberCsvImporter;

impl KeyNumberCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &ComplianceCatalog,
        snapshot: &mut EntitySnapshot,
    ) -> Result<usize, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog, snapshot)
    }

    /// Returns the number of rows applied to the snapshot.
    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &ComplianceCatalog,
        snapshot: &mut EntitySnapshot,
    ) -> Result<usize, SnapshotError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let tracked = catalog.key_numbers_for(snapshot.entity);
        let mut applied: HashSet<String> = HashSet::new();

        for row in csv_reader.deserialize::<KeyNumberRow>() {
            let row = row?;
            let Some(config) = tracked.iter().find(|config| {
                config.id == row.key_number || config.name.eq_ignore_ascii_case(&row.key_number)
            }) else {
                warn!(key_number = %row.key_number, entity = ?snapshot.entity, "skipping unknown key number row");
                continue;
            };

            if !applied.insert(config.id.clone()) {
                debug!(key_number = %config.id, "duplicate key number row ignored");
                continue;
            }

            let mut value = KeyNumberValue {
                value: row.value,
                expiry_date: normalize_date(row.expiry_date.as_deref()),
                issue_date: normalize_date(row.issue_date.as_deref()),
                documents: Vec::new(),
            };
            if let Some(file_name) = row.document {
                value.documents.push(UploadedFile::new(file_name));
            }

            snapshot.key_numbers.insert(config.id.clone(), value);
        }

        Ok(applied.len())
    }
}

#[derive(Debug, Deserialize)]
struct KeyNumberRow {
    #[serde(rename = "Key Number")]
    key_number: String,
    #[serde(rename = "Value", default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(
        rename = "Expiry Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    expiry_date: Option<String>,
    #[serde(
        rename = "Issue Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    issue_date: Option<String>,
    #[serde(rename = "Document", default, deserialize_with = "empty_string_as_none")]
    document: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
