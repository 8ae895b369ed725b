use super::domain::EntityKind;
use super::monitoring::MonitoringConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read compliance catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid compliance catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog contains a {kind} with an empty id")]
    EmptyId { kind: &'static str },
    #[error("duplicate {kind} id `{id}` in catalog")]
    DuplicateId { kind: &'static str, id: String },
    #[error("key number `{key_number}` links unknown document type `{document_type}`")]
    UnknownDocumentType {
        key_number: String,
        document_type: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNumberCategory {
    RegulatoryAndSafety,
    TaxAndBusiness,
    CarrierAndIndustryCodes,
    BondAndRegistration,
    Other,
}

impl KeyNumberCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegulatoryAndSafety => "Regulatory and Safety Numbers",
            Self::TaxAndBusiness => "Tax and Business Identification Numbers",
            Self::CarrierAndIndustryCodes => "Carrier & Industry Codes",
            Self::BondAndRegistration => "Bond and Registration Numbers",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Required,
    Optional,
    NotRequired,
}

/// Configured regulatory identifier (DOT number, IFTA licence, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNumberType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "other_category")]
    pub category: KeyNumberCategory,
    pub entity: EntityKind,
    #[serde(default)]
    pub has_expiry: bool,
    #[serde(default = "default_true")]
    pub number_required: bool,
    #[serde(default)]
    pub document_required: bool,
    #[serde(default)]
    pub required_document_type_id: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// Configured document requirement (medical certificate, surety bond, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub id: String,
    pub name: String,
    pub related_to: EntityKind,
    pub requirement_level: RequirementLevel,
    #[serde(default)]
    pub expiry_required: bool,
    #[serde(default)]
    pub issue_date_required: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// Key-number and document-type registries, passed explicitly to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCatalog {
    #[serde(default)]
    pub key_numbers: Vec<KeyNumberType>,
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
}

impl ComplianceCatalog {
    pub fn new(key_numbers: Vec<KeyNumberType>, document_types: Vec<DocumentType>) -> Self {
        Self {
            key_numbers,
            document_types,
        }
    }

    pub fn standard() -> Self {
        Self::new(standard_key_numbers(), standard_document_types())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut document_ids = HashSet::new();
        for document in &self.document_types {
            check_id("document type", &document.id, &mut document_ids)?;
        }

        let mut key_number_ids = HashSet::new();
        for key_number in &self.key_numbers {
            check_id("key number", &key_number.id, &mut key_number_ids)?;
            if let Some(linked) = &key_number.required_document_type_id {
                if !document_ids.contains(linked.as_str()) {
                    return Err(CatalogError::UnknownDocumentType {
                        key_number: key_number.id.clone(),
                        document_type: linked.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn key_number(&self, id: &str) -> Option<&KeyNumberType> {
        self.key_numbers.iter().find(|key_number| key_number.id == id)
    }

    pub fn document_type(&self, id: &str) -> Option<&DocumentType> {
        self.document_types.iter().find(|document| document.id == id)
    }

    /// Active key numbers tracked for `entity`, in catalog order.
    pub fn key_numbers_for(&self, entity: EntityKind) -> Vec<&KeyNumberType> {
        self.key_numbers
            .iter()
            .filter(|key_number| key_number.entity == entity && key_number.active)
            .collect()
    }

    /// Active required document types for `entity`. Types that back a key
    /// number are tracked through that key number and are left out here.
    pub fn document_types_for(&self, entity: EntityKind) -> Vec<&DocumentType> {
        self.document_types
            .iter()
            .filter(|document| {
                document.related_to == entity
                    && document.active
                    && document.requirement_level == RequirementLevel::Required
                    && !self.backs_key_number(&document.id)
            })
            .collect()
    }

    fn backs_key_number(&self, document_type_id: &str) -> bool {
        self.key_numbers.iter().any(|key_number| {
            key_number.active
                && key_number.required_document_type_id.as_deref() == Some(document_type_id)
        })
    }
}

fn check_id<'a>(
    kind: &'static str,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId { kind });
    }
    if !seen.insert(id) {
        return Err(CatalogError::DuplicateId {
            kind,
            id: id.to_owned(),
        });
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn other_category() -> KeyNumberCategory {
    KeyNumberCategory::Other
}

struct KeyNumberSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: KeyNumberCategory,
    entity: EntityKind,
    has_expiry: bool,
    number_required: bool,
    document: Option<&'static str>,
    monitoring: MonitoringConfig,
}

impl From<KeyNumberSeed> for KeyNumberType {
    fn from(seed: KeyNumberSeed) -> Self {
        KeyNumberType {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: seed.category,
            entity: seed.entity,
            has_expiry: seed.has_expiry,
            number_required: seed.number_required,
            document_required: seed.document.is_some(),
            required_document_type_id: seed.document.map(str::to_string),
            active: true,
            monitoring: seed.monitoring,
        }
    }
}

fn standard_key_numbers() -> Vec<KeyNumberType> {
    use EntityKind::{Asset, Carrier, Driver};
    use KeyNumberCategory::*;

    let all_reminders = || MonitoringConfig::from_day_flags(true, true, true, true, true);

    vec![
        KeyNumberSeed {
            id: "kn-dot",
            name: "DOT Number",
            description: "Department of Transportation identification number",
            category: RegulatoryAndSafety,
            entity: Carrier,
            has_expiry: false,
            number_required: true,
            document: None,
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-mc",
            name: "MC Number",
            description: "Motor Carrier operating authority number",
            category: RegulatoryAndSafety,
            entity: Carrier,
            has_expiry: false,
            number_required: true,
            document: None,
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-ifta",
            name: "IFTA License",
            description: "International Fuel Tax Agreement licence",
            category: RegulatoryAndSafety,
            entity: Carrier,
            has_expiry: true,
            number_required: true,
            document: Some("doc-ifta-license"),
            monitoring: MonitoringConfig::from_day_flags(true, false, true, true, false),
        },
        KeyNumberSeed {
            id: "kn-ein",
            name: "EIN",
            description: "Employer Identification Number for tax purposes",
            category: TaxAndBusiness,
            entity: Carrier,
            has_expiry: false,
            number_required: true,
            document: Some("doc-ein"),
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-duns",
            name: "DUNS Number",
            description: "Data Universal Numbering System business identifier",
            category: TaxAndBusiness,
            entity: Carrier,
            has_expiry: false,
            number_required: false,
            document: None,
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-scac",
            name: "SCAC Code",
            description: "Standard Carrier Alpha Code for freight identification",
            category: CarrierAndIndustryCodes,
            entity: Carrier,
            has_expiry: true,
            number_required: true,
            document: Some("doc-scac-assignment"),
            monitoring: MonitoringConfig::default(),
        },
        KeyNumberSeed {
            id: "kn-irp",
            name: "IRP Account",
            description: "International Registration Plan apportioned account",
            category: BondAndRegistration,
            entity: Carrier,
            has_expiry: true,
            number_required: true,
            document: None,
            monitoring: MonitoringConfig::from_day_flags(true, false, true, true, true),
        },
        KeyNumberSeed {
            id: "kn-ucr",
            name: "UCR Registration",
            description: "Unified Carrier Registration",
            category: BondAndRegistration,
            entity: Carrier,
            has_expiry: true,
            number_required: true,
            document: None,
            monitoring: all_reminders(),
        },
        KeyNumberSeed {
            id: "kn-driver-license",
            name: "Driver License",
            description: "Commercial driver licence number",
            category: RegulatoryAndSafety,
            entity: Driver,
            has_expiry: true,
            number_required: true,
            document: Some("doc-driver-license"),
            monitoring: all_reminders(),
        },
        KeyNumberSeed {
            id: "kn-twic",
            name: "TWIC Card",
            description: "Transportation Worker Identification Credential",
            category: RegulatoryAndSafety,
            entity: Driver,
            has_expiry: true,
            number_required: false,
            document: None,
            monitoring: MonitoringConfig::default(),
        },
        KeyNumberSeed {
            id: "kn-fast-card",
            name: "FAST Card",
            description: "Free and Secure Trade driver card",
            category: CarrierAndIndustryCodes,
            entity: Driver,
            has_expiry: true,
            number_required: false,
            document: None,
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-plate",
            name: "License Plate",
            description: "Plate number and registration expiry",
            category: BondAndRegistration,
            entity: Asset,
            has_expiry: true,
            number_required: true,
            document: Some("doc-vehicle-registration"),
            monitoring: MonitoringConfig::default(),
        },
        KeyNumberSeed {
            id: "kn-vin",
            name: "VIN",
            description: "Vehicle Identification Number",
            category: RegulatoryAndSafety,
            entity: Asset,
            has_expiry: false,
            number_required: true,
            document: None,
            monitoring: MonitoringConfig::disabled(),
        },
        KeyNumberSeed {
            id: "kn-transponder",
            name: "Transponder",
            description: "Toll or bypass transponder number",
            category: Other,
            entity: Asset,
            has_expiry: true,
            number_required: false,
            document: None,
            monitoring: MonitoringConfig::default(),
        },
    ]
    .into_iter()
    .map(KeyNumberType::from)
    .collect()
}

fn document(
    id: &str,
    name: &str,
    related_to: EntityKind,
    requirement_level: RequirementLevel,
    expiry_required: bool,
    monitoring: MonitoringConfig,
) -> DocumentType {
    DocumentType {
        id: id.to_string(),
        name: name.to_string(),
        related_to,
        requirement_level,
        expiry_required,
        issue_date_required: expiry_required,
        active: true,
        monitoring,
    }
}

fn standard_document_types() -> Vec<DocumentType> {
    use EntityKind::{Asset, Carrier, Driver};
    use RequirementLevel::{Optional, Required};

    vec![
        document(
            "doc-cvor",
            "CVOR Level 2",
            Carrier,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-ifta-license",
            "IFTA License",
            Carrier,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-ein",
            "EIN Document",
            Carrier,
            Required,
            false,
            MonitoringConfig::disabled(),
        ),
        document(
            "doc-scac-assignment",
            "SCAC Assignment",
            Carrier,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-surety-bond",
            "Surety Bond",
            Carrier,
            Required,
            true,
            MonitoringConfig::from_day_flags(true, true, false, true, false),
        ),
        document(
            "doc-workers-comp",
            "Workers Comp Policy",
            Carrier,
            Required,
            true,
            MonitoringConfig::from_day_flags(true, false, true, true, true),
        ),
        document(
            "doc-operating-authority",
            "Operating Authority",
            Carrier,
            Optional,
            false,
            MonitoringConfig::disabled(),
        ),
        document(
            "doc-driver-license",
            "Driver License",
            Driver,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-medical-certificate",
            "Medical Examiner Certificate",
            Driver,
            Required,
            true,
            MonitoringConfig::from_day_flags(true, false, true, true, false),
        ),
        document(
            "doc-drug-consortium",
            "Drug Consortium",
            Driver,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-training-certificate",
            "Training Certificate",
            Driver,
            Optional,
            false,
            MonitoringConfig::disabled(),
        ),
        document(
            "doc-vehicle-registration",
            "Vehicle Registration",
            Asset,
            Required,
            true,
            MonitoringConfig::default(),
        ),
        document(
            "doc-annual-inspection",
            "Annual Safety Inspection",
            Asset,
            Required,
            true,
            MonitoringConfig::from_day_flags(true, false, true, true, false),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_catalog_is_valid() {
        let catalog = ComplianceCatalog::standard();
        catalog.validate().expect("standard catalog validates");
        assert!(catalog.key_number("kn-dot").is_some());
        assert!(catalog.document_type("doc-medical-certificate").is_some());
    }

    #[test]
    fn entity_filters_skip_linked_and_optional_documents() {
        let catalog = ComplianceCatalog::standard();

        let driver_docs: Vec<&str> = catalog
            .document_types_for(EntityKind::Driver)
            .iter()
            .map(|document| document.id.as_str())
            .collect();
        assert_eq!(driver_docs, vec!["doc-medical-certificate", "doc-drug-consortium"]);

        let driver_numbers = catalog.key_numbers_for(EntityKind::Driver);
        assert!(driver_numbers
            .iter()
            .all(|key_number| key_number.entity == EntityKind::Driver));
        assert_eq!(driver_numbers[0].id, "kn-driver-license");
    }

    #[test]
    fn inactive_key_numbers_are_not_tracked() {
        let mut catalog = ComplianceCatalog::standard();
        for key_number in &mut catalog.key_numbers {
            if key_number.id == "kn-mc" {
                key_number.active = false;
            }
        }

        assert!(catalog
            .key_numbers_for(EntityKind::Carrier)
            .iter()
            .all(|key_number| key_number.id != "kn-mc"));
    }

    #[test]
    fn from_reader_applies_defaults() {
        let json = r#"{
            "key_numbers": [
                { "id": "kn-dot", "name": "DOT Number", "entity": "carrier" }
            ],
            "document_types": [
                { "id": "doc-bond", "name": "Bond", "related_to": "carrier", "requirement_level": "required" }
            ]
        }"#;

        let catalog = ComplianceCatalog::from_reader(Cursor::new(json)).expect("catalog parses");
        let dot = catalog.key_number("kn-dot").expect("dot present");
        assert!(dot.number_required);
        assert!(dot.active);
        assert!(!dot.has_expiry);
        assert_eq!(dot.category, KeyNumberCategory::Other);
        assert_eq!(dot.monitoring.effective_window(), 30);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut catalog = ComplianceCatalog::standard();
        let duplicate = catalog.key_numbers[0].clone();
        catalog.key_numbers.push(duplicate);

        match catalog.validate() {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "key number");
                assert_eq!(id, "kn-dot");
            }
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unknown_document_links() {
        let json = r#"{
            "key_numbers": [
                { "id": "kn-ifta", "name": "IFTA", "entity": "carrier",
                  "document_required": true, "required_document_type_id": "doc-missing" }
            ]
        }"#;

        match ComplianceCatalog::from_reader(Cursor::new(json)) {
            Err(CatalogError::UnknownDocumentType {
                key_number,
                document_type,
            }) => {
                assert_eq!(key_number, "kn-ifta");
                assert_eq!(document_type, "doc-missing");
            }
            other => panic!("expected unknown document type error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_blank_ids() {
        let json = r#"{ "document_types": [
            { "id": " ", "name": "Blank", "related_to": "driver", "requirement_level": "optional" }
        ] }"#;

        assert!(matches!(
            ComplianceCatalog::from_reader(Cursor::new(json)),
            Err(CatalogError::EmptyId { kind: "document type" })
        ));
    }
}
