use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived classification for a single key number or document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Active,
    Missing,
    ExpiringSoon,
    Expired,
    Incomplete,
    NotApplicable,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Missing => "Missing",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
            Self::Incomplete => "Incomplete",
            Self::NotApplicable => "N/A",
        }
    }

    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Success,
            Self::ExpiringSoon => BadgeTone::Caution,
            Self::Expired | Self::Missing => BadgeTone::Danger,
            Self::Incomplete => BadgeTone::Warning,
            Self::NotApplicable => BadgeTone::Neutral,
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour family used by dashboards when rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Caution,
    Danger,
    Warning,
    Neutral,
}

impl BadgeTone {
    pub const fn color(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Caution => "yellow",
            Self::Danger => "red",
            Self::Warning => "orange",
            Self::Neutral => "gray",
        }
    }
}

/// Kind of profile a key number or document type is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Carrier,
    Driver,
    Asset,
}

impl EntityKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Carrier, Self::Driver, Self::Asset]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Carrier => "Carrier",
            Self::Driver => "Driver",
            Self::Asset => "Asset",
        }
    }
}

/// State of the supporting document column shown beside a key number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Missing,
    NotApplicable,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uploaded => "Uploaded",
            Self::Missing => "Missing",
            Self::NotApplicable => "N/A",
        }
    }

    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::Uploaded => BadgeTone::Success,
            Self::Missing => BadgeTone::Danger,
            Self::NotApplicable => BadgeTone::Neutral,
        }
    }
}
