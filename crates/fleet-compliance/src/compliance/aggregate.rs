use super::domain::ComplianceStatus;
use super::items::MonitoredItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// Dashboard filter chip. Each chip is an independent test, so one item can
/// match several chips at once (e.g. missing its number and its expiry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceFilter {
    MissingNumber,
    MissingExpiry,
    MissingDoc,
    ExpiringSoon,
    Expired,
}

impl ComplianceFilter {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::MissingNumber,
            Self::MissingExpiry,
            Self::MissingDoc,
            Self::ExpiringSoon,
            Self::Expired,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::MissingNumber => "missing-number",
            Self::MissingExpiry => "missing-expiry",
            Self::MissingDoc => "missing-doc",
            Self::ExpiringSoon => "expiring-soon",
            Self::Expired => "expired",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingNumber => "Missing Number",
            Self::MissingExpiry => "Missing Expiry",
            Self::MissingDoc => "Missing Document",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }

    pub fn matches(self, item: &MonitoredItem, status: ComplianceStatus) -> bool {
        match self {
            Self::MissingNumber => item.is_key_number() && status == ComplianceStatus::Missing,
            Self::MissingExpiry => item.missing_expiry(),
            Self::MissingDoc => item.missing_document(),
            Self::ExpiringSoon => status == ComplianceStatus::ExpiringSoon,
            Self::Expired => status == ComplianceStatus::Expired,
        }
    }
}

impl fmt::Display for ComplianceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown compliance filter '{0}' (expected missing-number, missing-expiry, missing-doc, expiring-soon or expired)"
)]
pub struct UnknownFilter(pub String);

impl FromStr for ComplianceFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "expiring" {
            return Ok(Self::ExpiringSoon);
        }

        Self::ordered()
            .into_iter()
            .find(|filter| filter.key() == normalized)
            .ok_or_else(|| UnknownFilter(value.to_string()))
    }
}

/// Per-entity roll-up backing the dashboard filter chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCounts {
    pub missing_number: usize,
    pub missing_expiry: usize,
    pub missing_doc: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub active: usize,
    pub total: usize,
}

impl ComplianceCounts {
    pub fn record(&mut self, item: &MonitoredItem, status: ComplianceStatus) {
        self.total += 1;
        if status == ComplianceStatus::Active {
            self.active += 1;
        }

        for filter in ComplianceFilter::ordered() {
            if filter.matches(item, status) {
                *self.bucket_mut(filter) += 1;
            }
        }
    }

    pub fn count_for(&self, filter: ComplianceFilter) -> usize {
        match filter {
            ComplianceFilter::MissingNumber => self.missing_number,
            ComplianceFilter::MissingExpiry => self.missing_expiry,
            ComplianceFilter::MissingDoc => self.missing_doc,
            ComplianceFilter::ExpiringSoon => self.expiring_soon,
            ComplianceFilter::Expired => self.expired,
        }
    }

    fn bucket_mut(&mut self, filter: ComplianceFilter) -> &mut usize {
        match filter {
            ComplianceFilter::MissingNumber => &mut self.missing_number,
            ComplianceFilter::MissingExpiry => &mut self.missing_expiry,
            ComplianceFilter::MissingDoc => &mut self.missing_doc,
            ComplianceFilter::ExpiringSoon => &mut self.expiring_soon,
            ComplianceFilter::Expired => &mut self.expired,
        }
    }

    pub fn is_compliant(&self) -> bool {
        ComplianceFilter::ordered()
            .into_iter()
            .all(|filter| self.count_for(filter) == 0)
    }

    pub fn failing_filters(&self) -> Vec<ComplianceFilter> {
        ComplianceFilter::ordered()
            .into_iter()
            .filter(|filter| self.count_for(*filter) > 0)
            .collect()
    }

    pub fn badge(&self) -> ComplianceBadge {
        let failing = self.failing_filters();
        ComplianceBadge {
            compliant: failing.is_empty(),
            label: if failing.is_empty() {
                "Compliant"
            } else {
                "Action Required"
            },
            failing,
        }
    }
}

impl AddAssign for ComplianceCounts {
    fn add_assign(&mut self, other: Self) {
        self.missing_number += other.missing_number;
        self.missing_expiry += other.missing_expiry;
        self.missing_doc += other.missing_doc;
        self.expiring_soon += other.expiring_soon;
        self.expired += other.expired;
        self.active += other.active;
        self.total += other.total;
    }
}

/// Single "Compliant" badge or the list of failing chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceBadge {
    pub compliant: bool,
    pub label: &'static str,
    pub failing: Vec<ComplianceFilter>,
}

/// Resolve every item against `today` and roll the results into counts.
pub fn aggregate(items: &[MonitoredItem], today: NaiveDate) -> ComplianceCounts {
    items.iter().fold(ComplianceCounts::default(), |mut counts, item| {
        counts.record(item, item.status(today));
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::catalog::KeyNumberCategory;
    use crate::compliance::items::{DocumentItem, KeyNumberItem};
    use crate::compliance::monitoring::MonitoringConfig;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn key_number(value: Option<&str>, expiry: Option<NaiveDate>) -> KeyNumberItem {
        KeyNumberItem {
            type_id: "kn-test".to_string(),
            name: "Test Number".to_string(),
            category: KeyNumberCategory::Other,
            value: value.map(str::to_string),
            expiry_date: expiry,
            issue_date: None,
            has_expiry: true,
            number_required: true,
            document_required: true,
            has_document: false,
            monitoring: MonitoringConfig::default(),
        }
    }

    fn document(uploaded: bool, expiry: Option<NaiveDate>) -> DocumentItem {
        DocumentItem {
            type_id: "doc-test".to_string(),
            name: "Test Document".to_string(),
            required: true,
            expiry_required: true,
            expiry_date: expiry,
            issue_date: None,
            file_name: uploaded.then(|| "scan.pdf".to_string()),
            uploaded,
            monitoring: MonitoringConfig::default(),
        }
    }

    #[test]
    fn empty_entity_is_compliant() {
        let counts = aggregate(&[], today());
        assert_eq!(counts, ComplianceCounts::default());
        assert!(counts.is_compliant());
        assert_eq!(counts.badge().label, "Compliant");
    }

    #[test]
    fn buckets_are_not_mutually_exclusive() {
        let items = vec![MonitoredItem::KeyNumber(key_number(None, None))];
        let counts = aggregate(&items, today());

        assert_eq!(counts.missing_number, 1);
        assert_eq!(counts.missing_expiry, 1);
        assert_eq!(counts.missing_doc, 1);
        assert_eq!(counts.expired, 0);
        assert!(!counts.is_compliant());
        assert_eq!(
            counts.failing_filters(),
            vec![
                ComplianceFilter::MissingNumber,
                ComplianceFilter::MissingExpiry,
                ComplianceFilter::MissingDoc
            ]
        );
    }

    #[test]
    fn missing_documents_do_not_count_as_missing_numbers() {
        let items = vec![MonitoredItem::Document(document(false, None))];
        let counts = aggregate(&items, today());

        assert_eq!(counts.missing_number, 0);
        assert_eq!(counts.missing_doc, 1);
        assert_eq!(counts.missing_expiry, 1);
    }

    #[test]
    fn expiry_buckets_follow_status() {
        let mut expiring = key_number(Some("A-1"), Some(today() + Duration::days(10)));
        expiring.has_document = true;
        let mut expired = key_number(Some("A-2"), Some(today() - Duration::days(1)));
        expired.has_document = true;
        let mut healthy = key_number(Some("A-3"), Some(today() + Duration::days(200)));
        healthy.has_document = true;

        let items = vec![
            MonitoredItem::KeyNumber(expiring),
            MonitoredItem::KeyNumber(expired),
            MonitoredItem::KeyNumber(healthy),
            MonitoredItem::Document(document(true, Some(today() + Duration::days(400)))),
        ];
        let counts = aggregate(&items, today());

        assert_eq!(counts.expiring_soon, 1);
        assert_eq!(counts.expired, 1);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.total, 4);
        assert_eq!(
            counts.badge().failing,
            vec![ComplianceFilter::ExpiringSoon, ComplianceFilter::Expired]
        );
    }

    #[test]
    fn counts_sum_across_entities() {
        let mut fleet = aggregate(
            &[MonitoredItem::KeyNumber(key_number(None, None))],
            today(),
        );
        fleet += aggregate(
            &[MonitoredItem::Document(document(true, Some(today() - Duration::days(2))))],
            today(),
        );

        assert_eq!(fleet.total, 2);
        assert_eq!(fleet.missing_number, 1);
        assert_eq!(fleet.missing_expiry, 1);
        assert_eq!(fleet.missing_doc, 1);
        assert_eq!(fleet.expired, 1);
        assert_eq!(fleet.active, 0);
    }

    #[test]
    fn filters_parse_from_cli_spellings() {
        assert_eq!(
            "missing-number".parse::<ComplianceFilter>(),
            Ok(ComplianceFilter::MissingNumber)
        );
        assert_eq!(
            "MISSING_DOC".parse::<ComplianceFilter>(),
            Ok(ComplianceFilter::MissingDoc)
        );
        assert_eq!(
            "expiring".parse::<ComplianceFilter>(),
            Ok(ComplianceFilter::ExpiringSoon)
        );
        assert!("overdue".parse::<ComplianceFilter>().is_err());

        let json = serde_json::to_string(&ComplianceFilter::MissingExpiry).expect("serialize");
        assert_eq!(json, "\"missing-expiry\"");
    }
}
