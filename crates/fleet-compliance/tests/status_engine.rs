use chrono::{Duration, NaiveDate};
use fleet_compliance::compliance::{
    aggregate, monitored_items, resolve_status, ComplianceCatalog, ComplianceFilter,
    ComplianceStatus, EntityKind, EntitySnapshot, KeyNumberValue, MonitoringConfig,
    ReminderThreshold, StatusInputs,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid evaluation date")
}

fn window(days: u32) -> MonitoringConfig {
    MonitoringConfig::new(true, vec![ReminderThreshold::on(days)])
}

fn tracked_item(expiry: Option<NaiveDate>, monitoring: &MonitoringConfig) -> StatusInputs {
    StatusInputs::new(true, true, true)
        .with_expiry(expiry)
        .with_monitoring(monitoring)
}

#[test]
fn expired_yesterday_is_expired() {
    let inputs = tracked_item(Some(today() - Duration::days(1)), &window(30));
    assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Expired);
}

#[test]
fn inside_window_is_expiring_soon() {
    let inputs = tracked_item(Some(today() + Duration::days(15)), &window(30));
    assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::ExpiringSoon);
}

#[test]
fn disabled_monitoring_skips_straight_to_active() {
    let mut monitoring = window(30);
    monitoring.enabled = false;
    let inputs = tracked_item(Some(today() + Duration::days(15)), &monitoring);

    assert_eq!(inputs.effective_window_days, 0);
    assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Active);
}

#[test]
fn value_without_expiry_is_incomplete() {
    let inputs = tracked_item(None, &window(30));
    assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Incomplete);
}

#[test]
fn required_without_value_is_missing_for_any_expiry_state() {
    let expiries = [
        None,
        Some(today() - Duration::days(90)),
        Some(today()),
        Some(today() + Duration::days(5)),
        Some(today() + Duration::days(500)),
    ];

    for expiry in expiries {
        for has_expiry in [true, false] {
            let inputs = StatusInputs::new(false, has_expiry, true)
                .with_expiry(expiry)
                .with_monitoring(&window(30));
            assert_eq!(
                resolve_status(&inputs, today()),
                ComplianceStatus::Missing,
                "expiry {expiry:?}, has_expiry {has_expiry}"
            );
        }
    }
}

#[test]
fn window_boundary_is_inclusive() {
    let monitoring = window(30);

    let on_boundary = tracked_item(Some(today() + Duration::days(30)), &monitoring);
    assert_eq!(
        resolve_status(&on_boundary, today()),
        ComplianceStatus::ExpiringSoon
    );

    let past_boundary = tracked_item(Some(today() + Duration::days(31)), &monitoring);
    assert_eq!(
        resolve_status(&past_boundary, today()),
        ComplianceStatus::Active
    );
}

#[test]
fn effective_window_uses_largest_switched_on_threshold() {
    let monitoring = MonitoringConfig::from_day_flags(true, false, true, true, true);
    assert_eq!(monitoring.effective_window(), 60);

    let inputs = tracked_item(Some(today() + Duration::days(45)), &monitoring);
    assert_eq!(inputs.effective_window_days, 60);
    assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::ExpiringSoon);

    let nothing_on = MonitoringConfig::from_day_flags(true, false, false, false, false);
    assert_eq!(nothing_on.effective_window(), 0);

    let switched_off = MonitoringConfig::from_day_flags(false, true, true, true, true);
    assert_eq!(switched_off.effective_window(), 0);
}

#[test]
fn zero_window_only_flags_items_expiring_today() {
    let monitoring = MonitoringConfig::new(true, Vec::new());
    let expiring_today = tracked_item(Some(today()), &monitoring);
    let tomorrow = tracked_item(Some(today() + Duration::days(1)), &monitoring);

    assert_eq!(
        resolve_status(&expiring_today, today()),
        ComplianceStatus::ExpiringSoon
    );
    assert_eq!(resolve_status(&tomorrow, today()), ComplianceStatus::Active);
}

#[test]
fn empty_entity_is_compliant() {
    let counts = aggregate(&[], today());
    assert_eq!(counts.total, 0);
    assert!(counts.is_compliant());
    assert!(counts.badge().compliant);
    assert_eq!(counts.badge().label, "Compliant");

    let catalog = ComplianceCatalog::default();
    let snapshot = EntitySnapshot::new("carrier-without-catalog", EntityKind::Carrier);
    assert!(monitored_items(&catalog, &snapshot).is_empty());
}

#[test]
fn buckets_are_independent() {
    let catalog = ComplianceCatalog::standard();
    let snapshot = EntitySnapshot::new("carrier-1", EntityKind::Carrier);
    let items = monitored_items(&catalog, &snapshot);
    let counts = aggregate(&items, today());

    // IFTA has no number, no expiry and no licence on file, so it lands in
    // three buckets at once.
    let ifta = items
        .iter()
        .find(|item| item.type_id() == "kn-ifta")
        .expect("ifta tracked");
    let status = ifta.status(today());
    assert_eq!(status, ComplianceStatus::Missing);
    assert!(ComplianceFilter::MissingNumber.matches(ifta, status));
    assert!(ComplianceFilter::MissingExpiry.matches(ifta, status));
    assert!(ComplianceFilter::MissingDoc.matches(ifta, status));

    assert_eq!(counts.missing_number, 7);
    assert_eq!(counts.missing_expiry, 7);
    assert_eq!(counts.missing_doc, 6);
    assert_eq!(counts.expiring_soon, 0);
    assert_eq!(counts.expired, 0);
    assert!(!counts.is_compliant());
    assert_eq!(
        counts.failing_filters(),
        vec![
            ComplianceFilter::MissingNumber,
            ComplianceFilter::MissingExpiry,
            ComplianceFilter::MissingDoc,
        ]
    );
}

#[test]
fn fully_populated_driver_is_compliant() {
    use fleet_compliance::compliance::{DocumentRecord, UploadedFile};

    let catalog = ComplianceCatalog::standard();
    let far = today() + Duration::days(365);
    let snapshot = EntitySnapshot::new("driver-7", EntityKind::Driver)
        .with_key_number(
            "kn-driver-license",
            KeyNumberValue::new("D555-0101")
                .expiring(far)
                .with_document(UploadedFile::new("license.png")),
        )
        .with_key_number("kn-twic", KeyNumberValue::new("TW-1").expiring(far))
        .with_key_number("kn-fast-card", KeyNumberValue::new("FC-1").expiring(far))
        .with_document(
            "doc-medical-certificate",
            DocumentRecord::uploaded(UploadedFile::new("medical.pdf")).expiring(far),
        )
        .with_document(
            "doc-drug-consortium",
            DocumentRecord::uploaded(UploadedFile::new("consortium.pdf")).expiring(far),
        );

    let counts = aggregate(&monitored_items(&catalog, &snapshot), today());
    assert!(counts.is_compliant(), "unexpected counts: {counts:?}");
    assert_eq!(counts.active, counts.total);
    assert_eq!(counts.total, 5);
}

#[test]
fn empty_optional_numbers_keep_driver_compliant() {
    use fleet_compliance::compliance::{DocumentRecord, UploadedFile};

    let catalog = ComplianceCatalog::standard();
    let far = today() + Duration::days(365);
    let snapshot = EntitySnapshot::new("driver-8", EntityKind::Driver)
        .with_key_number(
            "kn-driver-license",
            KeyNumberValue::new("D555-0202")
                .expiring(far)
                .with_document(UploadedFile::new("license.png")),
        )
        .with_document(
            "doc-medical-certificate",
            DocumentRecord::uploaded(UploadedFile::new("medical.pdf")).expiring(far),
        )
        .with_document(
            "doc-drug-consortium",
            DocumentRecord::uploaded(UploadedFile::new("consortium.pdf")).expiring(far),
        );

    let items = monitored_items(&catalog, &snapshot);
    let counts = aggregate(&items, today());

    assert_eq!(counts.missing_expiry, 0);
    assert_eq!(counts.active, 3);
    assert_eq!(counts.total, 5);
    assert!(counts.is_compliant(), "unexpected counts: {counts:?}");

    let twic = items
        .iter()
        .find(|item| item.type_id() == "kn-twic")
        .expect("twic tracked");
    assert_eq!(twic.status(today()), ComplianceStatus::NotApplicable);
}
