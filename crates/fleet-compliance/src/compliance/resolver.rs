use super::domain::ComplianceStatus;
use super::monitoring::MonitoringConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the status rules look at for one item. `today` is passed
/// separately so the same inputs can be replayed against any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInputs {
    pub expiry_date: Option<NaiveDate>,
    pub monitoring_enabled: bool,
    pub effective_window_days: u32,
    pub has_value: bool,
    pub has_expiry: bool,
    pub is_required: bool,
}

impl StatusInputs {
    pub fn new(has_value: bool, has_expiry: bool, is_required: bool) -> Self {
        Self {
            expiry_date: None,
            monitoring_enabled: false,
            effective_window_days: 0,
            has_value,
            has_expiry,
            is_required,
        }
    }

    pub fn with_expiry(mut self, expiry_date: Option<NaiveDate>) -> Self {
        self.expiry_date = expiry_date;
        self
    }

    pub fn with_monitoring(mut self, monitoring: &MonitoringConfig) -> Self {
        self.monitoring_enabled = monitoring.enabled;
        self.effective_window_days = monitoring.effective_window();
        self
    }
}

/// Whole days from `today` until `expiry`; negative once the date has passed.
pub fn days_remaining(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Classify an item. Rules are evaluated in order and the first match wins:
/// a required item without a value is `Missing` whatever its dates say.
pub fn resolve_status(inputs: &StatusInputs, today: NaiveDate) -> ComplianceStatus {
    if !inputs.has_value {
        return if inputs.is_required {
            ComplianceStatus::Missing
        } else {
            ComplianceStatus::NotApplicable
        };
    }

    if !inputs.has_expiry {
        return ComplianceStatus::Active;
    }

    let Some(expiry) = inputs.expiry_date else {
        return ComplianceStatus::Incomplete;
    };

    // Expiring today still counts as valid.
    if expiry < today {
        return ComplianceStatus::Expired;
    }

    if inputs.monitoring_enabled
        && days_remaining(expiry, today) <= i64::from(inputs.effective_window_days)
    {
        ComplianceStatus::ExpiringSoon
    } else {
        ComplianceStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn tracked(expiry: Option<NaiveDate>, window: u32) -> StatusInputs {
        StatusInputs {
            expiry_date: expiry,
            monitoring_enabled: true,
            effective_window_days: window,
            has_value: true,
            has_expiry: true,
            is_required: true,
        }
    }

    #[test]
    fn missing_wins_over_expired_date() {
        let mut inputs = tracked(Some(today() - Duration::days(40)), 30);
        inputs.has_value = false;
        assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Missing);
    }

    #[test]
    fn optional_item_without_value_is_not_applicable() {
        let inputs = StatusInputs::new(false, true, false);
        assert_eq!(
            resolve_status(&inputs, today()),
            ComplianceStatus::NotApplicable
        );
    }

    #[test]
    fn expiry_today_is_not_expired() {
        let inputs = tracked(Some(today()), 0);
        assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::ExpiringSoon);

        let mut unmonitored = inputs;
        unmonitored.monitoring_enabled = false;
        assert_eq!(resolve_status(&unmonitored, today()), ComplianceStatus::Active);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let on_edge = tracked(Some(today() + Duration::days(30)), 30);
        assert_eq!(resolve_status(&on_edge, today()), ComplianceStatus::ExpiringSoon);

        let past_edge = tracked(Some(today() + Duration::days(31)), 30);
        assert_eq!(resolve_status(&past_edge, today()), ComplianceStatus::Active);
    }

    #[test]
    fn value_without_expiry_is_incomplete() {
        let inputs = tracked(None, 30);
        assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Incomplete);
    }

    #[test]
    fn untracked_expiry_is_active() {
        let inputs = StatusInputs::new(true, false, true)
            .with_expiry(Some(today() - Duration::days(3)));
        assert_eq!(resolve_status(&inputs, today()), ComplianceStatus::Active);
    }

    #[test]
    fn with_monitoring_copies_window() {
        let monitoring = MonitoringConfig::from_day_flags(true, true, false, true, false);
        let inputs = StatusInputs::new(true, true, true).with_monitoring(&monitoring);
        assert!(inputs.monitoring_enabled);
        assert_eq!(inputs.effective_window_days, 90);
    }

    #[test]
    fn days_remaining_is_signed() {
        assert_eq!(days_remaining(today() + Duration::days(5), today()), 5);
        assert_eq!(days_remaining(today() - Duration::days(2), today()), -2);
    }
}
