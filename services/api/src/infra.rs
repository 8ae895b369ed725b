use chrono::NaiveDate;
use fleet_compliance::compliance::monitoring::ReminderThreshold;
use fleet_compliance::compliance::snapshot;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    snapshot::parse_date(raw)
}

/// Turn `--reminder-days 60,30` into switched-on thresholds.
pub(crate) fn reminder_thresholds(days: &[u32]) -> Vec<ReminderThreshold> {
    days.iter().copied().map(ReminderThreshold::on).collect()
}
