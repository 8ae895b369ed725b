use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::ComplianceFilter;
use super::catalog::ComplianceCatalog;
use super::domain::{BadgeTone, ComplianceStatus};
use super::monitoring::MonitoringConfig;
use super::report::views::{ComplianceReportSummary, ComplianceRosterSummary};
use super::report::{ComplianceReport, ComplianceRoster};
use super::resolver::{days_remaining, resolve_status, StatusInputs};
use super::snapshot::EntitySnapshot;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub entity: EntitySnapshot,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub filter: Option<ComplianceFilter>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub today: NaiveDate,
    #[serde(flatten)]
    pub summary: ComplianceReportSummary,
}

#[derive(Debug, Deserialize)]
pub struct RosterRequest {
    pub entities: Vec<EntitySnapshot>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub filter: Option<ComplianceFilter>,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub today: NaiveDate,
    #[serde(flatten)]
    pub summary: ComplianceRosterSummary,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub has_value: bool,
    pub has_expiry: bool,
    #[serde(default = "required_by_default")]
    pub is_required: bool,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub today: NaiveDate,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub tone: BadgeTone,
    pub effective_window_days: u32,
    pub reminder_days: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl StatusResponse {
    pub fn evaluate(request: &StatusRequest, today: NaiveDate) -> Self {
        let inputs = StatusInputs::new(request.has_value, request.has_expiry, request.is_required)
            .with_expiry(request.expiry_date)
            .with_monitoring(&request.monitoring);
        let status = resolve_status(&inputs, today);

        Self {
            today,
            status,
            status_label: status.label(),
            tone: status.tone(),
            effective_window_days: inputs.effective_window_days,
            reminder_days: request.monitoring.active_thresholds(),
            days_remaining: request
                .expiry_date
                .filter(|_| request.has_expiry)
                .map(|expiry| days_remaining(expiry, today)),
        }
    }
}

/// Router exposing report, roster, single-item status and catalog endpoints.
pub fn compliance_router(catalog: Arc<ComplianceCatalog>) -> Router {
    Router::new()
        .route("/api/v1/compliance/report", post(report_handler))
        .route("/api/v1/compliance/roster", post(roster_handler))
        .route("/api/v1/compliance/status", post(status_handler))
        .route("/api/v1/compliance/catalog", get(catalog_handler))
        .with_state(catalog)
}

pub(crate) async fn report_handler(
    State(catalog): State<Arc<ComplianceCatalog>>,
    Json(request): Json<ReportRequest>,
) -> Json<ReportResponse> {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let report = ComplianceReport::build(&catalog, &request.entity, today);
    debug!(entity_id = %report.entity_id, filter = ?request.filter, "serving compliance report");

    Json(ReportResponse {
        today,
        summary: report.summary(request.filter),
    })
}

pub(crate) async fn roster_handler(
    State(catalog): State<Arc<ComplianceCatalog>>,
    Json(request): Json<RosterRequest>,
) -> Json<RosterResponse> {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let roster = ComplianceRoster::build(&catalog, &request.entities, today);
    debug!(entities = roster.reports.len(), filter = ?request.filter, "serving compliance roster");

    Json(RosterResponse {
        today,
        summary: roster.summary(request.filter),
    })
}

pub(crate) async fn status_handler(Json(request): Json<StatusRequest>) -> Json<StatusResponse> {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    Json(StatusResponse::evaluate(&request, today))
}

pub(crate) async fn catalog_handler(
    State(catalog): State<Arc<ComplianceCatalog>>,
) -> Json<ComplianceCatalog> {
    Json(catalog.as_ref().clone())
}

fn required_by_default() -> bool {
    true
}
