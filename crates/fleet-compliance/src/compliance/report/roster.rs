use super::super::aggregate::{ComplianceCounts, ComplianceFilter};
use super::super::catalog::ComplianceCatalog;
use super::super::domain::EntityKind;
use super::super::snapshot::EntitySnapshot;
use super::summary::ComplianceReport;
use super::views::{ComplianceRosterSummary, RosterEntryView, RosterTotalsView};
use chrono::NaiveDate;
use tracing::debug;

/// Badges and counts for a list of carriers, drivers and assets evaluated on
/// the same date.
#[derive(Debug, Clone)]
pub struct ComplianceRoster {
    pub today: NaiveDate,
    pub reports: Vec<ComplianceReport>,
}

impl ComplianceRoster {
    pub fn build(
        catalog: &ComplianceCatalog,
        snapshots: &[EntitySnapshot],
        today: NaiveDate,
    ) -> Self {
        let reports: Vec<ComplianceReport> = snapshots
            .iter()
            .map(|snapshot| ComplianceReport::build(catalog, snapshot, today))
            .collect();

        debug!(
            entities = reports.len(),
            compliant = reports.iter().filter(|report| report.is_compliant()).count(),
            "compliance roster built"
        );

        Self { today, reports }
    }

    pub fn counts(&self) -> ComplianceCounts {
        self.reports
            .iter()
            .fold(ComplianceCounts::default(), |mut counts, report| {
                counts += report.counts;
                counts
            })
    }

    /// Totals per entity kind in carrier, driver, asset order. Kinds with no
    /// entity on the roster are left out.
    pub fn totals(&self) -> Vec<RosterTotalsView> {
        EntityKind::ordered()
            .into_iter()
            .filter_map(|entity| {
                let mut totals = RosterTotalsView {
                    entity,
                    entity_label: entity.label(),
                    entities: 0,
                    compliant: 0,
                    counts: ComplianceCounts::default(),
                };

                for report in self.reports.iter().filter(|report| report.entity == entity) {
                    totals.entities += 1;
                    if report.is_compliant() {
                        totals.compliant += 1;
                    }
                    totals.counts += report.counts;
                }

                (totals.entities > 0).then_some(totals)
            })
            .collect()
    }

    /// The filter keeps only entities with at least one item on that chip;
    /// totals always cover the whole roster.
    pub fn summary(&self, filter: Option<ComplianceFilter>) -> ComplianceRosterSummary {
        let entries = self
            .reports
            .iter()
            .filter(|report| filter.map_or(true, |filter| report.counts.count_for(filter) > 0))
            .map(|report| RosterEntryView {
                entity_id: report.entity_id.clone(),
                entity: report.entity,
                entity_label: report.entity.label(),
                display_name: report.display_name.clone(),
                counts: report.counts,
                badge: report.counts.badge(),
            })
            .collect();

        let counts = self.counts();
        ComplianceRosterSummary {
            filter,
            entities: self.reports.len(),
            compliant: self
                .reports
                .iter()
                .filter(|report| report.is_compliant())
                .count(),
            counts,
            badge: counts.badge(),
            totals: self.totals(),
            entries,
        }
    }
}
