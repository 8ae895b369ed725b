use crate::infra::reminder_thresholds;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use fleet_compliance::compliance::report::views::{
    ComplianceReportSummary, ComplianceRosterSummary,
};
use fleet_compliance::compliance::router::{StatusRequest, StatusResponse};
use fleet_compliance::compliance::{
    ComplianceCatalog, ComplianceFilter, ComplianceReport, ComplianceRoster, DocumentRecord,
    EntityKind, EntitySnapshot, KeyNumberCsvImporter, KeyNumberValue, MonitoringConfig,
    UploadedFile,
};
use fleet_compliance::config::AppConfig;
use fleet_compliance::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Entity snapshot JSON file
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Catalog JSON file (defaults to APP_CATALOG_PATH, then the built-in catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Optional key-number CSV export merged into the snapshot
    #[arg(long)]
    pub(crate) key_numbers_csv: Option<PathBuf>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only list rows matching this filter chip
    #[arg(long)]
    pub(crate) filter: Option<ComplianceFilter>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Expiry date on file (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) expiry: Option<NaiveDate>,
    /// A number has been entered or a file uploaded
    #[arg(long)]
    pub(crate) has_value: bool,
    /// The item type tracks an expiry date
    #[arg(long)]
    pub(crate) has_expiry: bool,
    /// Treat the item as optional
    #[arg(long)]
    pub(crate) optional: bool,
    /// Switch expiry monitoring off for this item
    #[arg(long)]
    pub(crate) monitoring_disabled: bool,
    /// Enabled reminder thresholds in days
    #[arg(long, value_delimiter = ',', default_value = "30")]
    pub(crate) reminder_days: Vec<u32>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only list rows matching this filter chip
    #[arg(long)]
    pub(crate) filter: Option<ComplianceFilter>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        snapshot,
        catalog,
        key_numbers_csv,
        today,
        filter,
        json,
    } = args;

    let mut compliance = AppConfig::load()?.compliance;
    if catalog.is_some() {
        compliance.catalog_path = catalog;
    }
    let catalog = compliance.load_catalog()?;

    let mut entity = EntitySnapshot::from_path(&snapshot)?;
    if let Some(path) = key_numbers_csv {
        let applied = KeyNumberCsvImporter::from_path(&path, &catalog, &mut entity)?;
        if !json {
            println!("Merged {applied} key numbers from {}", path.display());
        }
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let report = ComplianceReport::build(&catalog, &entity, today);
    let summary = report.summary(filter);

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        render_report(&summary, today);
    }

    Ok(())
}

pub(crate) fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let request = StatusRequest {
        expiry_date: args.expiry,
        has_value: args.has_value,
        has_expiry: args.has_expiry,
        is_required: !args.optional,
        monitoring: MonitoringConfig::new(
            !args.monitoring_disabled,
            reminder_thresholds(&args.reminder_days),
        ),
        today: Some(today),
    };
    let response = StatusResponse::evaluate(&request, today);

    println!(
        "Status: {} ({})",
        response.status_label,
        response.tone.color()
    );
    println!("Effective window: {} days", response.effective_window_days);
    if !response.reminder_days.is_empty() {
        let days: Vec<String> = response
            .reminder_days
            .iter()
            .map(|days| days.to_string())
            .collect();
        println!("Reminders: {} days before expiry", days.join(", "));
    }
    match response.days_remaining {
        Some(days) if days < 0 => println!("Expired {} days ago", -days),
        Some(days) => println!("{days} days remaining"),
        None => println!("No expiry on file"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let catalog = ComplianceCatalog::standard();

    let entities = [demo_carrier(today), demo_driver(today)];

    println!("Fleet compliance demo (evaluated {today})");
    for entity in &entities {
        let report = ComplianceReport::build(&catalog, entity, today);
        println!();
        render_report(&report.summary(args.filter), today);
    }

    let roster = ComplianceRoster::build(&catalog, &entities, today);
    println!();
    render_roster(&roster.summary(args.filter));

    Ok(())
}

fn render_roster(summary: &ComplianceRosterSummary) {
    println!(
        "ROSTER: {} of {} entities compliant ({})",
        summary.compliant, summary.entities, summary.badge.label
    );

    for totals in &summary.totals {
        println!(
            "- {}: {}/{} compliant | {} expired | {} expiring soon",
            totals.entity_label,
            totals.compliant,
            totals.entities,
            totals.counts.expired,
            totals.counts.expiring_soon
        );
    }

    for entry in &summary.entries {
        let name = entry.display_name.as_deref().unwrap_or(entry.entity_id.as_str());
        let failing: Vec<&str> = entry.badge.failing.iter().map(|filter| filter.label()).collect();
        if failing.is_empty() {
            println!("  {} {}: {}", entry.entity_label, name, entry.badge.label);
        } else {
            println!(
                "  {} {}: {} ({})",
                entry.entity_label,
                name,
                entry.badge.label,
                failing.join(", ")
            );
        }
    }
}

fn render_report(summary: &ComplianceReportSummary, today: NaiveDate) {
    let name = summary
        .display_name
        .as_deref()
        .unwrap_or(summary.entity_id.as_str());
    println!("{} compliance: {} (as of {})", summary.entity_label, name, today);

    if summary.badge.compliant {
        println!("Badge: {}", summary.badge.label);
    } else {
        let chips: Vec<String> = ComplianceFilter::ordered()
            .into_iter()
            .filter(|filter| summary.counts.count_for(*filter) > 0)
            .map(|filter| format!("{} {}", summary.counts.count_for(filter), filter.label()))
            .collect();
        println!("Badge: {} ({})", summary.badge.label, chips.join(" | "));
    }

    if let Some(filter) = summary.filter {
        println!("Filter: {}", filter.label());
    }

    for group in &summary.groups {
        println!("\n{}", group.label);
        for row in &group.items {
            let days = match row.days_remaining {
                Some(days) => format!(" ({days} days)"),
                None => String::new(),
            };
            println!(
                "- {}: {} | {} ({}) | expires {}{} | document {} ({})",
                row.name,
                row.value,
                row.status_label,
                row.tone.color(),
                row.expiry,
                days,
                row.document_status_label,
                row.document_tone.color()
            );
        }
    }

    if summary.documents.is_empty() {
        return;
    }

    println!("\nDOCUMENTS");
    for document in &summary.documents {
        let file = document.file_name.as_deref().unwrap_or("no file");
        let expiry = match document.expiry_date {
            Some(date) => date.to_string(),
            None => "-".to_string(),
        };
        println!(
            "- {}: {} | {} | expires {}",
            document.name, document.status_label, file, expiry
        );
    }
}

fn demo_carrier(today: NaiveDate) -> EntitySnapshot {
    EntitySnapshot::new("demo-carrier", EntityKind::Carrier)
        .named("Northwind Freight Lines")
        .with_key_number("kn-dot", KeyNumberValue::new("3141592"))
        .with_key_number("kn-mc", KeyNumberValue::new("MC-271828"))
        .with_key_number(
            "kn-ifta",
            KeyNumberValue::new("IFTA-00451")
                .expiring(today + Duration::days(45))
                .with_document(UploadedFile::new("ifta-license.pdf")),
        )
        .with_key_number(
            "kn-ein",
            KeyNumberValue::new("12-3456789").with_document(UploadedFile::new("ein-letter.pdf")),
        )
        .with_key_number("kn-scac", KeyNumberValue::new("NWFL"))
        .with_key_number(
            "kn-irp",
            KeyNumberValue::new("IRP-88213").expiring(today - Duration::days(10)),
        )
        .with_key_number(
            "kn-ucr",
            KeyNumberValue::new("UCR-2025-11").expiring(today + Duration::days(200)),
        )
        .with_document(
            "doc-cvor",
            DocumentRecord::uploaded(UploadedFile::new("cvor-level-2.pdf"))
                .expiring(today + Duration::days(120)),
        )
        .with_document(
            "doc-surety-bond",
            DocumentRecord::uploaded(UploadedFile::new("bmc-84.pdf"))
                .expiring(today + Duration::days(20)),
        )
}

fn demo_driver(today: NaiveDate) -> EntitySnapshot {
    EntitySnapshot::new("demo-driver", EntityKind::Driver)
        .named("Jamie Ortega")
        .with_key_number(
            "kn-driver-license",
            KeyNumberValue::new("D1234-56789")
                .expiring(today + Duration::days(400))
                .with_document(UploadedFile::new("cdl-front.jpg")),
        )
        .with_key_number(
            "kn-fast-card",
            KeyNumberValue::new("FAST-5521").expiring(today - Duration::days(5)),
        )
        .with_document(
            "doc-medical-certificate",
            DocumentRecord::uploaded(UploadedFile::new("dot-medical.pdf"))
                .expiring(today + Duration::days(25)),
        )
        .with_document(
            "doc-drug-consortium",
            DocumentRecord::uploaded(UploadedFile::new("consortium-enrollment.pdf")),
        )
}
