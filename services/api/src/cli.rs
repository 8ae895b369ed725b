use crate::demo::{run_demo, run_report, run_status, DemoArgs, ReportArgs, StatusArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_compliance::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Compliance",
    about = "Evaluate carrier, driver and asset compliance from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a stored entity snapshot and print its compliance report
    Report(ReportArgs),
    /// Resolve the status of a single key number or document
    Status(StatusArgs),
    /// Render reports for built-in carrier and driver profiles
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured catalog JSON file
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Status(args) => run_status(args),
        Command::Demo(args) => run_demo(args),
    }
}
