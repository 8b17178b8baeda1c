use crate::commands::{run_calculate, run_options, CalculateArgs, OptionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recalc::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ReCalc",
    about = "Serve or query the tuition scholarship calculator",
    version
)]
struct Cli {
    #[command(flatten)]
    catalog: CatalogArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a single selection and print the quote
    Calculate(CalculateArgs),
    /// List the choices available for the given level and modality
    Options(OptionsArgs),
}

/// Overrides for the reference data locations.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// Rule table (JSON or CSV); defaults to RECALC_RULES_PATH
    #[arg(long, global = true)]
    pub(crate) rules: Option<PathBuf>,
    /// Campus metadata JSON; defaults to RECALC_CAMPUS_META_PATH
    #[arg(long, global = true)]
    pub(crate) campus_meta: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, cli.catalog).await,
        Command::Calculate(args) => run_calculate(args, cli.catalog),
        Command::Options(args) => run_options(args, cli.catalog),
    }
}
