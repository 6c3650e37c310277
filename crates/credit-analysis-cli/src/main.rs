mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::adjustments::AdjustmentsArgs;
use commands::debt::{DebtServiceArgs, LoanPaymentArgs};
use commands::dscr::{DemoArgs, EntityDscrArgs, GlobalDscrArgs, ProFormaArgs};

/// Global debt-service coverage analysis for commercial borrower groups
#[derive(Parser)]
#[command(
    name = "cra",
    version,
    about = "Global debt-service coverage analysis for commercial borrower groups",
    long_about = "A CLI for credit analysts: normalizes entity cash flow, aggregates \
                  annual debt service and computes entity and global DSCR against \
                  bank policy thresholds, with pro forma modelling of proposed loans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation detail to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate global DSCR across a borrower group
    GlobalDscr(GlobalDscrArgs),
    /// Classify a single cash flow / debt service pair
    EntityDscr(EntityDscrArgs),
    /// Compare current and pro forma global DSCR with proposed loans
    ProForma(ProFormaArgs),
    /// Total annual debt service for a set of obligations
    DebtService(DebtServiceArgs),
    /// Monthly payment on a proposed amortizing loan
    LoanPayment(LoanPaymentArgs),
    /// Summarise cash flow normalization adjustments
    Adjustments(AdjustmentsArgs),
    /// Run global DSCR on the built-in Smith Holdings sample group
    Demo(DemoArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::GlobalDscr(args) => commands::dscr::run_global_dscr(args),
        Commands::EntityDscr(args) => commands::dscr::run_entity_dscr(args),
        Commands::ProForma(args) => commands::dscr::run_pro_forma(args),
        Commands::DebtService(args) => commands::debt::run_debt_service(args),
        Commands::LoanPayment(args) => commands::debt::run_loan_payment(args),
        Commands::Adjustments(args) => commands::adjustments::run_adjustments(args),
        Commands::Demo(args) => commands::dscr::run_demo(args),
        Commands::Version => {
            println!("cra {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
