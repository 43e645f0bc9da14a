//! # vrs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Every command operates on a JSON ledger snapshot file selected with the
//! global `--ledger` flag.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vrs_cli::registry::{run_registry, RegistryArgs};
use vrs_cli::show::{run_show, ShowArgs};
use vrs_cli::snapshot::cmd_init;
use vrs_cli::transfer::{run_transfer, TransferArgs};

/// Vehicle Registration Stack CLI
///
/// Vehicle registration, government approval, stolen reporting and
/// recovery, and the ownership-transfer escrow lifecycle, operating on a
/// local JSON ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "vrs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ledger snapshot file.
    #[arg(long, global = true, default_value = "vrs-ledger.json")]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new ledger snapshot governed by an approval authority.
    Init {
        /// The approval authority's wallet address.
        #[arg(long)]
        authority: String,
    },

    /// User/vehicle registration, approval decisions, and stolen/recovery.
    Registry(RegistryArgs),

    /// The ownership-transfer escrow lifecycle (request, accept, decide).
    Transfer(TransferArgs),

    /// Read-only views: records, histories, balances, events.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(ledger = %cli.ledger.display(), "vrs CLI starting");

    let result = match cli.command {
        Commands::Init { authority } => vrs_cli::parse_address(&authority)
            .and_then(|authority| cmd_init(&cli.ledger, &authority)),
        Commands::Registry(args) => run_registry(&args, &cli.ledger),
        Commands::Transfer(args) => run_transfer(&args, &cli.ledger),
        Commands::Show(args) => run_show(&args, &cli.ledger),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
