// file: src/main.rs
// version: 1.0.0
// guid: 0d6b82f5-4e19-4c73-a258-96c1d0e7b34a

//! Ubuntu VPS Hardening Agent - Main entry point

use clap::Parser;
use tokio::signal;
use tracing::{error, warn};
use ubuntu_harden_agent::{
    cli::{args::Cli, commands::*},
    logging::logger,
    Result,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    // An interrupt leaves the host in whatever partial state was reached;
    // every step is idempotent, so a fresh run resumes safely.
    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        warn!("Interrupted; partially applied steps are safe to re-run");
    };

    let command_future = run_command(cli);

    tokio::select! {
        result = command_future => {
            if let Err(e) = result {
                error!("Fatal: {}", e);
                error!("Hardening aborted; consult the log output above for the failing step");
                std::process::exit(1);
            }
        }
        _ = shutdown_signal => {
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}

async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        ubuntu_harden_agent::cli::args::Commands::Harden { overrides, dry_run } => {
            harden_command(&overrides, dry_run).await
        }
        ubuntu_harden_agent::cli::args::Commands::CheckPrereqs => {
            check_prerequisites_command().await
        }
        ubuntu_harden_agent::cli::args::Commands::ShowConfig { overrides, json } => {
            show_config_command(&overrides, json).await
        }
    }
}
