mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!(
        "🚀 SiteStat CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    #[cfg(feature = "parallel")]
    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                crate::error::CliError::Other(anyhow::anyhow!(
                    "Failed to build global thread pool: {}",
                    e
                ))
            })?;
    }

    let command_result = match cli.command {
        Commands::Formations(args) => {
            info!("Dispatching to 'formations' command.");
            commands::formations::run(args)
        }
        Commands::Potentials(args) => {
            info!("Dispatching to 'potentials' command.");
            commands::potentials::run(args)
        }
        Commands::Fluctuation(args) => {
            info!("Dispatching to 'fluctuation' command.");
            commands::fluctuation::run(args)
        }
        Commands::Histogram(args) => {
            info!("Dispatching to 'histogram' command.");
            commands::histogram::run(args)
        }
        Commands::Sweep(args) => {
            info!("Dispatching to 'sweep' command.");
            commands::sweep::run(args)
        }
        Commands::Validate(args) => {
            info!("Dispatching to 'validate' command.");
            commands::validate::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
