//! vfimport - Main Entry Point
//!
//! Loads configuration, installs logging and runs a single import.

use std::process::ExitCode;

use clap::Parser;
use vfimport::Cli;
use vfimport_infrastructure::{ImporterConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ImporterConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("vfimport: {error}");
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.log_filter);
    tracing::info!("Starting vfimport v{}", env!("CARGO_PKG_VERSION"));

    match vfimport::run(&cli, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!(error = %error, "Transports could not be created");
            eprintln!("vfimport: {error}");
            ExitCode::from(2)
        }
    }
}
