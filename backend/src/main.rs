//! `stockroom` entry point: loads settings, opens the data directory and
//! runs one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use stockroom::config::{StartupError, StockroomSettings, open_stockroom};
use stockroom::inbound::cli::{Cli, CliError, run};

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Command(#[from] CliError),
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    match execute(cli) {
        Ok(output) => {
            if writeln!(io::stdout(), "{output}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn execute(cli: Cli) -> Result<String, AppError> {
    let settings = StockroomSettings::load_from_iter([OsString::from("stockroom")])
        .map_err(|err| AppError::Settings(err.to_string()))?;
    let mut stockroom = open_stockroom(&settings, Arc::new(DefaultClock))?;
    Ok(run(&mut stockroom, cli.command)?)
}

fn report(err: &AppError) -> ExitCode {
    let mut stderr = io::stderr();
    if let AppError::Command(command) = err
        && let Some(domain) = command.domain()
    {
        let rendered = serde_json::to_string(domain).unwrap_or_else(|_| domain.to_string());
        if writeln!(stderr, "{rendered}").is_err() {
            error!(error = %domain, "failed to write error");
        }
        return ExitCode::from(1);
    }
    if writeln!(stderr, "error: {err}").is_err() {
        error!(error = %err, "failed to write error");
    }
    ExitCode::from(2)
}
