//! Charm CLI
//!
//! Main entry point for the `charm` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use charm_common_log::LogConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;

/// Application exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    IoError = 3,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    match cli.execute() {
        Ok(exit) => exit.into(),
        Err(e) => {
            error!(code = e.code(), "{e}");
            e.exit_code().into()
        }
    }
}

/// `-v`/`-q` override `CHARM_LOG_LEVEL`; without either flag the environment
/// decides, defaulting to warnings only.
fn init_logging(cli: &Cli) {
    let config = LogConfig::from_env();
    let config = if cli.verbose > 0 || cli.quiet || std::env::var_os("CHARM_LOG_LEVEL").is_none() {
        config.with_verbosity(cli.verbose, cli.quiet)
    } else {
        config
    };

    if let Err(e) = charm_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
