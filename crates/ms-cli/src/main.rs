//! migsync CLI - reconcile local SQL migrations against an applied report

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::reconcile::execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("Reconciliation aborted: {err:?}");
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
