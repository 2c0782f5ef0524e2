mod archive;
mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod scan;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use log::{debug, info};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting GitLab Auditor");

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            eprintln!("{} {e:#}", output::error_label("Error:"));
            ExitCode::FAILURE
        }
    }
}
