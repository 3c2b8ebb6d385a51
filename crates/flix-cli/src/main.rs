//! flixkit CLI - interaction template toolkit.
//!
//! Generates FCL bindings, resolves Cadence imports and invokes templates
//! through a gateway.

pub mod args;
pub mod commands;
pub mod config;
pub mod output;
pub mod telemetry;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    telemetry::init_telemetry(telemetry::log_level(cli.verbose), cli.log_json)?;

    if let Err(e) = commands::execute(cli).await {
        output::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
