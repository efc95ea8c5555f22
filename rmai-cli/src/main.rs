//! `rmai` - browse Rick and Morty locations, keep notes on characters, and
//! generate, evaluate and search text about them.
//!
//! ```bash
//! rmai locations
//! rmai residents "Citadel of Ricks"
//! rmai note add 1 "Hates the Citadel"
//! rmai summarize "Citadel of Ricks"
//! rmai dialogue "Rick Sanchez" "Morty Smith"
//! rmai search "Citadel of Ricks" "portal gun" -k 5
//! ```

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use rmai_telemetry::{TelemetryConfig, init_telemetry};

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "info" } else { "warn" };
    init_telemetry(
        &TelemetryConfig::default().with_json(cli.log_json).with_default_directive(directive),
    )?;

    let app = App::from_cli(&cli).await?;
    let output = app.run(&cli.command).await?;
    println!("{output}");
    Ok(())
}
