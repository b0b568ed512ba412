//! HTT touch panel utility
//!
//! Configures HTT touch panel modules over USB HID feature reports.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use htt_panel::DeviceRegistry;
use htt_transport::HidDiscovery;
use htt_util::commands::utility::print_help;
use htt_util::Dispatcher;

// CLI definitions
mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("htt_util=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let discovery = HidDiscovery::new().context("Error initializing USB")?;
    let registry =
        DeviceRegistry::discover(&discovery).context("Failed to enumerate HTT devices")?;

    if cli.tokens.is_empty() {
        print_help();
        return Ok(());
    }

    let mut dispatcher = Dispatcher::new(registry);
    let outcome = dispatcher.run(&cli.tokens);
    debug!(
        "Ran {} command(s), {} failed, halt: {:?}",
        outcome.executed, outcome.failed, outcome.halt
    );
    Ok(())
}
