//! certdata-json - convert an NSS certdata.txt dump into JSON
//!
//! Reads the trust-store dump, merges every certificate with its trust
//! record and writes the resulting root store as JSON. Counts and
//! diagnostics go to stderr.

use anyhow::Context;
use certdata_json::cli::{Cli, Commands, ConvertArgs};
use certdata_json::commands;
use certdata_json::config;
use certdata_json::output::print_error;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(e) = run(cli) {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let settings =
        config::load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    tracing::debug!("Settings: {:?}", settings);

    match cli.command {
        Some(Commands::Convert(args)) => commands::run_convert(&args, &settings)?,
        Some(Commands::Stats(args)) => commands::run_stats(&args, &settings)?,
        None => commands::run_convert(&ConvertArgs::default(), &settings)?,
    }

    Ok(())
}
