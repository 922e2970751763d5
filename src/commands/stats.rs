//! Root store statistics command

use crate::certdata::{self, RootStore};
use crate::cli::{OutputFormat, StatsArgs};
use crate::commands::convert::{convert, report_malformed};
use crate::commands::open_input;
use crate::config::Settings;
use crate::output::{render_stats, write_json};
use crate::utils::Result;
use std::io::Read;

/// Run the stats command
pub fn run_stats(args: &StatsArgs, settings: &Settings) -> Result<()> {
    let mut reader = open_input(args.input.as_deref())?;

    let store: RootStore = if args.from_json {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        certdata::store_from_json(&text)?
    } else {
        let conversion = convert(reader, settings.parse_options(), settings.merge_options())?;
        report_malformed(&conversion.malformed);
        conversion.store
    };

    let stats = certdata::analyze(&store);
    tracing::debug!("Analyzed {} roots, {} decoded", stats.processed, stats.good);

    match args.format {
        OutputFormat::Text => print!("{}", render_stats(&stats)),
        OutputFormat::Json => write_json(&stats, settings.output.pretty, std::io::stdout().lock())?,
    }

    Ok(())
}
