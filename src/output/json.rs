//! JSON output formatter

use crate::certdata::RootStore;
use crate::utils::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Serialize a value as JSON into a writer, followed by a newline
pub fn write_json<T: Serialize, W: Write>(value: &T, pretty: bool, mut writer: W) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Print a root store as JSON to stdout
pub fn print_json(store: &RootStore, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    write_json(store, pretty, stdout.lock())
}

/// Write a root store as JSON to a file
pub fn write_json_file(store: &RootStore, pretty: bool, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_json(store, pretty, std::io::BufWriter::new(file))
}
