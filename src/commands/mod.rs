//! Command implementations for certdata-json

pub mod convert;
pub mod stats;

pub use convert::{convert, report_malformed, run_convert, Conversion};
pub use stats::run_stats;

use crate::utils::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open the named input file, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            tracing::debug!("Reading {}", path.display());
            Ok(Box::new(BufReader::new(File::open(path)?)))
        }
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
    }
}
