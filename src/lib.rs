//! certdata-json Library
//!
//! Converts the NSS `certdata.txt` trust-store dump into structured data:
//! - Parsing the dump into flat records, including multiline octal values
//! - Merging certificate records with their trust records
//! - Summarizing the key algorithms of the server-auth roots
//!
//! # Usage
//!
//! ```rust,ignore
//! use certdata_json::certdata::{merge_trust, parse_str, MergeOptions, ParseOptions};
//!
//! let outcome = parse_str(&text, ParseOptions::default())?;
//! let roots = merge_trust(outcome.records, MergeOptions::default())?;
//! println!("{} roots", roots.len());
//! ```

pub mod certdata;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use certdata::{RootEntry, RootStore};
pub use cli::Cli;
pub use config::Settings;
pub use utils::{CertdataError, Result};
