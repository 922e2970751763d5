//! certdata trust-store handling
//!
//! Parses the plaintext `certdata.txt` dump into flat records and merges
//! certificate records with their trust records.

pub mod line;
pub mod merge;
pub mod octal;
pub mod parser;
pub mod record;
pub mod stats;

pub use merge::{merge_trust, MergeOptions, RootEntry, RootStore};
pub use parser::{parse_lines, parse_reader, parse_str, MalformedLine, ParseOptions, ParseOutcome};
pub use record::{ObjectClass, Record};
pub use stats::{analyze, store_from_json, StoreStats};
