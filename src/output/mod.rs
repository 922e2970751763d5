//! Output formatting module
//!
//! Provides the JSON writer for root stores and stderr diagnostics.

pub mod json;
pub mod terminal;

pub use json::{print_json, write_json, write_json_file};
pub use terminal::{print_error, print_info, print_warning, render_stats};
