//! Utility modules for certdata-json
//!
//! This module contains the error types shared by every stage.

pub mod error;

pub use error::{CertdataError, ConfigError, MergeError, ParseError, Result, StatsError};
