//! Error types for certdata-json
//!
//! This module defines domain-specific error types using `thiserror` for
//! each stage of the conversion: parsing the dump, merging trust records,
//! loading configuration and analyzing the resulting root store.

use thiserror::Error;

/// Top-level error type for certdata-json
#[derive(Error, Debug)]
pub enum CertdataError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning dump lines into records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected END on line {line} (no multiline value is open)")]
    UnexpectedEnd { line: usize },

    #[error("Multiline value for {field} opened on line {line} is never terminated by END")]
    UnterminatedMultiline { field: String, line: usize },

    #[error("Invalid escape in multiline value on line {line}: {message}")]
    InvalidEscape { line: usize, message: String },

    #[error("Malformed line {line}: {content}")]
    MalformedLine { line: usize, content: String },
}

/// Errors raised while attaching trust records to certificates
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    #[error("{class} record #{index} has no {attribute}")]
    MissingAttribute {
        class: String,
        index: usize,
        attribute: String,
    },

    #[error("Some certs have no trust information: {}", .labels.join(", "))]
    MissingTrust { labels: Vec<String> },

    #[error("Duplicate certificate label: {label}")]
    DuplicateLabel { label: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// Root store analysis errors
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid root store: {message}")]
    InvalidStore { message: String },
}

/// Result type alias using CertdataError
pub type Result<T> = std::result::Result<T, CertdataError>;
