//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "certdata-json")]
#[command(version)]
#[command(about = "Convert an NSS certdata.txt trust-store dump into JSON", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file (default: config/default.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a certdata dump to a JSON root store (default)
    Convert(ConvertArgs),

    /// Summarize key algorithms of the server-auth roots
    Stats(StatsArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConvertArgs {
    /// certdata file to read, or omit for stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Write JSON to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Abort on malformed lines
    #[arg(long)]
    pub strict: bool,

    /// Abort on duplicate certificate labels
    #[arg(long)]
    pub reject_duplicates: bool,

    /// Only emit roots trusted to delegate for server auth
    #[arg(long)]
    pub server_auth_only: bool,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// certdata file (or JSON root store with --from-json), or omit for stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Input is a JSON root store produced by `convert`
    #[arg(long)]
    pub from_json: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text
    Text,
    /// JSON output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
