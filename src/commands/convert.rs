//! certdata to JSON conversion command

use crate::certdata::{self, MalformedLine, MergeOptions, ParseOptions, RootStore};
use crate::cli::ConvertArgs;
use crate::commands::open_input;
use crate::config::Settings;
use crate::output::{print_info, print_json, print_warning, write_json_file};
use crate::utils::Result;
use std::io::BufRead;

/// Merged roots plus what the parser tolerated along the way
#[derive(Debug)]
pub struct Conversion {
    pub store: RootStore,
    pub malformed: Vec<MalformedLine>,
}

/// Parse a certdata dump and merge its trust records
pub fn convert<R: BufRead>(
    reader: R,
    parse: ParseOptions,
    merge: MergeOptions,
) -> Result<Conversion> {
    let outcome = certdata::parse_reader(reader, parse)?;
    let store = certdata::merge_trust(outcome.records, merge)?;
    Ok(Conversion {
        store,
        malformed: outcome.malformed,
    })
}

/// Log each tolerated line and print a one-line summary to stderr
pub fn report_malformed(malformed: &[MalformedLine]) {
    if malformed.is_empty() {
        return;
    }
    for bad in malformed {
        tracing::warn!("Bad content on line {}: {}", bad.line, bad.content);
    }
    print_warning(&format!(
        "Bad content: {} malformed line(s)",
        malformed.len()
    ));
}

/// Run the convert command
pub fn run_convert(args: &ConvertArgs, settings: &Settings) -> Result<()> {
    let parse = ParseOptions {
        strict: args.strict || settings.parser.strict,
    };
    let merge = MergeOptions {
        reject_duplicate_labels: args.reject_duplicates || settings.merge.reject_duplicate_labels,
    };
    let pretty = settings.output.pretty && !args.compact;

    let reader = open_input(args.input.as_deref())?;
    let conversion = convert(reader, parse, merge)?;
    report_malformed(&conversion.malformed);

    let store = conversion.store;
    let server_auth = store.server_auth_roots();
    print_info(&format!("Found {} roots overall", store.len()));
    print_info(&format!(
        "Found {} roots trusted for server auth",
        server_auth.len()
    ));

    let selected = if args.server_auth_only {
        &server_auth
    } else {
        &store
    };

    match &args.output {
        Some(path) => {
            write_json_file(selected, pretty, path)?;
            tracing::debug!("Wrote {} roots to {}", selected.len(), path.display());
        }
        None => print_json(selected, pretty)?,
    }

    Ok(())
}
