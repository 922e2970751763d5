//! Record parser
//!
//! Walks the dump line by line and splits it into flat records at every
//! `CKA_CLASS` line. The walk is a small state machine: outside any record,
//! inside a record, or inside a multiline octal value of a record.

use crate::certdata::line::{self, LineKind, END, MULTILINE_OCTAL, UTF8};
use crate::certdata::octal;
use crate::certdata::record::{Record, CKA_CLASS};
use crate::utils::{CertdataError, ParseError};
use serde::Serialize;
use std::io::BufRead;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Fail on the first malformed line instead of collecting it
    pub strict: bool,
}

/// A line that matched none of the grammar forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    pub line: usize,
    pub content: String,
}

/// Result of a successful parse
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Records in file order
    pub records: Vec<Record>,
    /// Lines that were tolerated although they break the grammar
    pub malformed: Vec<MalformedLine>,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InRecord(Record),
    InMultiline {
        record: Record,
        field: String,
        buffer: String,
        opened_at: usize,
    },
}

/// Incremental record parser
#[derive(Debug, Default)]
pub struct Parser {
    options: ParseOptions,
    state: State,
    outcome: ParseOutcome,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Feed one raw input line. `line_no` is 1-based and only used for
    /// diagnostics.
    pub fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        let content = raw.trim_end();

        match line::classify(content) {
            LineKind::Ignorable => return Ok(()),
            LineKind::Malformed => {
                if self.options.strict {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        content: content.to_string(),
                    });
                }
                self.outcome.malformed.push(MalformedLine {
                    line: line_no,
                    content: content.to_string(),
                });
            }
            _ => {}
        }

        let (token, _) = line::pop_token(content);
        let state = std::mem::take(&mut self.state);

        self.state = match state {
            State::InMultiline {
                mut record,
                field,
                buffer,
                ..
            } if token == END => {
                let value = octal::octal_to_base64(&buffer).map_err(|e| {
                    ParseError::InvalidEscape {
                        line: line_no,
                        message: e.to_string(),
                    }
                })?;
                record.insert(field, value);
                State::InRecord(record)
            }
            State::InMultiline {
                record,
                field,
                mut buffer,
                opened_at,
            } => {
                buffer.push_str(content);
                State::InMultiline {
                    record,
                    field,
                    buffer,
                    opened_at,
                }
            }
            _ if token == END => return Err(ParseError::UnexpectedEnd { line: line_no }),
            State::Idle => self.value_line(Record::new(), line_no, content),
            State::InRecord(record) => self.value_line(record, line_no, content),
        };

        Ok(())
    }

    fn value_line(&mut self, mut record: Record, line_no: usize, content: &str) -> State {
        let (field, rest) = line::pop_token(content);
        let (kind, rest) = line::pop_token(rest);

        if field == CKA_CLASS {
            self.emit(std::mem::take(&mut record));
            tracing::trace!("Record boundary at line {} ({})", line_no, rest);
        }

        if kind == MULTILINE_OCTAL {
            return State::InMultiline {
                record,
                field: field.to_string(),
                buffer: String::new(),
                opened_at: line_no,
            };
        }

        let value = if kind == UTF8 { strip_quotes(rest) } else { rest };
        record.insert(field, value);
        State::InRecord(record)
    }

    fn emit(&mut self, record: Record) {
        if !record.is_empty() {
            self.outcome.records.push(record);
        }
    }

    /// Flush the last record and return everything parsed so far
    pub fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        match std::mem::take(&mut self.state) {
            State::InMultiline {
                field, opened_at, ..
            } => {
                return Err(ParseError::UnterminatedMultiline {
                    field,
                    line: opened_at,
                })
            }
            State::InRecord(record) => self.emit(record),
            State::Idle => {}
        }

        tracing::debug!(
            "Parsed {} records ({} malformed lines)",
            self.outcome.records.len(),
            self.outcome.malformed.len()
        );
        Ok(self.outcome)
    }
}

/// Drop the first and last character (the surrounding quotes)
fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Parse a sequence of lines into records
pub fn parse_lines<I, S>(lines: I, options: ParseOptions) -> Result<ParseOutcome, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new(options);
    for (index, line) in lines.into_iter().enumerate() {
        parser.feed(index + 1, line.as_ref())?;
    }
    parser.finish()
}

/// Parse a whole dump held in memory
pub fn parse_str(text: &str, options: ParseOptions) -> Result<ParseOutcome, ParseError> {
    parse_lines(text.lines(), options)
}

/// Parse a dump from a reader such as stdin or an open file
///
/// Lines are read as raw bytes. Invalid UTF-8 is replaced with U+FFFD
/// so a stray byte never stops the run.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    options: ParseOptions,
) -> Result<ParseOutcome, CertdataError> {
    let mut parser = Parser::new(options);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        if line.contains('\u{FFFD}') {
            tracing::debug!("Line {} is not valid UTF-8", line_no);
        }
        parser.feed(line_no, line.trim_end_matches(&['\n', '\r'][..]))?;
    }
    Ok(parser.finish()?)
}
