//! Line-oriented drivers: read one literal per line, convert, stream the table out.
//!
//! Blank lines are ignored. Every other line that fails to convert, including one that
//! is not valid UTF-8, is handled by the [`ErrorPolicy`]: `Abort` returns the error
//! tagged with its 1-based line number, `Skip` logs a warning and moves on. Nothing is
//! written for a failed line.

use std::io::{self, BufRead, Write};
use std::str::Utf8Error;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoder::{EncodeError, FixedPointEncoder};
use crate::format::TableFormatter;
use crate::truncate::{BitWidthTruncator, TruncateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first bad line
    #[default]
    Abort,
    /// Warn and continue
    Skip,
}

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Encode { line: usize, source: EncodeError },
    #[error("line {line}: {source}")]
    Truncate { line: usize, source: TruncateError },
    #[error("line {line}: {source}")]
    Utf8 { line: usize, source: Utf8Error },
}

/// Outcome of one streaming run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamReport {
    /// Entries written to the output
    pub written: usize,
    /// Lines dropped under [`ErrorPolicy::Skip`]
    pub skipped: usize,
}

fn drive<R, W, F, E>(
    input: R,
    output: W,
    formatter: &TableFormatter,
    policy: ErrorPolicy,
    mut convert: F,
    tag: fn(usize, E) -> StreamError,
) -> Result<StreamReport, StreamError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<String, E>,
{
    let mut table = formatter.writer(output);
    let mut report = StreamReport::default();

    // split on raw bytes so a non-UTF-8 line is a per-line failure, not an I/O error
    for (idx, raw) in input.split(b'\n').enumerate() {
        let raw = raw?;
        let line_no = idx + 1;
        let result = match std::str::from_utf8(&raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => convert(line.strip_suffix('\r').unwrap_or(line))
                .map_err(|e| tag(line_no, e)),
            Err(source) => Err(StreamError::Utf8 {
                line: line_no,
                source,
            }),
        };
        match result {
            Ok(body) => {
                table.push(&body)?;
                report.written += 1;
            }
            Err(e) => match policy {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::Skip => {
                    tracing::warn!("skipping {}", e);
                    report.skipped += 1;
                }
            },
        }
    }

    table.finish()?;
    tracing::debug!(written = report.written, skipped = report.skipped, "stream complete");
    Ok(report)
}

/// Decimal coefficients in, one hex literal per entry out.
pub fn encode_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    encoder: &FixedPointEncoder,
    formatter: &TableFormatter,
    policy: ErrorPolicy,
) -> Result<StreamReport, StreamError> {
    drive(
        input,
        output,
        formatter,
        policy,
        |line| encoder.encode_line(line),
        |line, source| StreamError::Encode { line, source },
    )
}

/// Binary literals in, their most-significant prefixes out.
pub fn truncate_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    truncator: &BitWidthTruncator,
    formatter: &TableFormatter,
    policy: ErrorPolicy,
) -> Result<StreamReport, StreamError> {
    drive(
        input,
        output,
        formatter,
        policy,
        |line| truncator.truncate(line).map(str::to_string),
        |line, source| StreamError::Truncate { line, source },
    )
}
