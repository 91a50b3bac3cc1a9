//! JSON-lines batch evaluation
//!
//! One request per input line, one JSON result per output line. Lines that
//! are not UTF-8 or not a valid request are reported on the error stream
//! and skipped; only a failing reader or writer stops the run.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::core::CapacityEngine;
use crate::error::Result;
use crate::types::DecisionRequest;

/// Counts from one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub rejected: usize,
}

/// Decode one raw line; blank lines yield `None`
fn parse_line(bytes: &[u8]) -> Result<Option<DecisionRequest>> {
    let text = std::str::from_utf8(bytes)?.trim();
    if text.is_empty() {
        return Ok(None);
    }
    DecisionRequest::from_json(text).map(Some)
}

/// Evaluate every request line from `reader`
///
/// Results go to `out`, one compact JSON object per line. Each rejected
/// line produces `line <n>: <error>` on `err`.
pub fn evaluate_lines<R, W, E>(
    engine: &CapacityEngine,
    mut reader: R,
    out: &mut W,
    err: &mut E,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = BatchSummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        match parse_line(&buf) {
            Ok(None) => continue,
            Ok(Some(request)) => {
                let result = engine.evaluate(&request);
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
                summary.evaluated += 1;
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed request");
                writeln!(err, "line {}: {}", line_no, e)?;
                summary.rejected += 1;
            }
        }
    }

    out.flush()?;
    debug!(
        evaluated = summary.evaluated,
        rejected = summary.rejected,
        "batch finished"
    );
    Ok(summary)
}
