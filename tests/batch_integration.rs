//! Integration tests for JSON-lines batch evaluation
//!
//! Tests the batch contract:
//! - one JSON result per accepted line
//! - malformed lines (bad JSON, invalid UTF-8) reported on stderr, then skipped
//! - requests pass through as given, with no wall-clock stamping

use capacity_engine::core::{evaluate_lines, BatchSummary, CapacityEngine};
use capacity_engine::types::{Capacity, DecisionResult};
use pretty_assertions::assert_eq;

const RESPONSIVE_LINE: &str = r#"{"loopCode":"LOOP-01","indicator":"river.level","tstamp":"2024-06-01T08:00:00Z","reading":{"value":12.8,"band":{"lower":15,"upper":25},"trendSlope":0.7,"bufferAdequacy":0.3,"earlyWarningProb":0.55}}"#;

const STRUCTURAL_LINE: &str = r#"{"loopCode":"LOOP-02","indicator":"grid.load","tstamp":"2024-06-02T08:00:00Z","reading":{"value":7.2,"band":{"lower":3,"upper":6},"persistenceFraction":0.9,"integralError":0.8,"dataQualityPenalty":0.3}}"#;

const UNSTAMPED_LINE: &str = r#"{"loopCode":"L","indicator":"i","reading":{"value":30,"band":{"lower":15,"upper":25}}}"#;

fn run(input: &[u8]) -> (BatchSummary, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = evaluate_lines(&CapacityEngine::default(), input, &mut out, &mut err).unwrap();
    (
        summary,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

// =============================================================================
// MIXED INPUT: good, bad JSON, invalid UTF-8, good
// =============================================================================

#[test]
fn test_malformed_lines_are_skipped_and_processing_continues() {
    let mut input = Vec::new();
    input.extend_from_slice(RESPONSIVE_LINE.as_bytes());
    input.extend_from_slice(b"\n{ \"loopCode\": \"broken\"\n");
    input.extend_from_slice(b"\xff\xfe bad bytes\n");
    input.extend_from_slice(STRUCTURAL_LINE.as_bytes());
    input.push(b'\n');

    let (summary, out, err) = run(&input);

    assert_eq!(
        summary,
        BatchSummary {
            evaluated: 2,
            rejected: 2
        }
    );

    // One JSON result per accepted line, in input order
    let results: Vec<DecisionResult> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].primary(), Some(Capacity::Responsive));
    assert_eq!(results[1].primary(), Some(Capacity::Structural));

    // Rejections name their line numbers
    let errors: Vec<&str> = err.lines().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("line 2: malformed JSON"), "{}", errors[0]);
    assert!(errors[1].starts_with("line 3: invalid UTF-8"), "{}", errors[1]);
}

#[test]
fn test_blank_lines_do_not_count() {
    let input = format!("\n{}\n\n   \n{}\n", RESPONSIVE_LINE, STRUCTURAL_LINE);
    let (summary, out, err) = run(input.as_bytes());

    assert_eq!(summary.evaluated, 2);
    assert_eq!(summary.rejected, 0);
    assert_eq!(out.lines().count(), 2);
    assert!(err.is_empty());
}

#[test]
fn test_crlf_line_endings_accepted() {
    let input = format!("{}\r\n{}\r\n", RESPONSIVE_LINE, STRUCTURAL_LINE);
    let (summary, _, err) = run(input.as_bytes());

    assert_eq!(summary.evaluated, 2);
    assert!(err.is_empty());
}

// =============================================================================
// DETERMINISM: missing tstamp is echoed empty, never filled in
// =============================================================================

#[test]
fn test_missing_tstamp_is_not_stamped() {
    let input = format!("{}\n", UNSTAMPED_LINE);
    let (_, first, _) = run(input.as_bytes());
    let (_, second, _) = run(input.as_bytes());

    assert_eq!(first, second);

    let result: DecisionResult = serde_json::from_str(first.trim()).unwrap();
    assert!(result.rationale.starts_with("loop=L indicator=i at= |"));

    let again: DecisionResult = serde_json::from_str(second.trim()).unwrap();
    assert_eq!(result.fingerprint().unwrap(), again.fingerprint().unwrap());
}
