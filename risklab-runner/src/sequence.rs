//! Outcome sequence parsing — compact `W`/`L`/`B` strings.
//!
//! Sequences are written as `"WWLB"` (case-insensitive); whitespace and
//! commas are separators and are ignored, so `"W W, L b"` parses too.

use risklab_core::Outcome;
use thiserror::Error;

/// Errors from sequence parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("unknown outcome character '{ch}' at position {position} (expected W, L, or B)")]
    UnknownChar { ch: char, position: usize },
    #[error("empty outcome sequence")]
    Empty,
}

/// Parse a compact outcome string into a list of outcomes.
pub fn parse_sequence(input: &str) -> Result<Vec<Outcome>, SequenceError> {
    let mut outcomes = Vec::new();
    for (position, ch) in input.chars().enumerate() {
        if ch.is_whitespace() || ch == ',' {
            continue;
        }
        let outcome = Outcome::from_char(ch)
            .map_err(|e| SequenceError::UnknownChar { ch: e.0, position })?;
        outcomes.push(outcome);
    }
    if outcomes.is_empty() {
        return Err(SequenceError::Empty);
    }
    Ok(outcomes)
}

/// Render outcomes back to the compact encoding.
pub fn format_sequence(outcomes: &[Outcome]) -> String {
    outcomes.iter().map(|o| o.as_char()).collect()
}
