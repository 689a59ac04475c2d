//! Trade outcomes — the only input the session accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single simulated trade result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Balance gains `reward_pct` percent of its current value.
    Win,
    /// Balance loses `risk_pct` percent of its current value.
    Loss,
    /// Balance unchanged; still recorded as a history point.
    BreakEven,
}

/// Error from parsing a compact outcome character.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown outcome character '{0}' (expected W, L, or B)")]
pub struct OutcomeParseError(pub char);

impl Outcome {
    /// Compact single-character encoding used by sequence strings.
    pub fn as_char(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::BreakEven => 'B',
        }
    }

    /// Parse the compact encoding, case-insensitively.
    pub fn from_char(c: char) -> Result<Self, OutcomeParseError> {
        match c.to_ascii_uppercase() {
            'W' => Ok(Outcome::Win),
            'L' => Ok(Outcome::Loss),
            'B' => Ok(Outcome::BreakEven),
            other => Err(OutcomeParseError(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::BreakEven => write!(f, "break-even"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_round_trip() {
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::BreakEven] {
            assert_eq!(Outcome::from_char(outcome.as_char()), Ok(outcome));
        }
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(Outcome::from_char('w'), Ok(Outcome::Win));
        assert_eq!(Outcome::from_char('b'), Ok(Outcome::BreakEven));
    }

    #[test]
    fn unknown_char_rejected() {
        assert_eq!(Outcome::from_char('x'), Err(OutcomeParseError('X')));
    }
}
