//! Serializable run specification — TOML file format for the CLI.
//!
//! A run spec carries the simulation parameters plus either a literal
//! outcome sequence, a Monte Carlo section, or both:
//!
//! ```toml
//! [simulation]
//! initial_balance = 10000.0
//! risk_pct = 1.0
//! reward_pct = 2.0
//!
//! sequence = "WWLBLW"
//!
//! [monte_carlo]
//! runs = 1000
//! trades_per_run = 100
//! win_prob = 0.55
//! break_even_prob = 0.05
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use risklab_core::SimulationConfig;

use crate::monte_carlo::MonteCarloConfig;

/// Errors from loading a run spec.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read spec file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse spec TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Complete run specification as loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSpec {
    pub simulation: SimulationConfig,
    /// Compact outcome string (e.g. "WWLB"). Optional: Monte Carlo-only
    /// specs omit it.
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub monte_carlo: Option<MonteCarloConfig>,
}

impl RunSpec {
    /// Parse a spec from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SpecError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a spec from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_spec() {
        let text = r#"
            sequence = "WWLB"

            [simulation]
            initial_balance = 10000.0
            risk_pct = 1.0
            reward_pct = 2.0

            [monte_carlo]
            runs = 500
            trades_per_run = 50
            win_prob = 0.6
            break_even_prob = 0.1
            seed = 7
        "#;
        let spec = RunSpec::from_toml(text).unwrap();
        assert_eq!(spec.simulation, SimulationConfig::new(10_000.0, 1.0, 2.0));
        assert_eq!(spec.sequence.as_deref(), Some("WWLB"));
        let mc = spec.monte_carlo.unwrap();
        assert_eq!(mc.runs, 500);
        assert_eq!(mc.seed, 7);
    }

    #[test]
    fn sequence_only_spec() {
        let text = r#"
            sequence = "WL"

            [simulation]
            initial_balance = 5000.0
            risk_pct = 2.0
            reward_pct = 3.0
        "#;
        let spec = RunSpec::from_toml(text).unwrap();
        assert!(spec.monte_carlo.is_none());
        assert_eq!(spec.sequence.as_deref(), Some("WL"));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            RunSpec::from_toml("simulation = 3"),
            Err(SpecError::Toml(_))
        ));
    }
}
