//! Run fingerprinting — deterministic identification of simulation runs.
//!
//! - `ConfigHash`: blake3 over the canonical JSON of a `SimulationConfig`.
//! - `RunFingerprint`: config hash + outcome sequence hash + timestamp,
//!   enough to reproduce or deduplicate a run.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SimulationConfig;
use crate::outcome::Outcome;

/// Deterministic content hash (blake3, hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    /// Hash the canonical JSON serialization of a config.
    ///
    /// `SimulationConfig` has a fixed field order, so serde_json output is
    /// already canonical.
    pub fn of(config: &SimulationConfig) -> Self {
        let json = serde_json::to_string(config).expect("SimulationConfig must serialize");
        Self(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete fingerprint of a single simulation run.
///
/// The `run_id` is a pure function of the config and the outcome sequence:
/// two identical runs share an ID regardless of when they executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub run_id: String,
    pub config_hash: ConfigHash,
    pub timestamp: NaiveDateTime,
    pub config: SimulationConfig,
}

impl RunFingerprint {
    pub fn new(config: SimulationConfig, outcomes: &[Outcome]) -> Self {
        let config_hash = ConfigHash::of(&config);
        let sequence: String = outcomes.iter().map(|o| o.as_char()).collect();
        let mut hasher = blake3::Hasher::new();
        hasher.update(config_hash.0.as_bytes());
        hasher.update(sequence.as_bytes());
        let run_id = hasher.finalize().to_hex().to_string();

        Self {
            run_id,
            config_hash,
            timestamp: chrono::Utc::now().naive_utc(),
            config,
        }
    }
}
