//! Simulation runner — wires together session, metrics, and fingerprinting.
//!
//! Two entry points:
//! - `run_simulation()`: takes a config + outcome list. Used by the CLI
//!   and the Monte Carlo layer.
//! - `run_from_sequence()`: takes a config + compact sequence string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use risklab_core::{
    ConfigError, EquityPoint, Outcome, OutcomeCounters, RunFingerprint, Session,
    SimulationConfig, TradeStats,
};

use crate::sequence::{format_sequence, parse_sequence, SequenceError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Deterministic ID: hash of config + outcome sequence.
    pub run_id: String,
    pub timestamp: chrono::NaiveDateTime,
    pub config: SimulationConfig,
    /// Compact outcome string the run was driven by.
    pub sequence: String,
    pub counters: OutcomeCounters,
    pub stats: TradeStats,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    /// Reward/risk ratio; `INFINITY` sentinel at zero risk serializes as
    /// null, so it is regenerated from the config on import.
    #[serde(skip)]
    pub rr_ratio: f64,
    pub final_balance: f64,
    pub equity_curve: Vec<EquityPoint>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SimulationResult {
    /// Restore fields not carried by the serialized form.
    pub fn rehydrate(mut self) -> Self {
        self.rr_ratio = self.config.rr_ratio();
        self
    }
}

/// Drive a session through an outcome list and collect the full result.
pub fn run_simulation(
    config: &SimulationConfig,
    outcomes: &[Outcome],
) -> Result<SimulationResult, RunError> {
    let mut session = Session::new(*config)?;
    for outcome in outcomes {
        session.apply(*outcome);
    }

    let fingerprint = RunFingerprint::new(*config, outcomes);
    Ok(SimulationResult {
        schema_version: SCHEMA_VERSION,
        run_id: fingerprint.run_id,
        timestamp: fingerprint.timestamp,
        config: *config,
        sequence: format_sequence(outcomes),
        counters: *session.counters(),
        stats: *session.stats(),
        max_drawdown_pct: session.max_drawdown_pct(),
        sharpe_ratio: session.sharpe_ratio(),
        rr_ratio: config.rr_ratio(),
        final_balance: session.current_balance(),
        equity_curve: session.history().to_vec(),
    })
}

/// Parse a compact sequence string and run it.
pub fn run_from_sequence(
    config: &SimulationConfig,
    sequence: &str,
) -> Result<SimulationResult, RunError> {
    let outcomes = parse_sequence(sequence)?;
    run_simulation(config, &outcomes)
}
