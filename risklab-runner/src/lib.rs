//! RiskLab Runner — simulation orchestration on top of `risklab-core`.
//!
//! This crate builds on the core engine to provide:
//! - Compact outcome-sequence parsing (`"WWLB"`)
//! - TOML run specifications for the CLI
//! - A single-run driver producing a versioned, serializable result
//! - Monte Carlo batch simulation (rayon-parallel, seed-deterministic)
//! - JSON/CSV export with schema versioning

pub mod config;
pub mod export;
pub mod monte_carlo;
pub mod runner;
pub mod sequence;

pub use config::{RunSpec, SpecError};
pub use export::{export_equity_csv, export_json, import_json, save_artifacts};
pub use monte_carlo::{
    run_monte_carlo, Distribution, McError, McSample, MonteCarloConfig, MonteCarloResult,
};
pub use runner::{run_from_sequence, run_simulation, RunError, SimulationResult, SCHEMA_VERSION};
pub use sequence::{format_sequence, parse_sequence, SequenceError};
