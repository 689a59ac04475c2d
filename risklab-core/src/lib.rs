//! RiskLab Core — fixed risk/reward equity-curve simulation and metrics.
//!
//! This crate contains the heart of the simulator:
//! - Domain types (configuration, outcomes, equity points, counters)
//! - The simulation session: one outcome in, one history point out
//! - Pure metric functions (max drawdown, Sharpe-style ratio, trade stats)
//! - Config fingerprinting for deterministic run identification
//!
//! Everything here is in-memory arithmetic. No I/O, no hidden reactivity:
//! the session recomputes derived metrics explicitly after each mutation.

pub mod config;
pub mod fingerprint;
pub mod metrics;
pub mod outcome;
pub mod session;

pub use config::{ConfigError, SimulationConfig};
pub use fingerprint::{ConfigHash, RunFingerprint};
pub use metrics::{max_drawdown_pct, sharpe_ratio, step_returns, TradeStats};
pub use outcome::{Outcome, OutcomeParseError};
pub use session::{EquityPoint, OutcomeCounters, Session};
