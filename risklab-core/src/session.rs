//! Simulation session — owns the running balance, counters, and history.
//!
//! The session is the only mutator in the system. Each `apply_*` call:
//! 1. applies the balance delta,
//! 2. increments the matching counter / accumulator,
//! 3. appends one history point,
//! 4. recomputes the derived metrics from the post-mutation state.
//!
//! That ordering is load-bearing: a loss is sized against the *current*
//! (possibly already-reduced) balance, so repeated losses compound and the
//! balance may legally go negative at risk >= 100%.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::{max_drawdown_pct, sharpe_ratio, TradeStats};
use crate::outcome::Outcome;

/// One point on the equity curve: the step index and the balance after
/// that step. `step == 0` is the initial balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub step: usize,
    pub balance: f64,
}

/// Non-negative outcome counters, each incremented by exactly one per
/// matching outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounters {
    pub wins: usize,
    pub losses: usize,
    pub break_evens: usize,
}

impl OutcomeCounters {
    pub fn total(&self) -> usize {
        self.wins + self.losses + self.break_evens
    }
}

/// The simulation session: configuration plus all mutable running state.
///
/// Derived metrics (`max_drawdown_pct`, `sharpe_ratio`, `stats`) are
/// recomputed after every mutation and exposed as snapshots — callers
/// never trigger recomputation themselves.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimulationConfig,
    current_balance: f64,
    counters: OutcomeCounters,
    total_profit: f64,
    total_loss: f64,
    history: Vec<EquityPoint>,
    max_drawdown_pct: f64,
    sharpe_ratio: f64,
    stats: TradeStats,
}

impl Session {
    /// Create a session from a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            current_balance: config.initial_balance,
            counters: OutcomeCounters::default(),
            total_profit: 0.0,
            total_loss: 0.0,
            history: vec![EquityPoint {
                step: 0,
                balance: config.initial_balance,
            }],
            max_drawdown_pct: 0.0,
            sharpe_ratio: 0.0,
            stats: TradeStats::zeroed(),
        })
    }

    /// Replace the configuration and reset all state.
    ///
    /// An invalid configuration is rejected before anything mutates: the
    /// prior config and state survive the failed call intact.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Apply one outcome to the running balance.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.apply_win(),
            Outcome::Loss => self.apply_loss(),
            Outcome::BreakEven => self.apply_break_even(),
        }
    }

    /// Winning trade: gain `reward_pct` percent of the current balance.
    pub fn apply_win(&mut self) {
        let profit = self.current_balance * self.config.reward_pct / 100.0;
        self.current_balance += profit;
        self.counters.wins += 1;
        self.total_profit += profit;
        self.push_history_point();
        self.recompute_metrics();
    }

    /// Losing trade: lose `risk_pct` percent of the current balance.
    ///
    /// Sized against the current balance, not the initial one — this is
    /// the compounding-risk rule, not a bug.
    pub fn apply_loss(&mut self) {
        let loss = self.current_balance * self.config.risk_pct / 100.0;
        self.current_balance -= loss;
        self.counters.losses += 1;
        self.total_loss += loss;
        self.push_history_point();
        self.recompute_metrics();
    }

    /// Break-even trade: balance unchanged, still recorded as a flat
    /// history point so drawdown/Sharpe see the step.
    pub fn apply_break_even(&mut self) {
        self.counters.break_evens += 1;
        self.push_history_point();
        self.recompute_metrics();
    }

    /// Restore the session to its freshly configured state.
    pub fn reset(&mut self) {
        self.current_balance = self.config.initial_balance;
        self.counters = OutcomeCounters::default();
        self.total_profit = 0.0;
        self.total_loss = 0.0;
        self.history.clear();
        self.history.push(EquityPoint {
            step: 0,
            balance: self.config.initial_balance,
        });
        self.max_drawdown_pct = 0.0;
        self.sharpe_ratio = 0.0;
        self.stats = TradeStats::zeroed();
    }

    fn push_history_point(&mut self) {
        self.history.push(EquityPoint {
            step: self.history.len(),
            balance: self.current_balance,
        });
    }

    fn recompute_metrics(&mut self) {
        self.max_drawdown_pct = max_drawdown_pct(&self.history, self.config.initial_balance);
        self.sharpe_ratio = sharpe_ratio(&self.history);
        self.stats = TradeStats::compute(&self.counters, self.total_profit, self.total_loss);
    }

    // ── Read accessors (snapshots) ──

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_balance(&self) -> f64 {
        self.current_balance
    }

    pub fn counters(&self) -> &OutcomeCounters {
        &self.counters
    }

    /// Sum of win magnitudes. Always >= 0.
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    /// Sum of loss magnitudes. Always >= 0.
    pub fn total_loss(&self) -> f64 {
        self.total_loss
    }

    /// The full equity curve, suitable for charting or export.
    pub fn history(&self) -> &[EquityPoint] {
        &self.history
    }

    pub fn max_drawdown_pct(&self) -> f64 {
        self.max_drawdown_pct
    }

    pub fn sharpe_ratio(&self) -> f64 {
        self.sharpe_ratio
    }

    pub fn stats(&self) -> &TradeStats {
        &self.stats
    }
}
