//! Monte Carlo batch simulation — many random outcome streams in parallel.
//!
//! Each run draws `trades_per_run` outcomes from the configured win /
//! break-even / loss probabilities, drives a fresh session through them,
//! and records final balance, max drawdown, and Sharpe. Runs execute in
//! parallel under rayon; every run seeds its own `StdRng` from the base
//! seed plus the run index, so results are deterministic regardless of
//! thread scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use risklab_core::{ConfigError, Outcome, Session, SimulationConfig};

// ─── Configuration ───────────────────────────────────────────────────

/// Configuration for a Monte Carlo batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of independent runs (default 1000).
    pub runs: usize,
    /// Outcomes drawn per run (default 100).
    pub trades_per_run: usize,
    /// Probability a trade wins, in [0, 1].
    pub win_prob: f64,
    /// Probability a trade breaks even, in [0, 1]. The loss probability is
    /// the remainder.
    pub break_even_prob: f64,
    /// Base RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            trades_per_run: 100,
            win_prob: 0.5,
            break_even_prob: 0.0,
            seed: 42,
        }
    }
}

/// Errors from Monte Carlo configuration or execution.
#[derive(Debug, Error)]
pub enum McError {
    #[error("probability out of range: win_prob={win_prob}, break_even_prob={break_even_prob}")]
    InvalidProbability { win_prob: f64, break_even_prob: f64 },
    #[error("runs and trades_per_run must both be positive")]
    EmptyBatch,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl MonteCarloConfig {
    fn validate(&self) -> Result<(), McError> {
        let valid_prob = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !valid_prob(self.win_prob)
            || !valid_prob(self.break_even_prob)
            || self.win_prob + self.break_even_prob > 1.0
        {
            return Err(McError::InvalidProbability {
                win_prob: self.win_prob,
                break_even_prob: self.break_even_prob,
            });
        }
        if self.runs == 0 || self.trades_per_run == 0 {
            return Err(McError::EmptyBatch);
        }
        Ok(())
    }
}

// ─── Result types ────────────────────────────────────────────────────

/// Summary of one simulated run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct McSample {
    pub final_balance: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    /// Whether the balance touched or crossed zero at any point.
    pub ruined: bool,
}

/// p05 / median / p95 of one sampled quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distribution {
    pub p05: f64,
    pub median: f64,
    pub p95: f64,
}

impl Distribution {
    fn from_samples(mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            p05: percentile_sorted(&values, 5.0),
            median: percentile_sorted(&values, 50.0),
            p95: percentile_sorted(&values, 95.0),
        }
    }
}

/// Aggregate result of a Monte Carlo batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub config: MonteCarloConfig,
    pub simulation: SimulationConfig,
    pub final_balance: Distribution,
    pub max_drawdown_pct: Distribution,
    pub sharpe_ratio: Distribution,
    /// Fraction of runs whose balance touched or crossed zero.
    pub ruin_fraction: f64,
    pub runs: usize,
}

// ─── Batch execution ─────────────────────────────────────────────────

/// Run a Monte Carlo batch. Deterministic for a fixed seed.
pub fn run_monte_carlo(
    simulation: &SimulationConfig,
    config: &MonteCarloConfig,
) -> Result<MonteCarloResult, McError> {
    config.validate()?;
    simulation.validate()?;

    let samples: Vec<McSample> = (0..config.runs)
        .into_par_iter()
        .map(|run_idx| {
            // Per-run seed derived from the base seed: deterministic and
            // independent of rayon's scheduling.
            let seed = config.seed.wrapping_add(run_idx as u64);
            single_run(simulation, config, seed)
        })
        .collect();

    let ruined = samples.iter().filter(|s| s.ruined).count();

    Ok(MonteCarloResult {
        config: *config,
        simulation: *simulation,
        final_balance: Distribution::from_samples(
            samples.iter().map(|s| s.final_balance).collect(),
        ),
        max_drawdown_pct: Distribution::from_samples(
            samples.iter().map(|s| s.max_drawdown_pct).collect(),
        ),
        sharpe_ratio: Distribution::from_samples(
            samples.iter().map(|s| s.sharpe_ratio).collect(),
        ),
        ruin_fraction: ruined as f64 / samples.len() as f64,
        runs: samples.len(),
    })
}

/// Execute one run: draw outcomes, drive a session, summarize.
fn single_run(simulation: &SimulationConfig, config: &MonteCarloConfig, seed: u64) -> McSample {
    let mut rng = StdRng::seed_from_u64(seed);
    // Config validated by the caller, so construction cannot fail.
    let mut session = Session::new(*simulation).expect("validated config");
    let mut ruined = false;

    for _ in 0..config.trades_per_run {
        session.apply(draw_outcome(&mut rng, config));
        if session.current_balance() <= 0.0 {
            ruined = true;
        }
    }

    McSample {
        final_balance: session.current_balance(),
        max_drawdown_pct: session.max_drawdown_pct(),
        sharpe_ratio: session.sharpe_ratio(),
        ruined,
    }
}

fn draw_outcome(rng: &mut StdRng, config: &MonteCarloConfig) -> Outcome {
    let roll: f64 = rng.gen();
    if roll < config.win_prob {
        Outcome::Win
    } else if roll < config.win_prob + config.break_even_prob {
        Outcome::BreakEven
    } else {
        Outcome::Loss
    }
}

/// Percentile of a sorted slice using linear interpolation.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
