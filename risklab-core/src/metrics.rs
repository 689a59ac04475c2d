//! Performance metrics — pure functions over the balance history and counters.
//!
//! Every metric is a pure function: history and/or counters in, scalar out.
//! Nothing here retains state between calls, and every degenerate input
//! (empty history, zero trades, zero dispersion, zero losses) maps to a
//! defined sentinel rather than a panic or NaN.

use serde::{Deserialize, Serialize};

use crate::session::{EquityPoint, OutcomeCounters};

/// Trading periods per year used for annualization.
const PERIODS_PER_YEAR: f64 = 252.0;

// ─── Drawdown ───────────────────────────────────────────────────────

/// Maximum drawdown as a percentage (e.g. 2.98 = 2.98% peak-to-trough).
///
/// Single forward pass: the running peak starts at `initial_balance` and
/// only ever rises; each point below the peak contributes
/// `(peak - balance) / peak`. Drawdown is measured against the peak
/// *preceding* the point — no lookahead. Returns 0.0 for a history of
/// length <= 1. The peak starts positive and is non-decreasing, so the
/// division is always safe.
pub fn max_drawdown_pct(history: &[EquityPoint], initial_balance: f64) -> f64 {
    if history.len() <= 1 {
        return 0.0;
    }
    let mut peak = initial_balance;
    let mut max_dd = 0.0_f64;

    for point in history {
        if point.balance > peak {
            peak = point.balance;
        } else {
            let dd = (peak - point.balance) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    100.0 * max_dd
}

// ─── Sharpe-style risk-adjusted return ──────────────────────────────

/// Annualized Sharpe-style ratio from per-step balance returns.
///
/// Sharpe = mean(step returns) / population_std(step returns) * sqrt(252).
/// Returns 0.0 for fewer than 2 history points or zero dispersion. A flat
/// break-even step contributes a 0.0 return, lowering mean and dispersion
/// jointly.
pub fn sharpe_ratio(history: &[EquityPoint]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }
    let returns = step_returns(history);
    let mean = mean_f64(&returns);
    let std = population_std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    // (mean * 252) / (std * sqrt(252)) simplifies to mean / std * sqrt(252)
    (mean / std) * PERIODS_PER_YEAR.sqrt()
}

/// Per-step simple returns: `(b[i] - b[i-1]) / b[i-1]`.
///
/// A step whose previous balance is zero or negative (reachable through
/// compounding losses at risk >= 100%) contributes a 0.0 return — the
/// percent change off a non-positive base is meaningless, and skipping the
/// step would desynchronize the series from the history.
pub fn step_returns(history: &[EquityPoint]) -> Vec<f64> {
    if history.len() < 2 {
        return Vec::new();
    }
    history
        .windows(2)
        .map(|w| {
            if w[0].balance > 0.0 {
                (w[1].balance - w[0].balance) / w[0].balance
            } else {
                0.0
            }
        })
        .collect()
}

// ─── Aggregate trade statistics ─────────────────────────────────────

/// Aggregate statistics over all applied outcomes.
///
/// Rates are percentages (0–100). All values are full precision; rounding
/// happens only at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub break_even_rate: f64,
    /// `total_profit - total_loss`; may be negative.
    pub net_profit: f64,
    pub average_win: f64,
    pub average_loss: f64,
    /// Gains over losses. `INFINITY` when there are gains but zero losses;
    /// 0.0 when there are neither. JSON cannot carry the sentinel, so it
    /// round-trips as null.
    #[serde(with = "infinity_as_null")]
    pub profit_factor: f64,
    /// Probability-weighted average outcome per trade.
    pub expected_value: f64,
}

impl TradeStats {
    /// Compute all statistics from the counters and magnitude accumulators.
    pub fn compute(counters: &OutcomeCounters, total_profit: f64, total_loss: f64) -> Self {
        let total_trades = counters.total();

        let rate = |count: usize| {
            if total_trades == 0 {
                0.0
            } else {
                count as f64 / total_trades as f64 * 100.0
            }
        };
        let win_rate = rate(counters.wins);
        let loss_rate = rate(counters.losses);
        let break_even_rate = rate(counters.break_evens);

        let average_win = if counters.wins > 0 {
            total_profit / counters.wins as f64
        } else {
            0.0
        };
        let average_loss = if counters.losses > 0 {
            total_loss / counters.losses as f64
        } else {
            0.0
        };

        // Ternary order matters: the zero-loss tie-break is INFINITY only
        // when there is actual profit.
        let profit_factor = if total_loss > 0.0 {
            total_profit / total_loss
        } else if total_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let expected_value = (win_rate / 100.0 * average_win) - (loss_rate / 100.0 * average_loss);

        Self {
            total_trades,
            win_rate,
            loss_rate,
            break_even_rate,
            net_profit: total_profit - total_loss,
            average_win,
            average_loss,
            profit_factor,
            expected_value,
        }
    }

    /// The all-zero statistics of a freshly reset session.
    pub fn zeroed() -> Self {
        Self::compute(&OutcomeCounters::default(), 0.0, 0.0)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Serde adapter for the zero-loss profit factor sentinel. The value is
/// either finite or exactly `INFINITY` (never NaN), so null is lossless.
mod infinity_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (denominator n, not n-1).
fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
