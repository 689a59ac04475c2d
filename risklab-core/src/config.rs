//! Simulation configuration — initial balance and the flat risk/reward rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration validation.
///
/// A rejected configuration never mutates an existing session: validation
/// happens before any state is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("initial balance must be positive, got {0}")]
    NonPositiveBalance(f64),
    #[error("initial balance must be finite, got {0}")]
    NonFiniteBalance(f64),
    #[error("risk percentage must be finite and >= 0, got {0}")]
    InvalidRiskPct(f64),
    #[error("reward percentage must be finite and >= 0, got {0}")]
    InvalidRewardPct(f64),
}

/// Configuration for a simulation: starting balance plus the flat
/// percentage-of-balance risk/reward rule.
///
/// Percentages are expressed in percent (1.0 = 1%). Values above 100 are
/// accepted — a loss at >100% risk drives the balance negative, which the
/// session models faithfully (compounding against the *current* balance).
/// Negative percentages are rejected: they would silently swap win and
/// loss semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_balance: f64,
    /// Percent of current balance lost on a losing trade.
    pub risk_pct: f64,
    /// Percent of current balance gained on a winning trade.
    pub reward_pct: f64,
}

impl SimulationConfig {
    pub fn new(initial_balance: f64, risk_pct: f64, reward_pct: f64) -> Self {
        Self {
            initial_balance,
            risk_pct,
            reward_pct,
        }
    }

    /// Validate the configuration without constructing a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_balance.is_finite() {
            return Err(ConfigError::NonFiniteBalance(self.initial_balance));
        }
        if self.initial_balance <= 0.0 {
            return Err(ConfigError::NonPositiveBalance(self.initial_balance));
        }
        if !self.risk_pct.is_finite() || self.risk_pct < 0.0 {
            return Err(ConfigError::InvalidRiskPct(self.risk_pct));
        }
        if !self.reward_pct.is_finite() || self.reward_pct < 0.0 {
            return Err(ConfigError::InvalidRewardPct(self.reward_pct));
        }
        Ok(())
    }

    /// Risk/reward ratio: `reward_pct / risk_pct`.
    ///
    /// Undefined at zero risk — reported as the `f64::INFINITY` sentinel,
    /// never a panic or NaN.
    pub fn rr_ratio(&self) -> f64 {
        if self.risk_pct == 0.0 {
            f64::INFINITY
        } else {
            self.reward_pct / self.risk_pct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let config = SimulationConfig::new(10_000.0, 1.0, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_balance_rejected() {
        let config = SimulationConfig::new(0.0, 1.0, 2.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveBalance(0.0))
        );
    }

    #[test]
    fn negative_balance_rejected() {
        let config = SimulationConfig::new(-500.0, 1.0, 2.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveBalance(_))
        ));
    }

    #[test]
    fn nan_balance_rejected() {
        let config = SimulationConfig::new(f64::NAN, 1.0, 2.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBalance(_))
        ));
    }

    #[test]
    fn negative_risk_rejected() {
        let config = SimulationConfig::new(10_000.0, -1.0, 2.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidRiskPct(-1.0)));
    }

    #[test]
    fn negative_reward_rejected() {
        let config = SimulationConfig::new(10_000.0, 1.0, -2.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidRewardPct(-2.0)));
    }

    #[test]
    fn risk_above_100_accepted() {
        // Legal: a single loss at 150% risk takes the balance negative.
        let config = SimulationConfig::new(10_000.0, 150.0, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rr_ratio_basic() {
        let config = SimulationConfig::new(10_000.0, 1.0, 2.0);
        assert_eq!(config.rr_ratio(), 2.0);
    }

    #[test]
    fn rr_ratio_zero_risk_is_infinity() {
        let config = SimulationConfig::new(10_000.0, 0.0, 2.0);
        assert_eq!(config.rr_ratio(), f64::INFINITY);
    }
}
