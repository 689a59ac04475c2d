//! Property tests for session invariants.
//!
//! Uses proptest to verify:
//! 1. History bookkeeping — `history.len() == wins + losses + break_evens + 1`
//! 2. Accumulator signs — `total_profit >= 0` and `total_loss >= 0`
//! 3. Reset round-trip — reset reproduces the freshly configured state
//! 4. Drawdown monotonicity — appending a strictly lower balance after the
//!    current trough never decreases the reported drawdown

use proptest::prelude::*;
use risklab_core::{max_drawdown_pct, EquityPoint, Outcome, Session, SimulationConfig};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Win),
        Just(Outcome::Loss),
        Just(Outcome::BreakEven),
    ]
}

/// Configs whose balance can never go negative (risk < 100%).
fn arb_config() -> impl Strategy<Value = SimulationConfig> {
    (100.0..1_000_000.0_f64, 0.0..100.0_f64, 0.0..120.0_f64)
        .prop_map(|(balance, risk, reward)| SimulationConfig::new(balance, risk, reward))
}

/// Configs including risk above 100%, where losses blow through zero.
fn arb_wild_config() -> impl Strategy<Value = SimulationConfig> {
    (100.0..1_000_000.0_f64, 0.0..150.0_f64, 0.0..150.0_f64)
        .prop_map(|(balance, risk, reward)| SimulationConfig::new(balance, risk, reward))
}

// ── 1. History bookkeeping ───────────────────────────────────────────

proptest! {
    /// After any sequence of outcomes, history holds exactly one point per
    /// outcome plus the initial point.
    #[test]
    fn history_length_invariant(
        config in arb_config(),
        outcomes in prop::collection::vec(arb_outcome(), 0..200),
    ) {
        let mut session = Session::new(config).unwrap();
        for outcome in &outcomes {
            session.apply(*outcome);
            let counters = session.counters();
            prop_assert_eq!(session.history().len(), counters.total() + 1);
        }
        session.reset();
        prop_assert_eq!(session.history().len(), 1);
        prop_assert_eq!(session.counters().total(), 0);
    }

    /// Step indices are dense and start at zero.
    #[test]
    fn history_steps_sequential(
        config in arb_config(),
        outcomes in prop::collection::vec(arb_outcome(), 0..100),
    ) {
        let mut session = Session::new(config).unwrap();
        for outcome in outcomes {
            session.apply(outcome);
        }
        for (i, point) in session.history().iter().enumerate() {
            prop_assert_eq!(point.step, i);
        }
    }
}

// ── 2. Accumulator signs ─────────────────────────────────────────────

proptest! {
    /// Both accumulators collect magnitudes, never signed deltas.
    #[test]
    fn accumulators_non_negative(
        config in arb_config(),
        outcomes in prop::collection::vec(arb_outcome(), 0..200),
    ) {
        let mut session = Session::new(config).unwrap();
        for outcome in outcomes {
            session.apply(outcome);
            prop_assert!(session.total_profit() >= 0.0);
            prop_assert!(session.total_loss() >= 0.0);
        }
    }

    /// Every derived metric stays a defined number under arbitrary input,
    /// including balances driven negative by risk > 100%.
    #[test]
    fn metrics_always_defined(
        config in arb_wild_config(),
        outcomes in prop::collection::vec(arb_outcome(), 0..200),
    ) {
        let mut session = Session::new(config).unwrap();
        for outcome in outcomes {
            session.apply(outcome);
            prop_assert!(session.max_drawdown_pct().is_finite());
            prop_assert!(session.sharpe_ratio().is_finite());
            let stats = session.stats();
            prop_assert!(stats.win_rate.is_finite());
            prop_assert!(stats.expected_value.is_finite());
            // profit_factor may be the INFINITY sentinel but never NaN
            prop_assert!(!stats.profit_factor.is_nan());
        }
    }
}

// ── 3. Reset round-trip ──────────────────────────────────────────────

proptest! {
    /// Configure-then-reset reproduces the pristine state, and a second
    /// reset changes nothing.
    #[test]
    fn reset_round_trip(
        config in arb_config(),
        outcomes in prop::collection::vec(arb_outcome(), 1..100),
    ) {
        let mut session = Session::new(config).unwrap();
        for outcome in outcomes {
            session.apply(outcome);
        }
        session.reset();

        prop_assert_eq!(session.current_balance(), config.initial_balance);
        prop_assert_eq!(session.counters().total(), 0);
        prop_assert_eq!(session.total_profit(), 0.0);
        prop_assert_eq!(session.total_loss(), 0.0);
        prop_assert_eq!(
            session.history(),
            &[EquityPoint { step: 0, balance: config.initial_balance }]
        );

        let first = session.clone();
        session.reset();
        prop_assert_eq!(session.history(), first.history());
        prop_assert_eq!(session.current_balance(), first.current_balance());
    }
}

// ── 4. Drawdown monotonicity ─────────────────────────────────────────

proptest! {
    /// Appending a point strictly below the running minimum never lowers
    /// the reported max drawdown.
    #[test]
    fn drawdown_monotone_under_new_lows(
        initial in 1_000.0..100_000.0_f64,
        balances in prop::collection::vec(0.5..1.5_f64, 1..50),
        dip in 0.01..0.5_f64,
    ) {
        let mut history: Vec<EquityPoint> = Vec::with_capacity(balances.len() + 2);
        history.push(EquityPoint { step: 0, balance: initial });
        for (i, factor) in balances.iter().enumerate() {
            history.push(EquityPoint { step: i + 1, balance: initial * factor });
        }

        let before = max_drawdown_pct(&history, initial);

        let current_min = history
            .iter()
            .map(|p| p.balance)
            .fold(f64::INFINITY, f64::min);
        history.push(EquityPoint {
            step: history.len(),
            balance: current_min * (1.0 - dip),
        });

        let after = max_drawdown_pct(&history, initial);
        prop_assert!(after >= before, "drawdown decreased: {before} -> {after}");
    }
}
