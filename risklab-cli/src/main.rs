//! RiskLab CLI — simulate equity curves under a fixed risk/reward rule.
//!
//! Commands:
//! - `run` — apply an outcome sequence (`WWLB…`) from the command line or a
//!   TOML spec file and print the derived metrics
//! - `monte-carlo` — run a seeded batch of random outcome streams and print
//!   the resulting distributions
//!
//! All two-decimal and `$`-prefixed formatting lives here; the engine and
//! runner return full-precision numbers.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use risklab_core::SimulationConfig;
use risklab_runner::{
    run_from_sequence, run_monte_carlo, save_artifacts, Distribution, MonteCarloConfig, RunSpec,
    SimulationResult,
};

#[derive(Parser)]
#[command(
    name = "risklab",
    about = "RiskLab CLI — fixed risk/reward equity-curve simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an outcome sequence and print the derived metrics.
    Run {
        /// Outcome sequence, e.g. WWLB (W = win, L = loss, B = break-even).
        #[arg(long, conflicts_with = "config")]
        sequence: Option<String>,

        /// Path to a TOML spec file carrying simulation + sequence.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial balance. Ignored when --config is given.
        #[arg(long, default_value_t = 10_000.0)]
        balance: f64,

        /// Percent of balance lost on a losing trade.
        #[arg(long, default_value_t = 1.0)]
        risk: f64,

        /// Percent of balance gained on a winning trade.
        #[arg(long, default_value_t = 2.0)]
        reward: f64,

        /// Save manifest.json and equity.csv under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Run a seeded Monte Carlo batch and print the distributions.
    MonteCarlo {
        /// Path to a TOML spec file with a [monte_carlo] section.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of independent runs.
        #[arg(long, default_value_t = 1000)]
        runs: usize,

        /// Outcomes drawn per run.
        #[arg(long, default_value_t = 100)]
        trades: usize,

        /// Probability a trade wins (0..=1).
        #[arg(long, default_value_t = 0.5)]
        win_prob: f64,

        /// Probability a trade breaks even (0..=1).
        #[arg(long, default_value_t = 0.0)]
        break_even_prob: f64,

        /// Base RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Initial balance. Ignored when --config is given.
        #[arg(long, default_value_t = 10_000.0)]
        balance: f64,

        /// Percent of balance lost on a losing trade.
        #[arg(long, default_value_t = 1.0)]
        risk: f64,

        /// Percent of balance gained on a winning trade.
        #[arg(long, default_value_t = 2.0)]
        reward: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            sequence,
            config,
            balance,
            risk,
            reward,
            output_dir,
        } => cmd_run(sequence, config, balance, risk, reward, output_dir),
        Commands::MonteCarlo {
            config,
            runs,
            trades,
            win_prob,
            break_even_prob,
            seed,
            balance,
            risk,
            reward,
        } => cmd_monte_carlo(
            config,
            runs,
            trades,
            win_prob,
            break_even_prob,
            seed,
            balance,
            risk,
            reward,
        ),
    }
}

fn cmd_run(
    sequence: Option<String>,
    config: Option<PathBuf>,
    balance: f64,
    risk: f64,
    reward: f64,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let (simulation, sequence) = match config {
        Some(path) => {
            let spec = RunSpec::load(&path)
                .with_context(|| format!("failed to load spec {}", path.display()))?;
            let seq = spec
                .sequence
                .clone()
                .context("spec file has no `sequence` entry")?;
            (spec.simulation, seq)
        }
        None => {
            let Some(seq) = sequence else {
                bail!("either --sequence or --config is required");
            };
            (SimulationConfig::new(balance, risk, reward), seq)
        }
    };

    let result = run_from_sequence(&simulation, &sequence)?;
    print_result(&result);

    if let Some(dir) = output_dir {
        let saved = save_artifacts(&dir, &result)?;
        println!("\nArtifacts saved to {}", saved.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_monte_carlo(
    config: Option<PathBuf>,
    runs: usize,
    trades: usize,
    win_prob: f64,
    break_even_prob: f64,
    seed: u64,
    balance: f64,
    risk: f64,
    reward: f64,
) -> Result<()> {
    let (simulation, mc) = match config {
        Some(path) => {
            let spec = RunSpec::load(&path)
                .with_context(|| format!("failed to load spec {}", path.display()))?;
            let mc = spec
                .monte_carlo
                .context("spec file has no [monte_carlo] section")?;
            (spec.simulation, mc)
        }
        None => (
            SimulationConfig::new(balance, risk, reward),
            MonteCarloConfig {
                runs,
                trades_per_run: trades,
                win_prob,
                break_even_prob,
                seed,
            },
        ),
    };

    let result = run_monte_carlo(&simulation, &mc)?;

    println!("Monte Carlo — {} runs x {} trades", result.runs, mc.trades_per_run);
    println!(
        "  win prob {:.2}  break-even prob {:.2}  seed {}",
        mc.win_prob, mc.break_even_prob, mc.seed
    );
    println!();
    print_distribution("Final balance", &result.final_balance, true);
    print_distribution("Max drawdown %", &result.max_drawdown_pct, false);
    print_distribution("Sharpe ratio", &result.sharpe_ratio, false);
    println!(
        "  Risk of ruin:      {:.2}%",
        result.ruin_fraction * 100.0
    );
    Ok(())
}

fn print_result(result: &SimulationResult) {
    let stats = &result.stats;
    println!("Run {}", &result.run_id[..12]);
    println!("  Sequence:          {}", result.sequence);
    println!(
        "  Config:            ${:.2} start, {:.2}% risk, {:.2}% reward (R:R {})",
        result.config.initial_balance,
        result.config.risk_pct,
        result.config.reward_pct,
        format_ratio(result.rr_ratio),
    );
    println!();
    println!("  Final balance:     ${:.2}", result.final_balance);
    println!("  Net profit:        ${:.2}", stats.net_profit);
    println!("  Max drawdown:      {:.2}%", result.max_drawdown_pct);
    println!("  Sharpe ratio:      {:.2}", result.sharpe_ratio);
    println!();
    println!(
        "  Trades:            {} ({} W / {} L / {} BE)",
        stats.total_trades, result.counters.wins, result.counters.losses, result.counters.break_evens
    );
    println!("  Win rate:          {:.2}%", stats.win_rate);
    println!("  Loss rate:         {:.2}%", stats.loss_rate);
    println!("  Break-even rate:   {:.2}%", stats.break_even_rate);
    println!("  Average win:       ${:.2}", stats.average_win);
    println!("  Average loss:      ${:.2}", stats.average_loss);
    println!("  Profit factor:     {}", format_ratio(stats.profit_factor));
    println!("  Expected value:    ${:.2}", stats.expected_value);
}

fn print_distribution(label: &str, dist: &Distribution, currency: bool) {
    if currency {
        println!(
            "  {label:<18} p05 ${:.2}   median ${:.2}   p95 ${:.2}",
            dist.p05, dist.median, dist.p95
        );
    } else {
        println!(
            "  {label:<18} p05 {:.2}   median {:.2}   p95 {:.2}",
            dist.p05, dist.median, dist.p95
        );
    }
}

/// Ratios that may carry the infinity sentinel print as "inf".
fn format_ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "inf".to_string()
    }
}
