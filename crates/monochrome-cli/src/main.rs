// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Monochrome shop solver CLI
//!
//! Searches for the cheapest input sequence that finishes the shop with at
//! least the required profit.
//!
//! # Example
//!
//! ```bash
//! # Exhaustive search of offsets 0..=2, at most 24 steps
//! monochrome 3580817068 -m deep -a 2 --max-length 24
//!
//! # Both strategies, give up after a minute
//! monochrome 3580817068 --time-limit 60
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use monochrome_bnb::monitor::log::LogMonitor;
use monochrome_model::{
    cost::{CostModel, MedicineAdjustment, Score},
    rules::{REQUIRED_PROFIT, ShopRules},
    shop::DepartureCounting,
};
use monochrome_search::result::SolverOutcome;
use monochrome_solver::{
    config::{SearchMode, SolverConfig},
    solver::{Solver, SolverBuilder},
    stop::StopHandle,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Monochrome shop solver
///
/// Runs a parallel search over every pre-advance offset of the seed and
/// prints the best sequence found.
#[derive(Parser, Debug)]
#[command(name = "monochrome")]
#[command(version, about, long_about = None)]
struct Args {
    /// The generator state when the shop opens
    seed: u32,

    /// Highest pre-advance offset to search
    #[arg(short = 'a', long, default_value = "4")]
    advances: u32,

    /// Sampler rollouts per offset
    #[arg(long, default_value = "5000000")]
    attempts: u64,

    /// Only report sequences scoring strictly below this
    #[arg(short = 's', long, default_value = "99999")]
    score: Score,

    /// Search mode: deep (bnb), heuristic (sampler) or combined
    #[arg(short = 'm', long, default_value = "combined")]
    mode: SearchMode,

    /// Maximum number of steps per sequence, pre-advances included
    #[arg(long, default_value = "30")]
    max_length: usize,

    /// Plies per branch-and-bound wave
    #[arg(long, default_value = "10")]
    wave_size: usize,

    /// Stop after this many seconds and report the best sequence so far
    #[arg(long)]
    time_limit: Option<u64>,

    /// Charge medicine sales to Muchomon with the rebate instead of the
    /// self-cancelling adjustment
    #[arg(long)]
    rebate: bool,

    /// Count every departure as two of the 20 customers
    #[arg(long)]
    double_departures: bool,

    /// Log branch-and-bound progress once per second
    #[arg(long)]
    progress: bool,
}

impl Args {
    fn config(&self) -> SolverConfig {
        let adjustment = if self.rebate {
            MedicineAdjustment::Rebate
        } else {
            MedicineAdjustment::SelfCancelling
        };
        let departures = if self.double_departures {
            DepartureCounting::Double
        } else {
            DepartureCounting::Single
        };
        let rules = ShopRules::new(REQUIRED_PROFIT, CostModel::new(adjustment))
            .with_departure_counting(departures);
        SolverConfig::default()
            .with_max_advances(self.advances)
            .with_sampler_attempts(self.attempts)
            .with_score_ceiling(self.score)
            .with_mode(self.mode)
            .with_max_sequence_length(self.max_length)
            .with_wave_size(self.wave_size)
            .with_rules(rules)
    }

    fn build_solver(&self) -> Result<Solver> {
        let mut builder = SolverBuilder::new().with_config(self.config());
        if self.progress {
            builder = builder.with_progress_log(LogMonitor::default());
        }
        builder.build().context("invalid solver configuration")
    }
}

/// Stops the solver after `limit` unless the process exits first.
fn spawn_time_limit(handle: StopHandle, limit: Duration) -> Result<()> {
    std::thread::Builder::new()
        .name("time-limit".to_string())
        .spawn(move || {
            std::thread::sleep(limit);
            info!(limit_secs = limit.as_secs(), "time limit reached, stopping");
            handle.stop();
        })
        .context("failed to spawn the time-limit thread")?;
    Ok(())
}

fn print_outcome(outcome: &SolverOutcome, ceiling: Score) {
    println!("{}", outcome);
    if !outcome.has_solution() {
        println!("No qualifying sequence scores below {}.", ceiling);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,monochrome=info")),
        )
        .init();

    let args = Args::parse();
    let solver = args.build_solver()?;

    if let Some(secs) = args.time_limit {
        spawn_time_limit(solver.stop_handle(), Duration::from_secs(secs))?;
    }

    let outcome = solver.solve(args.seed);
    print_outcome(&outcome, args.score);
    Ok(())
}
