//! Monte-Carlo estimation of expected values for the main wager and the side
//! wagers.
//!
//! A batch is split across independent worker threads. Each worker draws
//! from its own copies of the shoe template with its own entropy-seeded RNG
//! and keeps private sums, which are only added together after every worker
//! has finished.

pub mod dealer_outcome;
pub mod round;
pub mod shoe;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sidebet::PayoutTables;
use crate::statearray::ShoeArray;
use crate::strategy::{BasicStrategy, Strategy};

use self::round::{play_round, RoundOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Requested number of worker threads. Capped by available parallelism.
    pub workers: usize,
    pub rounds_per_worker: u64,
    #[serde(default)]
    pub payouts: PayoutTables,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            workers: 4,
            rounds_per_worker: 100_000,
            payouts: PayoutTables::default(),
        }
    }
}

/// Expected payout per unit wagered, one figure per bet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EvReport {
    pub main_ev: f64,
    pub bust_ev: f64,
    pub twenty_one_plus_three_ev: f64,
    pub pair_ev: f64,
    pub hot_three_ev: f64,
    /// Workers that actually ran.
    pub workers: usize,
    /// Rounds simulated in total: `workers * rounds_per_worker`.
    pub rounds: u64,
}

/// Sums kept privately by one worker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    main: f64,
    bust: f64,
    twenty_one_plus_three: f64,
    perfect_pair: f64,
    hot_three: f64,
}

impl Accumulator {
    fn add(&mut self, outcome: &RoundOutcome) {
        self.main += outcome.main;
        self.bust += outcome.bust;
        self.twenty_one_plus_three += outcome.twenty_one_plus_three;
        self.perfect_pair += outcome.perfect_pair;
        self.hot_three += outcome.hot_three;
    }

    fn merge(&mut self, other: &Accumulator) {
        self.main += other.main;
        self.bust += other.bust;
        self.twenty_one_plus_three += other.twenty_one_plus_three;
        self.perfect_pair += other.perfect_pair;
        self.hot_three += other.hot_three;
    }
}

/// Runs `workers * rounds_per_worker` rounds (fewer workers if the machine
/// has fewer cores) with the default payout tables.
pub fn simulate(shoe: &ShoeArray, workers: usize, rounds_per_worker: u64) -> EvReport {
    let config = SimulationConfig {
        workers,
        rounds_per_worker,
        payouts: PayoutTables::default(),
    };
    simulate_with_config(shoe, &config)
}

/// Zero workers or zero rounds yield an all-zero report.
pub fn simulate_with_config(shoe: &ShoeArray, config: &SimulationConfig) -> EvReport {
    if config.workers == 0 || config.rounds_per_worker == 0 {
        debug!(
            workers = config.workers,
            rounds_per_worker = config.rounds_per_worker,
            "empty simulation request"
        );
        return EvReport::default();
    }

    if shoe.total() < 4 {
        warn!(cards = shoe.total(), "shoe cannot deal a round, every round is void");
    }

    let number_of_threads = number_of_threads(config.workers);
    let rounds = config.rounds_per_worker;
    let strategy = BasicStrategy::new();
    let start = Instant::now();
    debug!(
        threads = number_of_threads,
        rounds_per_worker = rounds,
        cards = shoe.total(),
        "simulation batch started"
    );

    let total = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..number_of_threads)
            .map(|_| scope.spawn(|| simulate_chunk(shoe, &strategy, &config.payouts, rounds)))
            .collect();

        let mut total = Accumulator::default();
        for handle in handles {
            match handle.join() {
                Ok(sums) => total.merge(&sums),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    });

    let total_rounds = number_of_threads as u64 * rounds;
    let divisor = total_rounds as f64;
    debug!(
        rounds = total_rounds,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "simulation batch finished"
    );

    EvReport {
        main_ev: total.main / divisor,
        bust_ev: total.bust / divisor,
        twenty_one_plus_three_ev: total.twenty_one_plus_three / divisor,
        pair_ev: total.perfect_pair / divisor,
        hot_three_ev: total.hot_three / divisor,
        workers: number_of_threads,
        rounds: total_rounds,
    }
}

fn number_of_threads(requested: usize) -> usize {
    let hardware = match std::thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(_) => 1,
    };
    requested.min(hardware).max(1)
}

fn simulate_chunk<S: Strategy>(
    template: &ShoeArray,
    strategy: &S,
    payouts: &PayoutTables,
    rounds: u64,
) -> Accumulator {
    let mut rng = StdRng::from_entropy();
    let mut sums = Accumulator::default();
    for _ in 0..rounds {
        sums.add(&play_round(template, strategy, payouts, &mut rng));
    }
    sums
}
