pub mod advisor;
pub mod card;
pub mod counting;
pub mod dealer;
mod error;
pub mod hand;
pub mod sidebet;
pub mod simulation;
pub mod statearray;
pub mod strategy;

pub use advisor::{recommend, recommend_action, Advice, AdvisorConfig, Recommendation};
pub use card::{Card, Rank, Suit};
pub use counting::{CountingSystem, RunningCount};
pub use error::{Error, Result};
pub use sidebet::PayoutTables;
pub use simulation::dealer_outcome::{sample_dealer_outcomes, DealerFinal, DealerOutcomes};
pub use simulation::round::{play_round, RoundOutcome};
pub use simulation::shoe::Shoe;
pub use simulation::{simulate, simulate_with_config, EvReport, SimulationConfig};
pub use statearray::ShoeArray;
pub use strategy::{BasicStrategy, Decision, Strategy};
