use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

use crate::card::Card;

// Per-rank weights, in rank order A, 2, ..., 10, J, Q, K.
static HI_LO: [f64; 13] = [-1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, -1.0, -1.0];
static ZEN: [f64; 13] = [-1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 0.0, 0.0, -2.0, -2.0, -2.0, -2.0];
static WONG_HALVES: [f64; 13] = [
    -1.0, 0.5, 1.0, 1.0, 1.5, 1.0, 0.5, 0.0, -0.5, -1.0, -1.0, -1.0, -1.0,
];
static OMEGA_II: [f64; 13] = [0.0, 1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 0.0, -1.0, -2.0, -2.0, -2.0, -2.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize_enum_str, Deserialize_enum_str)]
pub enum CountingSystem {
    HiLo,
    Zen,
    WongHalves,
    OmegaII,
}

impl CountingSystem {
    pub fn weight(self, card: Card) -> f64 {
        let weights = match self {
            CountingSystem::HiLo => &HI_LO,
            CountingSystem::Zen => &ZEN,
            CountingSystem::WongHalves => &WONG_HALVES,
            CountingSystem::OmegaII => &OMEGA_II,
        };
        weights[card.rank as usize]
    }
}

/// Running count of one counting system over the cards seen so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningCount {
    system: CountingSystem,
    running_count: f64,
}

impl RunningCount {
    pub fn new(system: CountingSystem) -> RunningCount {
        RunningCount {
            system,
            running_count: 0.0,
        }
    }

    pub fn update(&mut self, card: Card) {
        self.running_count += self.system.weight(card);
    }

    /// Reverts a previous [`RunningCount::update`] for `card`.
    pub fn undo(&mut self, card: Card) {
        self.running_count -= self.system.weight(card);
    }

    pub fn reset(&mut self) {
        self.running_count = 0.0;
    }

    pub fn running_count(&self) -> f64 {
        self.running_count
    }

    pub fn system(&self) -> CountingSystem {
        self.system
    }

    /// Running count per remaining deck. Zero once no deck remains.
    pub fn true_count(&self, decks_remaining: f64) -> f64 {
        if decks_remaining <= 0.0 {
            return 0.0;
        }
        self.running_count / decks_remaining
    }
}
