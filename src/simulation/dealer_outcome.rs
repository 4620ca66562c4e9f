use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;

use crate::card::Card;
use crate::dealer::play_dealer;
use crate::hand::Hand;
use crate::statearray::ShoeArray;

/// Where the dealer's hand ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DealerFinal {
    Total(u16),
    Bust,
}

impl fmt::Display for DealerFinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealerFinal::Total(total) => write!(f, "{}", total),
            DealerFinal::Bust => write!(f, "bust"),
        }
    }
}

/// Probability of each final dealer outcome. Values sum to 1 unless empty.
pub type DealerOutcomes = BTreeMap<DealerFinal, f64>;

/// Estimates the dealer's final total given `up_card` and the remaining
/// `shoe`, which must still contain `up_card`.
///
/// Returns an empty map if `up_card` is not in the shoe or `samples` is 0.
pub fn sample_dealer_outcomes(up_card: Card, shoe: &ShoeArray, samples: u64) -> DealerOutcomes {
    sample_dealer_outcomes_with_rng(up_card, shoe, samples, &mut rand::thread_rng())
}

pub fn sample_dealer_outcomes_with_rng<R: Rng + ?Sized>(
    up_card: Card,
    shoe: &ShoeArray,
    samples: u64,
    rng: &mut R,
) -> DealerOutcomes {
    let mut template = *shoe;
    if samples == 0 || !template.remove_card(up_card) {
        return DealerOutcomes::new();
    }

    let mut counts: BTreeMap<DealerFinal, u64> = BTreeMap::new();
    for _ in 0..samples {
        let mut local = template;
        let mut hand = Hand::new();
        hand.receive_card(up_card);
        let result = play_dealer(&mut hand, &mut local, rng);
        let key = if result.bust() {
            DealerFinal::Bust
        } else {
            DealerFinal::Total(result.value.total)
        };
        *counts.entry(key).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / samples as f64))
        .collect()
}
