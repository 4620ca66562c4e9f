use std::ops::Index;

use rand::Rng;
use tracing::warn;

use crate::card::{Card, NUMBER_OF_IDENTITIES};

/// Remaining cards of a shoe as 52 per-identity counts, laid out in the
/// canonical card order (see [`Card::index`]).
///
/// Every simulation worker draws from its own copy, so the array is `Copy`
/// and all mutation goes through `&mut self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoeArray {
    counts: [u16; NUMBER_OF_IDENTITIES],
}

impl Default for ShoeArray {
    fn default() -> Self {
        ShoeArray {
            counts: [0; NUMBER_OF_IDENTITIES],
        }
    }
}

impl ShoeArray {
    /// A full shoe holding `number_of_decks` copies of every card.
    pub fn with_number_of_decks(number_of_decks: u8) -> ShoeArray {
        ShoeArray {
            counts: [number_of_decks as u16; NUMBER_OF_IDENTITIES],
        }
    }

    /// Builds the array from card codes (e.g. `"10H"`) and their remaining
    /// counts. Codes outside the canonical 52 are skipped.
    pub fn encode<'a, I>(remaining: I) -> ShoeArray
    where
        I: IntoIterator<Item = (&'a str, u16)>,
    {
        let mut shoe = ShoeArray::default();
        for (code, count) in remaining {
            match code.parse::<Card>() {
                Ok(card) => shoe.counts[card.index()] = count,
                Err(_) => warn!(code, count, "ignoring unknown card code"),
            }
        }
        shoe
    }

    /// Maps a slot back to its card. Returns None for slots outside [0, 52).
    pub fn decode(index: usize) -> Option<Card> {
        if index < NUMBER_OF_IDENTITIES {
            Some(Card::from_index(index))
        } else {
            None
        }
    }

    /// Number of physical cards left.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn add_card(&mut self, card: Card) {
        self.counts[card.index()] += 1;
    }

    /// Takes one copy of `card` out. Returns false if none is left.
    pub fn remove_card(&mut self, card: Card) -> bool {
        let count = &mut self.counts[card.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Removes and returns a uniformly chosen physical card, or None once the
    /// shoe is exhausted.
    ///
    /// The choice is weighted by the remaining count of each slot, so every
    /// physical card is equally likely rather than every identity.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let choice = rng.gen_range(0..total);
        let mut acc = 0;
        for (index, count) in self.counts.iter_mut().enumerate() {
            acc += *count as u32;
            if acc > choice {
                *count -= 1;
                return Some(Card::from_index(index));
            }
        }

        None
    }

    pub fn counts(&self) -> &[u16; NUMBER_OF_IDENTITIES] {
        &self.counts
    }
}

impl Index<Card> for ShoeArray {
    type Output = u16;
    fn index(&self, card: Card) -> &Self::Output {
        &self.counts[card.index()]
    }
}
