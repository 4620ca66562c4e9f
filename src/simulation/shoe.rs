use std::collections::BTreeMap;

use crate::card::{Card, NUMBER_OF_IDENTITIES};
use crate::statearray::ShoeArray;
use crate::{Error, Result};

/// Represents the shoe on the table: the cards not yet seen.
///
/// Simulations never touch it directly. They take a [`Shoe::snapshot`] when a
/// batch starts.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    cards: ShoeArray,
    total_cards: u32,
}

impl Shoe {
    /// Creates a full shoe. Fails if `number_of_decks` is 0.
    pub fn new(number_of_decks: u8) -> Result<Shoe> {
        if number_of_decks == 0 {
            return Err(Error::InvalidDeckCount(number_of_decks));
        }
        let mut shoe = Shoe {
            number_of_decks,
            cards: ShoeArray::default(),
            total_cards: 0,
        };
        shoe.reset();
        Ok(shoe)
    }

    /// Puts every dealt card back.
    pub fn reset(&mut self) {
        self.cards = ShoeArray::with_number_of_decks(self.number_of_decks);
        self.total_cards = self.initial_card_count();
    }

    /// Marks `card` as dealt.
    pub fn remove_card(&mut self, card: Card) -> Result<()> {
        if !self.cards.remove_card(card) {
            return Err(Error::CardUnavailable(card));
        }
        self.total_cards -= 1;
        Ok(())
    }

    /// Returns a previously removed `card` to the shoe.
    pub fn restore_card(&mut self, card: Card) -> Result<()> {
        if self.cards[card] >= self.number_of_decks as u16 {
            return Err(Error::ShoeFull(card));
        }
        self.cards.add_card(card);
        self.total_cards += 1;
        Ok(())
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    pub fn initial_card_count(&self) -> u32 {
        self.number_of_decks as u32 * NUMBER_OF_IDENTITIES as u32
    }

    pub fn total_cards(&self) -> u32 {
        self.total_cards
    }

    pub fn decks_remaining(&self) -> f64 {
        self.total_cards as f64 / NUMBER_OF_IDENTITIES as f64
    }

    /// Fraction of the shoe already dealt.
    pub fn penetration(&self) -> f64 {
        let initial = self.initial_card_count();
        (initial - self.total_cards) as f64 / initial as f64
    }

    pub fn count(&self, card: Card) -> u16 {
        self.cards[card]
    }

    /// Card codes still in the shoe with their counts. Cards with nothing
    /// left are omitted.
    pub fn remaining_cards(&self) -> BTreeMap<String, u16> {
        self.cards
            .counts()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .filter_map(|(index, &count)| {
                ShoeArray::decode(index).map(|card| (card.to_string(), count))
            })
            .collect()
    }

    /// Read-only copy for a simulation batch.
    pub fn snapshot(&self) -> ShoeArray {
        self.cards
    }
}
