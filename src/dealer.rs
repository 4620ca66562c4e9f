use rand::Rng;

use crate::hand::{Hand, HandValue};
use crate::statearray::ShoeArray;

/// The dealer stands on any total at or above this, soft 17 included.
pub const DEALER_STAND_TOTAL: u16 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerResult {
    pub value: HandValue,
    /// Cards in the dealer's final hand, the initial ones included.
    pub number_of_cards: usize,
}

impl DealerResult {
    pub fn bust(&self) -> bool {
        self.value.bust()
    }
}

/// Draws for the dealer while the total is below 17. Stops early if the shoe
/// runs out.
pub fn play_dealer<R: Rng + ?Sized>(
    hand: &mut Hand,
    shoe: &mut ShoeArray,
    rng: &mut R,
) -> DealerResult {
    loop {
        if hand.value().total >= DEALER_STAND_TOTAL {
            break;
        }
        match shoe.draw(rng) {
            Some(card) => hand.receive_card(card),
            None => break,
        }
    }

    DealerResult {
        value: hand.value(),
        number_of_cards: hand.len(),
    }
}
