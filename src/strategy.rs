use rand::Rng;

use crate::hand::{Hand, HandValue};
use crate::statearray::ShoeArray;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
    Double,
}

pub trait Strategy {
    /// Chooses an action for a hand worth `value` against a dealer upcard
    /// worth `dealer_up_value` (2 to 11, ace counted as 11).
    ///
    /// `first_decision` is true only while the hand still holds its two
    /// initial cards. Implementations must never return
    /// [`Decision::Double`] otherwise.
    fn make_decision(&self, value: HandValue, dealer_up_value: u8, first_decision: bool)
        -> Decision;
}

/// Fixed basic-strategy charts. Each cell holds the preferred action and the
/// action taken when doubling is no longer allowed.
#[derive(Debug, Clone)]
pub struct BasicStrategy {
    hard_charts: [[(Decision, Decision); 10]; 10],
    soft_charts: [[(Decision, Decision); 10]; 8],
}

impl Default for BasicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicStrategy {
    pub fn new() -> BasicStrategy {
        const H: (Decision, Decision) = (Decision::Hit, Decision::Hit);
        const S: (Decision, Decision) = (Decision::Stand, Decision::Stand);
        const DH: (Decision, Decision) = (Decision::Double, Decision::Hit);
        const DS: (Decision, Decision) = (Decision::Double, Decision::Stand);

        // Columns: dealer up card 2, 3, ..., 10, A.
        BasicStrategy {
            hard_charts: [
                [H, H, H, H, H, H, H, H, H, H], // 8 and below
                [H, DH, DH, DH, DH, H, H, H, H, H],
                [DH, DH, DH, DH, DH, DH, DH, DH, H, H],
                [DH, DH, DH, DH, DH, DH, DH, DH, DH, H],
                [H, H, S, S, S, H, H, H, H, H], // 12
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H], // 16
                [S, S, S, S, S, S, S, S, S, S], // 17 and above
            ],
            soft_charts: [
                [S, S, S, S, S, S, S, S, S, S], // Soft 12 (two aces)
                [H, H, H, DH, DH, H, H, H, H, H],
                [H, H, H, DH, DH, H, H, H, H, H],
                [H, H, DH, DH, DH, H, H, H, H, H],
                [H, H, DH, DH, DH, H, H, H, H, H],
                [H, DH, DH, DH, DH, H, H, H, H, H], // Soft 17
                [S, DS, DS, DS, DS, S, S, H, H, H],
                [S, S, S, S, S, S, S, S, S, S], // Soft 19 and above
            ],
        }
    }

    fn lookup(&self, value: HandValue, dealer_up_value: u8) -> (Decision, Decision) {
        let col = (dealer_up_value.clamp(2, 11) - 2) as usize;
        if value.soft {
            let row = (value.total.clamp(12, 19) - 12) as usize;
            self.soft_charts[row][col]
        } else {
            let row = (value.total.clamp(8, 17) - 8) as usize;
            self.hard_charts[row][col]
        }
    }
}

impl Strategy for BasicStrategy {
    fn make_decision(
        &self,
        value: HandValue,
        dealer_up_value: u8,
        first_decision: bool,
    ) -> Decision {
        let (decision, fallback) = self.lookup(value, dealer_up_value);
        if decision == Decision::Double && !first_decision {
            fallback
        } else {
            decision
        }
    }
}

/// How a finished player hand ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerResult {
    pub value: HandValue,
    pub bet_multiplier: f64,
}

/// Plays `hand` to completion, drawing from `shoe`.
///
/// A double is only possible on the initial two cards: it draws exactly one
/// card and stops. Otherwise the hand hits until the strategy stands, the
/// hand busts or the shoe runs out.
pub fn play_player<S: Strategy, R: Rng + ?Sized>(
    strategy: &S,
    hand: &mut Hand,
    dealer_up_value: u8,
    shoe: &mut ShoeArray,
    rng: &mut R,
) -> PlayerResult {
    let mut bet_multiplier = 1.0;
    if hand.len() == 2
        && strategy.make_decision(hand.value(), dealer_up_value, true) == Decision::Double
    {
        if let Some(card) = shoe.draw(rng) {
            hand.receive_card(card);
            bet_multiplier = 2.0;
        }
        return PlayerResult {
            value: hand.value(),
            bet_multiplier,
        };
    }

    loop {
        let value = hand.value();
        if value.bust() {
            break;
        }
        if strategy.make_decision(value, dealer_up_value, false) != Decision::Hit {
            break;
        }
        match shoe.draw(rng) {
            Some(card) => hand.receive_card(card),
            None => break,
        }
    }

    PlayerResult {
        value: hand.value(),
        bet_multiplier,
    }
}
