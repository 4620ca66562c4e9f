use rand::Rng;

use crate::card::Card;
use crate::dealer::play_dealer;
use crate::hand::Hand;
use crate::sidebet::{
    evaluate_21_plus_3, evaluate_bust, evaluate_hot_three, evaluate_perfect_pair, PayoutTables,
};
use crate::statearray::ShoeArray;
use crate::strategy::{play_player, Strategy};

/// A player natural that the dealer does not match pays 3 to 2.
pub const PAYOUT_BLACKJACK: f64 = 1.5;

/// Result of one simulated round, in units of the base wager.
///
/// `main` is the signed result of the main wager. The side-bet fields are
/// gross payouts: a miss adds nothing rather than losing the stake.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundOutcome {
    pub main: f64,
    pub bust: f64,
    pub twenty_one_plus_three: f64,
    pub perfect_pair: f64,
    pub hot_three: f64,
}

/// Plays one round from a private copy of `template`.
///
/// If the shoe cannot supply the four initial cards the round is void and
/// every field of the outcome is zero.
pub fn play_round<S: Strategy, R: Rng + ?Sized>(
    template: &ShoeArray,
    strategy: &S,
    payouts: &PayoutTables,
    rng: &mut R,
) -> RoundOutcome {
    let mut shoe = *template;
    let dealt = deal_initial_cards(&mut shoe, rng);
    let Some((player_cards, dealer_up_card, dealer_hole_card)) = dealt else {
        return RoundOutcome::default();
    };

    let mut outcome = RoundOutcome {
        twenty_one_plus_three: payouts
            .pay_21_plus_3(evaluate_21_plus_3(&player_cards, dealer_up_card)),
        perfect_pair: payouts.pay_perfect_pair(evaluate_perfect_pair(&player_cards)),
        hot_three: payouts.pay_hot_three(evaluate_hot_three(&player_cards, dealer_up_card)),
        ..Default::default()
    };

    let mut player = Hand::from(player_cards.as_slice());
    let mut dealer = Hand::from([dealer_up_card, dealer_hole_card].as_slice());

    match (player.is_natural(), dealer.is_natural()) {
        (true, true) => {}
        (true, false) => outcome.main = PAYOUT_BLACKJACK,
        (false, true) => outcome.main = -1.0,
        (false, false) => {
            let player_result = play_player(
                strategy,
                &mut player,
                dealer_up_card.blackjack_value(),
                &mut shoe,
                rng,
            );
            let dealer_result = play_dealer(&mut dealer, &mut shoe, rng);
            let bet = player_result.bet_multiplier;
            let player_total = player_result.value.total;
            let dealer_total = dealer_result.value.total;

            outcome.main = if player_result.value.bust() {
                -bet
            } else if dealer_result.bust() {
                outcome.bust = payouts.pay_bust(evaluate_bust(dealer_result.number_of_cards));
                bet
            } else if player_total > dealer_total {
                bet
            } else if player_total < dealer_total {
                -bet
            } else {
                0.0
            };
        }
    }

    outcome
}

/// Deals player, player, dealer up, dealer hole, in that order.
fn deal_initial_cards<R: Rng + ?Sized>(
    shoe: &mut ShoeArray,
    rng: &mut R,
) -> Option<([Card; 2], Card, Card)> {
    let first = shoe.draw(rng)?;
    let second = shoe.draw(rng)?;
    let dealer_up_card = shoe.draw(rng)?;
    let dealer_hole_card = shoe.draw(rng)?;
    Some(([first, second], dealer_up_card, dealer_hole_card))
}
