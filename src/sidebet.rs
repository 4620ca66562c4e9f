//! Side wagers settled from the player's first two cards and the dealer's
//! up card, independent of how the main hand plays out.
//!
//! Classification is pure. What a category pays lives in [`PayoutTables`],
//! which can be replaced from configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::card::{Card, Rank};
use crate::hand::evaluate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TwentyOnePlusThree {
    Flush,
    Straight,
    ThreeKind,
    StraightFlush,
    SuitedTrips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PerfectPair {
    Pair,
    SuitedPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, Serialize, Deserialize)]
pub enum HotThree {
    #[serde(rename = "19")]
    #[strum(serialize = "19")]
    Nineteen,
    #[serde(rename = "20")]
    #[strum(serialize = "20")]
    Twenty,
    #[serde(rename = "20suited")]
    #[strum(serialize = "20suited")]
    TwentySuited,
    #[serde(rename = "21")]
    #[strum(serialize = "21")]
    TwentyOne,
    #[serde(rename = "21suited")]
    #[strum(serialize = "21suited")]
    TwentyOneSuited,
    #[serde(rename = "777")]
    #[strum(serialize = "777")]
    TripleSevens,
}

/// Bust-O-Rama buckets: how many cards the dealer held when busting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, Serialize, Deserialize)]
pub enum BustCards {
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Three,
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Four,
    #[serde(rename = "5")]
    #[strum(serialize = "5")]
    Five,
    #[serde(rename = "6")]
    #[strum(serialize = "6")]
    Six,
    #[serde(rename = "7")]
    #[strum(serialize = "7")]
    Seven,
    #[serde(rename = "8+")]
    #[strum(serialize = "8+")]
    EightOrMore,
}

impl BustCards {
    pub fn from_number_of_cards(number_of_cards: usize) -> Option<BustCards> {
        match number_of_cards {
            0..=2 => None,
            3 => Some(BustCards::Three),
            4 => Some(BustCards::Four),
            5 => Some(BustCards::Five),
            6 => Some(BustCards::Six),
            7 => Some(BustCards::Seven),
            _ => Some(BustCards::EightOrMore),
        }
    }
}

fn is_flush(cards: &[Card; 3]) -> bool {
    cards[0].suit == cards[1].suit && cards[1].suit == cards[2].suit
}

fn is_straight(cards: &[Card; 3]) -> bool {
    let mut orders = [cards[0].rank.order(), cards[1].rank.order(), cards[2].rank.order()];
    orders.sort_unstable();
    let consecutive = orders[1] == orders[0] + 1 && orders[2] == orders[1] + 1;
    // Ace plays high in Q-K-A. A-2-3 is already consecutive.
    consecutive || orders == [1, 12, 13]
}

pub fn evaluate_21_plus_3(
    player: &[Card; 2],
    dealer_up_card: Card,
) -> Option<TwentyOnePlusThree> {
    let cards = [player[0], player[1], dealer_up_card];
    let flush = is_flush(&cards);
    if cards[0].rank == cards[1].rank && cards[1].rank == cards[2].rank {
        return Some(if flush {
            TwentyOnePlusThree::SuitedTrips
        } else {
            TwentyOnePlusThree::ThreeKind
        });
    }

    match (flush, is_straight(&cards)) {
        (true, true) => Some(TwentyOnePlusThree::StraightFlush),
        (true, false) => Some(TwentyOnePlusThree::Flush),
        (false, true) => Some(TwentyOnePlusThree::Straight),
        (false, false) => None,
    }
}

pub fn evaluate_perfect_pair(player: &[Card; 2]) -> Option<PerfectPair> {
    if player[0].rank != player[1].rank {
        None
    } else if player[0].suit == player[1].suit {
        Some(PerfectPair::SuitedPair)
    } else {
        Some(PerfectPair::Pair)
    }
}

pub fn evaluate_hot_three(player: &[Card; 2], dealer_up_card: Card) -> Option<HotThree> {
    let cards = [player[0], player[1], dealer_up_card];
    let suited = is_flush(&cards);
    match evaluate(&cards).total {
        21 if cards.iter().all(|c| c.rank == Rank::Seven) => Some(HotThree::TripleSevens),
        21 if suited => Some(HotThree::TwentyOneSuited),
        21 => Some(HotThree::TwentyOne),
        20 if suited => Some(HotThree::TwentySuited),
        20 => Some(HotThree::Twenty),
        19 => Some(HotThree::Nineteen),
        _ => None,
    }
}

/// Bust-O-Rama only cares about how many cards the busted dealer held.
pub fn evaluate_bust(number_of_cards: usize) -> Option<BustCards> {
    BustCards::from_number_of_cards(number_of_cards)
}

/// Payout multiple per category. A category missing from a table pays 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutTables {
    pub twenty_one_plus_three: BTreeMap<TwentyOnePlusThree, f64>,
    pub perfect_pair: BTreeMap<PerfectPair, f64>,
    pub hot_three: BTreeMap<HotThree, f64>,
    pub bust: BTreeMap<BustCards, f64>,
}

impl Default for PayoutTables {
    fn default() -> Self {
        use BustCards as B;
        use HotThree as H;
        use TwentyOnePlusThree as T;

        PayoutTables {
            twenty_one_plus_three: BTreeMap::from([
                (T::Flush, 5.0),
                (T::Straight, 10.0),
                (T::ThreeKind, 30.0),
                (T::StraightFlush, 40.0),
                (T::SuitedTrips, 100.0),
            ]),
            perfect_pair: BTreeMap::from([
                (PerfectPair::Pair, 8.0),
                (PerfectPair::SuitedPair, 25.0),
            ]),
            hot_three: BTreeMap::from([
                (H::Nineteen, 1.0),
                (H::Twenty, 2.0),
                (H::TwentySuited, 4.0),
                (H::TwentyOne, 10.0),
                (H::TwentyOneSuited, 20.0),
                (H::TripleSevens, 100.0),
            ]),
            bust: BTreeMap::from([
                (B::Three, 1.0),
                (B::Four, 2.0),
                (B::Five, 9.0),
                (B::Six, 50.0),
                (B::Seven, 100.0),
                (B::EightOrMore, 250.0),
            ]),
        }
    }
}

fn lookup<K: Ord>(table: &BTreeMap<K, f64>, category: Option<K>) -> f64 {
    category
        .and_then(|c| table.get(&c).copied())
        .unwrap_or(0.0)
}

fn expected_value<K: Ord>(table: &BTreeMap<K, f64>, probabilities: &BTreeMap<K, f64>) -> f64 {
    probabilities
        .iter()
        .filter_map(|(category, p)| table.get(category).map(|payout| p * payout))
        .sum()
}

impl PayoutTables {
    pub fn pay_21_plus_3(&self, category: Option<TwentyOnePlusThree>) -> f64 {
        lookup(&self.twenty_one_plus_three, category)
    }

    pub fn pay_perfect_pair(&self, category: Option<PerfectPair>) -> f64 {
        lookup(&self.perfect_pair, category)
    }

    pub fn pay_hot_three(&self, category: Option<HotThree>) -> f64 {
        lookup(&self.hot_three, category)
    }

    pub fn pay_bust(&self, category: Option<BustCards>) -> f64 {
        lookup(&self.bust, category)
    }

    /// Expected payout given the probability of each 21+3 category.
    pub fn expected_value_21_plus_3(
        &self,
        probabilities: &BTreeMap<TwentyOnePlusThree, f64>,
    ) -> f64 {
        expected_value(&self.twenty_one_plus_three, probabilities)
    }

    pub fn expected_value_perfect_pair(&self, probabilities: &BTreeMap<PerfectPair, f64>) -> f64 {
        expected_value(&self.perfect_pair, probabilities)
    }

    pub fn expected_value_hot_three(&self, probabilities: &BTreeMap<HotThree, f64>) -> f64 {
        expected_value(&self.hot_three, probabilities)
    }

    /// Takes the probability of the dealer busting with each card count.
    /// Counts of 8 and above share the "8+" payout.
    pub fn expected_value_bust(&self, probabilities: &BTreeMap<usize, f64>) -> f64 {
        probabilities
            .iter()
            .map(|(&number_of_cards, p)| p * self.pay_bust(evaluate_bust(number_of_cards)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn player(a: &str, b: &str) -> [Card; 2] {
        [card(a), card(b)]
    }

    #[test]
    fn triple_sevens() {
        let hand = player("7S", "7H");
        assert_eq!(evaluate_hot_three(&hand, card("7D")), Some(HotThree::TripleSevens));
        assert_eq!(evaluate_21_plus_3(&hand, card("7D")), Some(TwentyOnePlusThree::ThreeKind));
        assert_eq!(
            evaluate_21_plus_3(&player("7S", "7S"), card("7S")),
            Some(TwentyOnePlusThree::SuitedTrips)
        );
    }

    #[test]
    fn twenty_one_plus_three_categories() {
        assert_eq!(
            evaluate_21_plus_3(&player("5H", "6H"), card("7H")),
            Some(TwentyOnePlusThree::StraightFlush)
        );
        assert_eq!(
            evaluate_21_plus_3(&player("AS", "2S"), card("3S")),
            Some(TwentyOnePlusThree::StraightFlush)
        );
        assert_eq!(
            evaluate_21_plus_3(&player("QD", "AD"), card("KD")),
            Some(TwentyOnePlusThree::StraightFlush)
        );
        assert_eq!(
            evaluate_21_plus_3(&player("2C", "9C"), card("KC")),
            Some(TwentyOnePlusThree::Flush)
        );
        assert_eq!(
            evaluate_21_plus_3(&player("9C", "10H"), card("JD")),
            Some(TwentyOnePlusThree::Straight)
        );
        assert_eq!(evaluate_21_plus_3(&player("KC", "AH"), card("2D")), None);
        assert_eq!(evaluate_21_plus_3(&player("9C", "9H"), card("JD")), None);
    }

    #[test]
    fn perfect_pair_categories() {
        assert_eq!(evaluate_perfect_pair(&player("8S", "8H")), Some(PerfectPair::Pair));
        assert_eq!(evaluate_perfect_pair(&player("8S", "8S")), Some(PerfectPair::SuitedPair));
        assert_eq!(evaluate_perfect_pair(&player("10S", "KS")), None);
    }

    #[test]
    fn hot_three_categories() {
        assert_eq!(
            evaluate_hot_three(&player("AS", "KS"), card("QS")),
            Some(HotThree::TwentyOneSuited)
        );
        assert_eq!(evaluate_hot_three(&player("AS", "KS"), card("QH")), Some(HotThree::TwentyOne));
        assert_eq!(evaluate_hot_three(&player("AS", "AH"), card("8D")), Some(HotThree::Twenty));
        assert_eq!(
            evaluate_hot_three(&player("5C", "5C"), card("KC")),
            Some(HotThree::TwentySuited)
        );
        assert_eq!(evaluate_hot_three(&player("9C", "KH"), card("QD")), None);
        assert_eq!(evaluate_hot_three(&player("9C", "KH"), card("2D")), Some(HotThree::TwentyOne));
        assert_eq!(evaluate_hot_three(&player("9C", "8H"), card("2D")), Some(HotThree::Nineteen));
    }

    #[test]
    fn bust_buckets() {
        assert_eq!(evaluate_bust(2), None);
        assert_eq!(evaluate_bust(3), Some(BustCards::Three));
        assert_eq!(evaluate_bust(7), Some(BustCards::Seven));
        assert_eq!(evaluate_bust(8), Some(BustCards::EightOrMore));
        assert_eq!(evaluate_bust(11), Some(BustCards::EightOrMore));
    }

    #[test]
    fn labels() {
        assert_eq!(TwentyOnePlusThree::SuitedTrips.to_string(), "suited_trips");
        assert_eq!(PerfectPair::SuitedPair.to_string(), "suited_pair");
        assert_eq!(HotThree::TwentyOneSuited.to_string(), "21suited");
        assert_eq!(BustCards::EightOrMore.to_string(), "8+");
    }

    #[test]
    fn misses_pay_nothing() {
        let payouts = PayoutTables::default();
        assert_eq!(payouts.pay_21_plus_3(None), 0.0);
        assert_eq!(payouts.pay_21_plus_3(Some(TwentyOnePlusThree::Straight)), 10.0);
        assert_eq!(payouts.pay_perfect_pair(Some(PerfectPair::Pair)), 8.0);
        assert_eq!(payouts.pay_bust(evaluate_bust(9)), 250.0);
    }

    #[test]
    fn expected_value_from_distribution() {
        let payouts = PayoutTables::default();
        let probabilities =
            BTreeMap::from([(PerfectPair::Pair, 0.05), (PerfectPair::SuitedPair, 0.01)]);
        let ev = payouts.expected_value_perfect_pair(&probabilities);
        assert!((ev - (0.05 * 8.0 + 0.01 * 25.0)).abs() < 1e-12);

        let bust = BTreeMap::from([(2, 0.5), (3, 0.1), (9, 0.01)]);
        let ev = payouts.expected_value_bust(&bust);
        assert!((ev - (0.1 * 1.0 + 0.01 * 250.0)).abs() < 1e-12);
    }
}
