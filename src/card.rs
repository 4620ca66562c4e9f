use std::fmt;
use std::str::FromStr;

use strum_macros::EnumIter;

use crate::{Error, Result};

/// Number of distinct card identities in a standard deck.
pub const NUMBER_OF_IDENTITIES: usize = 52;

static RANK_TO_BLACKJACK_VALUE: [u8; 13] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];
static RANK_CODES: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];
const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Value with the ace counted as 11 and every face card as 10.
    pub fn blackjack_value(self) -> u8 {
        RANK_TO_BLACKJACK_VALUE[self as usize]
    }

    /// Position in A, 2, ..., K starting from 1. Used for straights.
    pub fn order(self) -> u8 {
        self as u8 + 1
    }

    pub fn code(self) -> &'static str {
        RANK_CODES[self as usize]
    }

    fn from_code(code: &str) -> Option<Rank> {
        RANK_CODES
            .iter()
            .position(|c| *c == code)
            .map(|index| RANKS[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Suit {
    Spade = 0,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub fn code(self) -> char {
        match self {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
        }
    }

    fn from_code(code: char) -> Option<Suit> {
        SUITS.iter().copied().find(|suit| suit.code() == code)
    }
}

/// A physical card. Its identity in [0, 52) is rank-major: `rank * 4 + suit`,
/// with ranks ordered A, 2, ..., 10, J, Q, K and suits ordered S, H, D, C.
/// The shoe array and the side-bet evaluator both rely on this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Slot of this card in the shoe array.
    pub fn index(self) -> usize {
        self.rank as usize * 4 + self.suit as usize
    }

    /// Inverse of [`Card::index`]. Panics if `index >= 52`.
    pub(crate) fn from_index(index: usize) -> Card {
        Card {
            rank: RANKS[index / 4],
            suit: SUITS[index % 4],
        }
    }

    pub fn blackjack_value(self) -> u8 {
        self.rank.blackjack_value()
    }

    /// Every card identity in canonical order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUMBER_OF_IDENTITIES).map(Card::from_index)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.code())
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.index() as u8
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value as usize >= NUMBER_OF_IDENTITIES {
            Err(Error::InvalidCardIndex(value))
        } else {
            Ok(Card::from_index(value as usize))
        }
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parses codes such as `AS`, `7D` or `10H`.
    fn from_str(code: &str) -> Result<Self> {
        let invalid = || Error::InvalidCardCode(code.to_string());
        let mut chars = code.chars();
        let suit = chars.next_back().and_then(Suit::from_code).ok_or_else(invalid)?;
        let rank = Rank::from_code(chars.as_str()).ok_or_else(invalid)?;
        Ok(Card { rank, suit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn identities_are_rank_major() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spade).index(), 0);
        assert_eq!(Card::new(Rank::Ace, Suit::Club).index(), 3);
        assert_eq!(Card::new(Rank::Two, Suit::Spade).index(), 4);
        assert_eq!(Card::new(Rank::King, Suit::Club).index(), 51);
    }

    #[test]
    fn decode_inverts_encode_for_every_code() {
        for rank in Rank::iter() {
            for suit in Suit::iter() {
                let code = format!("{}{}", rank.code(), suit.code());
                let card: Card = code.parse().unwrap();
                let index: u8 = card.into();
                let decoded = Card::try_from(index).unwrap();
                assert_eq!(decoded, card);
                assert_eq!(decoded.to_string(), code);
            }
        }
    }

    #[test]
    fn ten_is_a_two_character_rank() {
        let card: Card = "10H".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Heart));
        assert_eq!(card.blackjack_value(), 10);
    }

    #[test]
    fn malformed_codes_are_rejected() {
        for code in ["", "A", "1S", "11H", "XS", "AX", "10"] {
            assert_eq!(
                code.parse::<Card>(),
                Err(Error::InvalidCardCode(code.to_string()))
            );
        }
        assert_eq!(Card::try_from(52), Err(Error::InvalidCardIndex(52)));
    }

    #[test]
    fn all_yields_52_distinct_cards() {
        let cards: Vec<Card> = Card::all().collect();
        assert_eq!(cards.len(), NUMBER_OF_IDENTITIES);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.index(), i);
        }
    }
}
