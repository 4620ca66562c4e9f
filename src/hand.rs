use crate::card::Card;

/// Best total of a hand and whether an ace is still counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandValue {
    pub total: u16,
    pub soft: bool,
}

impl HandValue {
    pub fn bust(&self) -> bool {
        self.total > 21
    }
}

/// Evaluates a sequence of cards. Aces start at 11 and are reduced to 1, one
/// at a time, while the total exceeds 21.
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut high_aces = 0;
    for card in cards {
        let value = card.blackjack_value();
        total += value as u16;
        if value == 11 {
            high_aces += 1;
        }
    }
    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    HandValue {
        total,
        soft: high_aces > 0 && total <= 21,
    }
}

/// Cards held by the player or the dealer during one round.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(6),
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Two-card 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value().total == 21
    }

    pub fn get_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Hand {
            cards: cards.to_vec(),
        }
    }
}
