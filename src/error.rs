use crate::card::Card;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid card code {0:?}")]
    InvalidCardCode(String),
    #[error("card index {0} is out of range, it must be in [0, 52)")]
    InvalidCardIndex(u8),
    #[error("card {0} is not available in the shoe")]
    CardUnavailable(Card),
    #[error("cannot restore {0}, every copy is already in the shoe")]
    ShoeFull(Card),
    #[error("number of decks must be positive, got {0}")]
    InvalidDeckCount(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
