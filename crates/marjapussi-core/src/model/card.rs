use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CARD_COUNT: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid suit symbol '{0}'")]
    InvalidSuit(char),
    #[error("invalid rank symbol '{0}'")]
    InvalidRank(char),
    #[error("invalid card '{0}'")]
    InvalidCard(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Builds a card from its suit and rank symbols, e.g. `('r', 'A')`.
    pub fn from_symbols(suit: char, rank: char) -> Result<Self, CardError> {
        let suit = Suit::from_symbol(suit).ok_or(CardError::InvalidSuit(suit))?;
        let rank = Rank::from_symbol(rank).ok_or(CardError::InvalidRank(rank))?;
        Ok(Self::new(suit, rank))
    }

    /// Dense index in `0..36`, suit-major.
    pub const fn to_id(self) -> u8 {
        self.suit as u8 * 9 + self.rank as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        let Some(suit) = Suit::from_index((id / 9) as usize) else {
            return None;
        };
        let Some(rank) = Rank::from_strength(id % 9) else {
            return None;
        };
        Some(Self::new(suit, rank))
    }

    /// Rank comparison only; the suit is ignored.
    pub fn is_higher_than(self, other: Card) -> bool {
        self.rank > other.rank
    }

    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.suit, self.rank)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(suit), Some('-'), Some(rank), None) => Self::from_symbols(suit, rank),
            _ => Err(CardError::InvalidCard(raw.to_string())),
        }
    }
}

/// True when both King and Ober of `suit` are among `cards`.
pub fn contains_pair<'a>(cards: impl IntoIterator<Item = &'a Card> + Clone, suit: Suit) -> bool {
    let has = |rank| cards.clone().into_iter().any(|c| *c == Card::new(suit, rank));
    has(Rank::King) && has(Rank::Ober)
}

/// True when King or Ober of `suit` is among `cards`.
pub fn contains_half<'a>(cards: impl IntoIterator<Item = &'a Card>, suit: Suit) -> bool {
    cards
        .into_iter()
        .any(|c| c.suit == suit && matches!(c.rank, Rank::King | Rank::Ober))
}

pub fn sorted_cards(cards: &[Card]) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|card| card.to_id());
    sorted
}

pub fn all_suit_cards(suit: Suit) -> impl Iterator<Item = Card> {
    Rank::ORDERED.into_iter().map(move |rank| Card::new(suit, rank))
}

pub fn all_rank_cards(rank: Rank) -> impl Iterator<Item = Card> {
    Suit::ALL.into_iter().map(move |suit| Card::new(suit, rank))
}
