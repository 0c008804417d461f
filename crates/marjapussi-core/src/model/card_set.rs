//! Compact set of cards backed by a 36-bit mask.

use crate::model::card::{CARD_COUNT, Card};
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

const FULL_MASK: u64 = (1u64 << CARD_COUNT) - 1;
const SUIT_MASK: u64 = 0x1FF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(FULL_MASK);

    pub const fn of_suit(suit: Suit) -> Self {
        Self(SUIT_MASK << (suit as u64 * 9))
    }

    pub const fn single(card: Card) -> Self {
        Self(1 << card.to_id())
    }

    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1 << card.to_id()) != 0
    }

    /// Returns true when the card was not already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let absent = !self.contains(card);
        self.0 |= 1 << card.to_id();
        absent
    }

    /// Returns true when the card was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.0 &= !(1 << card.to_id());
        present
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn complement(self) -> Self {
        Self(!self.0 & FULL_MASK)
    }

    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn suit(self, suit: Suit) -> Self {
        self.intersection(Self::of_suit(suit))
    }

    pub fn has_suit(self, suit: Suit) -> bool {
        !self.suit(suit).is_empty()
    }

    /// Strongest card of `suit` in the set.
    pub fn highest_of(self, suit: Suit) -> Option<Card> {
        let bits = self.suit(suit).0;
        if bits == 0 {
            return None;
        }
        Card::from_id(63 - bits.leading_zeros() as u8)
    }

    /// Cards in suit-major, ascending-strength order.
    pub fn iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }

    pub fn to_vec(self) -> Vec<Card> {
        self.iter().collect()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Card::from_id(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}
