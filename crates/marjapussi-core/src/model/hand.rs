use crate::model::card::{Card, contains_pair, sorted_cards};
use crate::model::card_set::CardSet;
use crate::model::suit::Suit;

/// Cards held by one seat, kept sorted by suit then strength.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_set(&self) -> CardSet {
        self.cards.iter().collect()
    }

    /// Holds both King and Ober of `suit`.
    pub fn has_pair(&self, suit: Suit) -> bool {
        contains_pair(&self.cards, suit)
    }

    fn sort(&mut self) {
        self.cards = sorted_cards(&self.cards);
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Suit::Red, Rank::Nine);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_strength() {
        let hand = Hand::with_cards(vec![
            Card::new(Suit::Green, Rank::Ace),
            Card::new(Suit::Red, Rank::Six),
            Card::new(Suit::Red, Rank::Ace),
        ]);
        assert_eq!(
            hand.cards(),
            &[
                Card::new(Suit::Red, Rank::Ace),
                Card::new(Suit::Red, Rank::Six),
                Card::new(Suit::Green, Rank::Ace),
            ]
        );
    }

    #[test]
    fn pair_needs_king_and_ober() {
        let mut hand = Hand::with_cards(vec![Card::new(Suit::Acorns, Rank::King)]);
        assert!(!hand.has_pair(Suit::Acorns));
        hand.add(Card::new(Suit::Acorns, Rank::Ober));
        assert!(hand.has_pair(Suit::Acorns));
    }
}
