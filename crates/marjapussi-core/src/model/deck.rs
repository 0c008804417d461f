use crate::model::card::{CARD_COUNT, Card};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const HAND_SIZE: usize = 9;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(CARD_COUNT);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four consecutive blocks of nine.
    pub fn deal(&self) -> [Vec<Card>; 4] {
        std::array::from_fn(|seat| self.cards[seat * HAND_SIZE..(seat + 1) * HAND_SIZE].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::card_set::CardSet;

    #[test]
    fn standard_deck_has_36_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 36);
        let set: CardSet = deck.cards().iter().collect();
        assert_eq!(set, CardSet::FULL);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_gives_four_disjoint_hands() {
        let hands = Deck::shuffled_with_seed(7).deal();
        let mut seen = CardSet::EMPTY;
        for hand in &hands {
            assert_eq!(hand.len(), 9);
            let set: CardSet = hand.iter().collect();
            assert!(set.is_disjoint(seen));
            seen = seen.union(set);
        }
        assert_eq!(seen, CardSet::FULL);
    }
}
