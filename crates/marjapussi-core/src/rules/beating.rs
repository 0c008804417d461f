use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::suit::Suit;

/// Cards of `pool` that would take a trick in which `base` is the standing
/// card: stronger cards of the same suit and, when `base` is not itself a
/// trump, every trump. `base` is never part of the result.
pub fn beating_cards(base: Card, trump: Option<Suit>, pool: CardSet) -> CardSet {
    let same_suit_higher = pool
        .suit(base.suit)
        .iter()
        .filter(|card| card.is_higher_than(base))
        .collect::<CardSet>();
    match trump {
        Some(trump) if trump != base.suit => same_suit_higher.union(pool.suit(trump)),
        _ => same_suit_higher,
    }
}

/// [`beating_cards`] over the whole deck.
pub fn higher_cards(base: Card, trump: Option<Suit>) -> CardSet {
    beating_cards(base, trump, CardSet::FULL)
}
