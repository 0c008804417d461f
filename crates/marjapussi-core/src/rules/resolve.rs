use crate::model::card::Card;
use crate::model::suit::Suit;

/// Card taking a trick made of `cards` in play order.
///
/// The strongest trump wins if any trump was played, otherwise the strongest
/// card of the suit of the first card. Returns `None` only for an empty slice.
pub fn high_card(cards: &[Card], trump: Option<Suit>) -> Option<Card> {
    let led = cards.first()?.suit;
    let strongest = |suit: Suit| {
        cards
            .iter()
            .copied()
            .filter(|card| card.suit == suit)
            .max_by_key(|card| card.rank)
    };
    trump.and_then(strongest).or_else(|| strongest(led))
}

#[cfg(test)]
mod tests {
    use super::high_card;
    use crate::model::card::Card;
    use crate::model::suit::Suit;

    fn cards(raw: &[&str]) -> Vec<Card> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn empty_trick_has_no_high_card() {
        assert_eq!(high_card(&[], None), None);
        assert_eq!(high_card(&[], Some(Suit::Red)), None);
    }

    #[test]
    fn single_card_wins() {
        let only = cards(&["e-U"]);
        assert_eq!(high_card(&only, None), Some(only[0]));
        assert_eq!(high_card(&only, Some(Suit::Green)), Some(only[0]));
    }

    #[test]
    fn strongest_lead_suit_card_wins_without_trump() {
        let trick = cards(&["r-A", "r-Z", "r-7", "g-6"]);
        assert_eq!(high_card(&trick, None), Some("r-7".parse().unwrap()));
    }

    #[test]
    fn off_suit_six_never_wins() {
        let trick = cards(&["s-A", "r-6"]);
        assert_eq!(high_card(&trick, None), Some("s-A".parse().unwrap()));
    }

    #[test]
    fn any_trump_beats_lead_suit() {
        let trick = cards(&["r-6", "g-A", "r-7"]);
        assert_eq!(high_card(&trick, Some(Suit::Green)), Some("g-A".parse().unwrap()));
    }

    #[test]
    fn strongest_trump_wins_among_trumps() {
        let trick = cards(&["r-6", "g-A", "g-9", "g-Z"]);
        assert_eq!(high_card(&trick, Some(Suit::Green)), Some("g-9".parse().unwrap()));
    }

    #[test]
    fn absent_trump_suit_falls_back_to_lead() {
        let trick = cards(&["e-K", "e-O", "r-6"]);
        assert_eq!(high_card(&trick, Some(Suit::Bells)), Some("e-O".parse().unwrap()));
    }
}
