use crate::model::card_set::CardSet;
use crate::model::suit::Suit;

/// Owned cards that are certain to take a trick if led now.
///
/// With a trump declared only the strongest owned trump qualifies. Otherwise,
/// per suit, the strongest owned card qualifies when no card the other seats
/// may hold outranks it, and when the owner holds more cards of the suit than
/// the others can, that many of the strongest owned cards qualify as well.
/// Ruffs by a seat void in the suit are not considered.
pub fn standing_cards(hand: CardSet, possible: &[CardSet], trump: Option<Suit>) -> CardSet {
    if let Some(trump) = trump {
        return hand
            .highest_of(trump)
            .map(CardSet::single)
            .unwrap_or_default();
    }

    let others = possible
        .iter()
        .fold(CardSet::EMPTY, |acc, set| acc.union(*set));
    let mut standing = CardSet::EMPTY;

    for suit in Suit::ALL {
        let owned = hand.suit(suit);
        let Some(highest) = owned.highest_of(suit) else {
            continue;
        };
        let against = others.suit(suit);

        if let Some(top) = against.highest_of(suit) {
            if highest.rank >= top.rank {
                standing.insert(highest);
            }
        }

        if owned.len() > against.len() {
            let mut descending = owned.to_vec();
            descending.reverse();
            for card in descending.into_iter().take(owned.len() - against.len()) {
                standing.insert(card);
            }
        }
    }

    standing
}

#[cfg(test)]
mod tests {
    use super::standing_cards;
    use crate::model::card::Card;
    use crate::model::card_set::CardSet;
    use crate::model::suit::Suit;

    fn set(raw: &[&str]) -> CardSet {
        raw.iter().map(|s| s.parse::<Card>().unwrap()).collect()
    }

    #[test]
    fn only_strongest_trump_stands() {
        let hand = set(&["g-9", "g-6", "r-6"]);
        let standing = standing_cards(hand, &[CardSet::FULL.difference(hand)], Some(Suit::Green));
        assert_eq!(standing, set(&["g-6"]));
    }

    #[test]
    fn two_trumps_give_at_most_one_standing_card() {
        let hand = set(&["s-A", "s-Z", "e-6"]);
        let standing = standing_cards(hand, &[CardSet::EMPTY], Some(Suit::Bells));
        assert!(standing.len() <= 1);
        assert_eq!(standing, set(&["s-Z"]));
    }

    #[test]
    fn no_trump_in_hand_with_declared_trump_stands_nothing() {
        let hand = set(&["r-6", "e-6"]);
        assert!(standing_cards(hand, &[], Some(Suit::Green)).is_empty());
    }

    #[test]
    fn top_card_stands_when_nothing_outranks_it() {
        let hand = set(&["r-7", "r-A"]);
        let possible = [set(&["r-8", "r-Z", "r-K"]), set(&["r-9"])];
        let standing = standing_cards(hand, &possible, None);
        assert_eq!(standing, set(&["r-7"]));
    }

    #[test]
    fn outranked_top_card_does_not_stand() {
        let hand = set(&["r-7", "r-A"]);
        let possible = [set(&["r-6", "r-Z"])];
        assert!(standing_cards(hand, &possible, None).is_empty());
    }

    #[test]
    fn excess_length_stands_even_when_outranked() {
        let hand = set(&["e-A", "e-Z", "e-K", "e-9"]);
        let possible = [set(&["e-6"]), set(&["e-O"])];
        let standing = standing_cards(hand, &possible, None);
        assert_eq!(standing, set(&["e-9", "e-K"]));
    }

    #[test]
    fn suit_nobody_else_holds_stands_entirely() {
        let hand = set(&["s-A", "s-U"]);
        let standing = standing_cards(hand, &[set(&["r-6"])], None);
        assert_eq!(standing, hand);
    }
}
