use super::resolve::high_card;
use crate::model::card::Card;
use crate::model::suit::Suit;

/// Leading the first trick of a deal: an Ace if held, else a Green card if
/// held, else anything.
pub fn allowed_first_lead(hand: &[Card]) -> Vec<Card> {
    let aces: Vec<Card> = hand.iter().copied().filter(|card| card.is_ace()).collect();
    if !aces.is_empty() {
        return aces;
    }
    let greens: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|card| card.suit == Suit::Green)
        .collect();
    if !greens.is_empty() {
        return greens;
    }
    hand.to_vec()
}

/// Cards of `hand` that may be played onto `trick`.
///
/// Following players must follow the led suit, else play trump, else may
/// discard freely. A follower who can take the trick with a card from that
/// eligible set must play exactly the card that would take it. On the first
/// trick of a deal the Ace of the led suit must be played if held.
///
/// The result is empty only when `hand` is empty.
pub fn legal_plays(
    trick: &[Card],
    hand: &[Card],
    trump: Option<Suit>,
    first_trick: bool,
) -> Vec<Card> {
    let Some(lead) = trick.first() else {
        return if first_trick {
            allowed_first_lead(hand)
        } else {
            hand.to_vec()
        };
    };
    let led = lead.suit;

    if first_trick {
        if let Some(ace) = hand.iter().copied().find(|c| c.suit == led && c.is_ace()) {
            return vec![ace];
        }
    }

    let mut allowed: Vec<Card> = hand.iter().copied().filter(|c| c.suit == led).collect();
    if allowed.is_empty() {
        if let Some(trump) = trump {
            allowed = hand.iter().copied().filter(|c| c.suit == trump).collect();
        }
    }
    if allowed.is_empty() {
        return hand.to_vec();
    }

    let mut contested = trick.to_vec();
    contested.extend_from_slice(&allowed);
    match high_card(&contested, trump) {
        Some(high) if allowed.contains(&high) => vec![high],
        _ => allowed,
    }
}

pub fn is_legal(
    card: Card,
    trick: &[Card],
    hand: &[Card],
    trump: Option<Suit>,
    first_trick: bool,
) -> bool {
    legal_plays(trick, hand, trump, first_trick).contains(&card)
}
