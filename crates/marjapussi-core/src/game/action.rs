use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Topic of a partner question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Question {
    /// "Do you hold a pair?"
    AnyPair,
    /// "Do you hold half a pair of this suit?"
    Half(Suit),
}

/// Reply to a [`Question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    HasPair(Suit),
    NoPair,
    HasHalf(Suit),
    NoHalf(Suit),
}

/// Public declaration made while on lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Announcement {
    /// King and Ober of the suit; the suit becomes trump.
    Pair(Suit),
}

/// Every event a seat can produce and every tracker can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    TrickPlay {
        player: PlayerPosition,
        card: Card,
    },
    /// A card handed to the partner before play. The recipient is always the
    /// sender's partner; the same variant serves the pass and the return pass.
    CardPass {
        player: PlayerPosition,
        card: Card,
    },
    Question {
        asker: PlayerPosition,
        topic: Question,
    },
    Answer {
        responder: PlayerPosition,
        content: Answer,
    },
    Announcement {
        player: PlayerPosition,
        content: Announcement,
    },
    Provocation {
        player: PlayerPosition,
        bid: u32,
    },
}

impl Action {
    /// Seat that produced the action.
    pub const fn player(&self) -> PlayerPosition {
        match *self {
            Action::TrickPlay { player, .. }
            | Action::CardPass { player, .. }
            | Action::Announcement { player, .. }
            | Action::Provocation { player, .. } => player,
            Action::Question { asker, .. } => asker,
            Action::Answer { responder, .. } => responder,
        }
    }

    pub const fn card(&self) -> Option<Card> {
        match *self {
            Action::TrickPlay { card, .. } | Action::CardPass { card, .. } => Some(card),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::TrickPlay { player, card } => write!(f, "{player} plays {card}"),
            Action::CardPass { player, card } => {
                write!(f, "{player} passes {card} to {}", player.partner())
            }
            Action::Question { asker, topic } => write!(f, "{asker} asks {topic:?}"),
            Action::Answer { responder, content } => write!(f, "{responder} answers {content:?}"),
            Action::Announcement { player, content } => {
                write!(f, "{player} announces {content:?}")
            }
            Action::Provocation { player, bid } => write!(f, "{player} bids {bid}"),
        }
    }
}
