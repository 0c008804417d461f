use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::rules::high_card;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Play currently holding the trick, complete or not.
    pub fn high_play(&self, trump: Option<Suit>) -> Option<Play> {
        let high = high_card(&self.cards(), trump)?;
        self.plays.iter().copied().find(|play| play.card == high)
    }

    /// Winner of a complete trick.
    pub fn winner(&self, trump: Option<Suit>) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        self.high_play(trump).map(|play| play.position)
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn full_trick(cards: [Card; 4]) -> Trick {
        let mut trick = Trick::new(PlayerPosition::North);
        let mut seat = PlayerPosition::North;
        for card in cards {
            trick.play(seat, card).unwrap();
            seat = seat.next();
        }
        trick
    }

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Suit::Red, Rank::Nine))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Suit::Red, Rank::Ten)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(trick.lead_suit(), Some(Suit::Red));
    }

    #[test]
    fn winner_is_strongest_card_of_lead_suit() {
        let trick = full_trick([
            Card::new(Suit::Red, Rank::Ten),
            Card::new(Suit::Red, Rank::Seven),
            Card::new(Suit::Red, Rank::Ace),
            Card::new(Suit::Green, Rank::Six),
        ]);
        assert_eq!(trick.winner(None), Some(PlayerPosition::East));
    }

    #[test]
    fn trump_beats_lead_suit() {
        let trick = full_trick([
            Card::new(Suit::Red, Rank::Six),
            Card::new(Suit::Bells, Rank::Ace),
            Card::new(Suit::Red, Rank::Seven),
            Card::new(Suit::Green, Rank::Six),
        ]);
        assert_eq!(trick.winner(Some(Suit::Bells)), Some(PlayerPosition::East));
        assert_eq!(trick.winner(None), Some(PlayerPosition::North));
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(PlayerPosition::West);
        trick
            .play(PlayerPosition::West, Card::new(Suit::Acorns, Rank::King))
            .unwrap();
        assert_eq!(trick.winner(None), None);
        assert_eq!(
            trick.high_play(None).map(|play| play.position),
            Some(PlayerPosition::West)
        );
    }
}
