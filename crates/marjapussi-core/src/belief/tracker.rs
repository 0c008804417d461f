use super::constraint::Constraint;
use super::standing::standing_cards;
use crate::game::action::{Action, Announcement, Answer, Question};
use crate::model::card::{Card, all_rank_cards, all_suit_cards, contains_half};
use crate::model::card_set::CardSet;
use crate::model::deck::HAND_SIZE;
use crate::model::player::{PlayerPosition, Side};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use crate::rules::{beating_cards, high_card, legal_plays};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    /// The acting seat cannot hold the card: a stale or duplicate observation.
    #[error("inconsistent observation: {player} cannot hold {card}")]
    InconsistentObservation { player: PlayerPosition, card: Card },
    #[error("constraint contradicts what is known about {player}")]
    ContradictoryConstraint { player: PlayerPosition },
}

/// What one seat knows about every hand during a deal.
///
/// For each other seat the tracker keeps the cards it may still hold and the
/// subset it certainly holds. Both only shrink while tricks are played, the
/// secure set never leaves the possible set, and no possible set ever
/// contains an own or already played card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationTracker {
    perspective: PlayerPosition,
    hand: CardSet,
    possible: [CardSet; 4],
    secure: [CardSet; 4],
    hand_counts: [usize; 4],
    played: CardSet,
    trump: Option<Suit>,
    current_trick: Vec<Play>,
    tricks_completed: usize,
    playing_side: Option<Side>,
    pending_question: Option<(PlayerPosition, Question)>,
    highest_bid: Option<(PlayerPosition, u32)>,
}

impl InformationTracker {
    /// Fresh knowledge at deal start: every card not in `hand` may be with
    /// any other seat, nothing is secure.
    pub fn new(perspective: PlayerPosition, hand: &[Card]) -> Self {
        let own: CardSet = hand.iter().collect();
        let unknown = own.complement();
        let mut possible = [CardSet::EMPTY; 4];
        for seat in perspective.others() {
            possible[seat.index()] = unknown;
        }
        let mut hand_counts = [HAND_SIZE; 4];
        hand_counts[perspective.index()] = own.len();

        Self {
            perspective,
            hand: own,
            possible,
            secure: [CardSet::EMPTY; 4],
            hand_counts,
            played: CardSet::EMPTY,
            trump: None,
            current_trick: Vec::with_capacity(4),
            tricks_completed: 0,
            playing_side: None,
            pending_question: None,
            highest_bid: None,
        }
    }

    /// Drops everything learned and starts over for a new deal.
    pub fn reset(&mut self, hand: &[Card]) {
        *self = Self::new(self.perspective, hand);
    }

    pub fn perspective(&self) -> PlayerPosition {
        self.perspective
    }

    pub fn hand(&self) -> CardSet {
        self.hand
    }

    pub fn hand_cards(&self) -> Vec<Card> {
        self.hand.to_vec()
    }

    pub fn possible_cards(&self, seat: PlayerPosition) -> CardSet {
        self.possible[seat.index()]
    }

    pub fn secure_cards(&self, seat: PlayerPosition) -> CardSet {
        self.secure[seat.index()]
    }

    /// Possible cards of the three other seats, in seat order after `perspective`.
    pub fn others_possible(&self) -> [CardSet; 3] {
        self.perspective.others().map(|seat| self.possible_cards(seat))
    }

    pub fn hand_count(&self, seat: PlayerPosition) -> usize {
        self.hand_counts[seat.index()]
    }

    pub fn played(&self) -> CardSet {
        self.played
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn current_trick(&self) -> &[Play] {
        &self.current_trick
    }

    pub fn trick_cards(&self) -> Vec<Card> {
        self.current_trick.iter().map(|play| play.card).collect()
    }

    pub fn tricks_completed(&self) -> usize {
        self.tricks_completed
    }

    pub fn is_first_trick(&self) -> bool {
        self.tricks_completed == 0
    }

    pub fn playing_side(&self) -> Option<Side> {
        self.playing_side
    }

    pub fn pending_question(&self) -> Option<(PlayerPosition, Question)> {
        self.pending_question
    }

    pub fn highest_bid(&self) -> Option<(PlayerPosition, u32)> {
        self.highest_bid
    }

    /// Cards the perspective seat may play now.
    pub fn legal_plays(&self) -> Vec<Card> {
        legal_plays(
            &self.trick_cards(),
            &self.hand.to_vec(),
            self.trump,
            self.is_first_trick(),
        )
    }

    /// Own cards guaranteed to take a trick if led now.
    pub fn standing_cards(&self) -> CardSet {
        standing_cards(self.hand, &self.others_possible(), self.trump)
    }

    /// Applies one observed action. On error the tracker is left unchanged.
    pub fn observe(&mut self, action: &Action) -> Result<(), ObservationError> {
        self.transact(|next| next.apply_action(action))
    }

    /// Feeds an externally derived restriction for `player`. On error the
    /// tracker is left unchanged.
    pub fn apply_constraint(
        &mut self,
        player: PlayerPosition,
        constraint: Constraint,
    ) -> Result<(), ObservationError> {
        self.transact(|next| next.constrain(player, constraint))
    }

    fn transact<F>(&mut self, update: F) -> Result<(), ObservationError>
    where
        F: FnOnce(&mut Self) -> Result<(), ObservationError>,
    {
        let mut next = self.clone();
        update(&mut next)?;
        next.propagate()?;
        *self = next;
        Ok(())
    }

    fn apply_action(&mut self, action: &Action) -> Result<(), ObservationError> {
        match *action {
            Action::TrickPlay { player, card } => self.on_play(player, card),
            Action::CardPass { player, card } => self.on_pass(player, card),
            Action::Question { asker, topic } => {
                self.pending_question = Some((asker, topic));
                Ok(())
            }
            Action::Answer { responder, content } => {
                self.pending_question = None;
                self.on_answer(responder, content)
            }
            Action::Announcement { player, content } => match content {
                Announcement::Pair(suit) => {
                    self.trump = Some(suit);
                    self.constrain(player, Constraint::Holds(pair_of(suit)))
                }
            },
            Action::Provocation { player, bid } => {
                if self.highest_bid.is_none_or(|(_, best)| bid > best) {
                    self.highest_bid = Some((player, bid));
                }
                Ok(())
            }
        }
    }

    fn on_play(&mut self, player: PlayerPosition, card: Card) -> Result<(), ObservationError> {
        if player == self.perspective {
            if !self.hand.contains(card) {
                return Err(ObservationError::InconsistentObservation { player, card });
            }
        } else {
            if !self.possible_cards(player).contains(card) {
                return Err(ObservationError::InconsistentObservation { player, card });
            }
            for excluded in self.play_exclusions(card) {
                self.exclude(player, excluded)?;
            }
        }

        self.take_out(card);
        self.played.insert(card);
        self.hand_counts[player.index()] = self.hand_counts[player.index()].saturating_sub(1);
        self.current_trick.push(Play {
            position: player,
            card,
        });
        if self.current_trick.len() == 4 {
            self.current_trick.clear();
            self.tricks_completed += 1;
        }
        Ok(())
    }

    /// Cards a seat cannot hold, given that the rules let it play `card` onto
    /// the current trick.
    fn play_exclusions(&self, card: Card) -> Vec<CardSet> {
        let first = self.is_first_trick();
        let trick = self.trick_cards();
        let mut excluded = Vec::new();

        let Some(led) = trick.first().map(|c| c.suit) else {
            if first && !card.is_ace() {
                excluded.push(aces());
                if card.suit != Suit::Green {
                    excluded.push(CardSet::of_suit(Suit::Green));
                }
            }
            return excluded;
        };

        let led_ace = Card::new(led, Rank::Ace);
        if first {
            if card == led_ace {
                return excluded;
            }
            excluded.push(CardSet::single(led_ace));
        }

        if card.suit != led {
            excluded.push(CardSet::of_suit(led));
            if let Some(trump) = self.trump.filter(|&trump| trump != card.suit) {
                excluded.push(CardSet::of_suit(trump));
            }
        }

        let bound_suit = if card.suit == led || Some(card.suit) == self.trump {
            card.suit
        } else {
            return excluded;
        };
        let Some(standing) = high_card(&trick, self.trump) else {
            return excluded;
        };
        let threshold = if standing.suit == bound_suit {
            if standing.rank > card.rank { standing } else { card }
        } else if Some(bound_suit) == self.trump {
            card
        } else {
            return excluded;
        };
        excluded.push(beating_cards(
            threshold,
            None,
            CardSet::of_suit(bound_suit),
        ));
        excluded
    }

    fn on_pass(&mut self, player: PlayerPosition, card: Card) -> Result<(), ObservationError> {
        let recipient = player.partner();
        if self.playing_side.is_none() {
            self.playing_side = Some(player.side());
        }

        if player == self.perspective {
            if !self.hand.remove(card) {
                return Err(ObservationError::InconsistentObservation { player, card });
            }
            self.possible[recipient.index()].insert(card);
            self.secure[recipient.index()].insert(card);
        } else if recipient == self.perspective {
            if !self.possible_cards(player).contains(card) {
                return Err(ObservationError::InconsistentObservation { player, card });
            }
            self.take_out(card);
            self.hand.insert(card);
        } else {
            if !self.possible_cards(player).contains(card) {
                return Err(ObservationError::InconsistentObservation { player, card });
            }
            self.take_out(card);
            self.possible[recipient.index()].insert(card);
            self.secure[recipient.index()].insert(card);
        }

        self.hand_counts[player.index()] = self.hand_counts[player.index()].saturating_sub(1);
        self.hand_counts[recipient.index()] += 1;
        Ok(())
    }

    fn on_answer(
        &mut self,
        responder: PlayerPosition,
        content: Answer,
    ) -> Result<(), ObservationError> {
        match content {
            Answer::HasPair(suit) => self.constrain(responder, Constraint::Holds(pair_of(suit))),
            Answer::NoPair => Ok(()),
            Answer::HasHalf(suit) => {
                if responder == self.perspective {
                    return Ok(());
                }
                let candidates = self.possible_cards(responder).intersection(pair_of(suit));
                if !contains_half(&candidates.to_vec(), suit) {
                    return Err(ObservationError::ContradictoryConstraint { player: responder });
                }
                if candidates.len() > 1 {
                    return Ok(());
                }
                self.constrain(responder, Constraint::Holds(candidates))
            }
            Answer::NoHalf(suit) => self.constrain(responder, Constraint::Excludes(pair_of(suit))),
        }
    }

    fn constrain(
        &mut self,
        player: PlayerPosition,
        constraint: Constraint,
    ) -> Result<(), ObservationError> {
        if player == self.perspective {
            return Ok(());
        }
        match constraint {
            Constraint::Holds(cards) => {
                let possible = self.possible_cards(player);
                if let Some(card) = cards.difference(possible).iter().next() {
                    return Err(ObservationError::InconsistentObservation { player, card });
                }
                self.secure[player.index()] = self.secure_cards(player).union(cards);
                Ok(())
            }
            Constraint::Excludes(cards) => self.exclude(player, cards),
            Constraint::LimitTo(cards) => self.exclude(player, cards.complement()),
        }
    }

    fn exclude(&mut self, player: PlayerPosition, cards: CardSet) -> Result<(), ObservationError> {
        if !self.secure_cards(player).is_disjoint(cards) {
            return Err(ObservationError::ContradictoryConstraint { player });
        }
        self.possible[player.index()] = self.possible_cards(player).difference(cards);
        Ok(())
    }

    fn take_out(&mut self, card: Card) {
        self.hand.remove(card);
        for seat in PlayerPosition::LOOP {
            self.possible[seat.index()].remove(card);
            self.secure[seat.index()].remove(card);
        }
    }

    /// Runs the set rules to a fixpoint: certain cards leave the other seats,
    /// a card only one seat can hold is certain, a seat with exactly as many
    /// candidates as cards holds all of them.
    fn propagate(&mut self) -> Result<(), ObservationError> {
        let others = self.perspective.others();
        loop {
            let before = (self.possible, self.secure);

            for seat in others {
                let certain = self.secure_cards(seat);
                for other in others.into_iter().filter(|&other| other != seat) {
                    self.possible[other.index()] = self.possible_cards(other).difference(certain);
                }
            }

            let unknown = self.hand.union(self.played).complement();
            for card in unknown {
                if let Some(only) = self.sole_holder(card) {
                    self.secure[only.index()].insert(card);
                }
            }

            for seat in others {
                let possible = self.possible_cards(seat);
                let secure = self.secure_cards(seat);
                let count = self.hand_count(seat);
                if !secure.is_subset(possible) || possible.len() < count || secure.len() > count {
                    return Err(ObservationError::ContradictoryConstraint { player: seat });
                }
                if possible.len() == count {
                    self.secure[seat.index()] = possible;
                } else if secure.len() == count {
                    self.possible[seat.index()] = secure;
                }
            }

            if (self.possible, self.secure) == before {
                return Ok(());
            }
        }
    }

    fn sole_holder(&self, card: Card) -> Option<PlayerPosition> {
        let mut holders = self
            .perspective
            .others()
            .into_iter()
            .filter(|seat| self.possible_cards(*seat).contains(card));
        match (holders.next(), holders.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

fn pair_of(suit: Suit) -> CardSet {
    all_suit_cards(suit)
        .filter(|card| matches!(card.rank, Rank::King | Rank::Ober))
        .collect()
}

fn aces() -> CardSet {
    all_rank_cards(Rank::Ace).collect()
}
