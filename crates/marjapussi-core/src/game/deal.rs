use crate::game::action::{Action, Announcement};
use crate::model::card::Card;
use crate::model::deck::{Deck, HAND_SIZE};
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use crate::rules::legal_plays;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cards handed over in each direction before play.
pub const PASS_COUNT: usize = 4;

/// Outcome of the external bidding: who plays the game and for how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSetup {
    pub declarer: PlayerPosition,
    pub game_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealPhase {
    /// The declarer's partner hands over cards.
    Passing,
    /// The declarer returns the same number of cards.
    PassingBack,
    Tricks,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: PlayerPosition,
    pub trump: Option<Suit>,
}

/// Everything scoring needs once a deal is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSummary {
    pub setup: DealSetup,
    pub tricks: Vec<CompletedTrick>,
    pub announcements: Vec<(PlayerPosition, Suit)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActOutcome {
    Applied,
    TrickCompleted { winner: PlayerPosition },
    DealFinished { winner: PlayerPosition },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the deal is already finished")]
    DealFinished,
    #[error("{action} is not allowed during {phase:?}")]
    WrongPhase { phase: DealPhase, action: Action },
    #[error("expected {expected} to act but got {actual}")]
    NotYourTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{player} does not hold {card}")]
    CardNotInHand { player: PlayerPosition, card: Card },
    #[error("{card} may not be played onto the current trick")]
    IllegalCard { card: Card },
    #[error("{player} may not announce a {suit} pair now")]
    AnnouncementNotAllowed { player: PlayerPosition, suit: Suit },
    #[error("{0} belongs to the bidding protocol and is not handled here")]
    Unsupported(Action),
    #[error(transparent)]
    Trick(#[from] TrickError),
}

/// Reference controller for one deal, from the partner pass to the last
/// trick. Bidding happens outside and arrives as a [`DealSetup`].
#[derive(Debug, Clone)]
pub struct DealState {
    setup: DealSetup,
    hands: [Hand; 4],
    phase: DealPhase,
    passes_made: usize,
    trump: Option<Suit>,
    current_trick: Trick,
    tricks: Vec<CompletedTrick>,
    announcements: Vec<(PlayerPosition, Suit)>,
    announced_this_lead: bool,
    history: Vec<Action>,
}

impl DealState {
    pub fn deal(deck: &Deck, setup: DealSetup) -> Self {
        let hands = deck.deal().map(Hand::with_cards);
        Self::from_hands(hands, setup)
    }

    pub fn from_hands(hands: [Hand; 4], setup: DealSetup) -> Self {
        Self {
            setup,
            hands,
            phase: DealPhase::Passing,
            passes_made: 0,
            trump: None,
            current_trick: Trick::new(setup.declarer),
            tricks: Vec::with_capacity(HAND_SIZE),
            announcements: Vec::new(),
            announced_this_lead: false,
            history: Vec::new(),
        }
    }

    pub fn setup(&self) -> DealSetup {
        self.setup
    }

    pub fn phase(&self) -> DealPhase {
        self.phase
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn tricks(&self) -> &[CompletedTrick] {
        &self.tricks
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn is_first_trick(&self) -> bool {
        self.tricks.is_empty()
    }

    pub fn player_at_turn(&self) -> Option<PlayerPosition> {
        match self.phase {
            DealPhase::Passing => Some(self.setup.declarer.partner()),
            DealPhase::PassingBack => Some(self.setup.declarer),
            DealPhase::Tricks => Some(self.current_trick.expected_position()),
            DealPhase::Done => None,
        }
    }

    /// Every action the seat at turn may take. During tricks these are the
    /// legal plays, plus pair announcements when leading after a won trick.
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(player) = self.player_at_turn() else {
            return Vec::new();
        };
        let hand = self.hand(player);
        match self.phase {
            DealPhase::Passing | DealPhase::PassingBack => hand
                .iter()
                .map(|&card| Action::CardPass { player, card })
                .collect(),
            DealPhase::Tricks => {
                let mut actions: Vec<Action> = legal_plays(
                    &self.current_trick.cards(),
                    hand.cards(),
                    self.trump,
                    self.is_first_trick(),
                )
                .into_iter()
                .map(|card| Action::TrickPlay { player, card })
                .collect();
                actions.extend(self.announceable(player).into_iter().map(|suit| {
                    Action::Announcement {
                        player,
                        content: Announcement::Pair(suit),
                    }
                }));
                actions
            }
            DealPhase::Done => Vec::new(),
        }
    }

    pub fn act_action(&mut self, action: Action) -> Result<ActOutcome, ActionError> {
        let Some(expected) = self.player_at_turn() else {
            return Err(ActionError::DealFinished);
        };
        if matches!(
            action,
            Action::Question { .. } | Action::Answer { .. } | Action::Provocation { .. }
        ) {
            return Err(ActionError::Unsupported(action));
        }
        if action.player() != expected {
            return Err(ActionError::NotYourTurn {
                expected,
                actual: action.player(),
            });
        }

        let outcome = match action {
            Action::CardPass { player, card } => self.pass_card(player, card, action)?,
            Action::TrickPlay { player, card } => self.play_card(player, card, action)?,
            Action::Announcement {
                player,
                content: Announcement::Pair(suit),
            } => self.announce(player, suit, action)?,
            _ => return Err(ActionError::Unsupported(action)),
        };
        self.history.push(action);
        Ok(outcome)
    }

    /// Available once the deal is done.
    pub fn summary(&self) -> Option<DealSummary> {
        if self.phase != DealPhase::Done {
            return None;
        }
        Some(DealSummary {
            setup: self.setup,
            tricks: self.tricks.clone(),
            announcements: self.announcements.clone(),
        })
    }

    fn pass_card(
        &mut self,
        player: PlayerPosition,
        card: Card,
        action: Action,
    ) -> Result<ActOutcome, ActionError> {
        if !matches!(self.phase, DealPhase::Passing | DealPhase::PassingBack) {
            return Err(ActionError::WrongPhase {
                phase: self.phase,
                action,
            });
        }
        if !self.hands[player.index()].remove(card) {
            return Err(ActionError::CardNotInHand { player, card });
        }
        self.hands[player.partner().index()].add(card);
        self.passes_made += 1;
        if self.passes_made == PASS_COUNT {
            self.phase = DealPhase::PassingBack;
        } else if self.passes_made == 2 * PASS_COUNT {
            self.phase = DealPhase::Tricks;
        }
        Ok(ActOutcome::Applied)
    }

    fn play_card(
        &mut self,
        player: PlayerPosition,
        card: Card,
        action: Action,
    ) -> Result<ActOutcome, ActionError> {
        if self.phase != DealPhase::Tricks {
            return Err(ActionError::WrongPhase {
                phase: self.phase,
                action,
            });
        }
        let hand = &self.hands[player.index()];
        if !hand.contains(card) {
            return Err(ActionError::CardNotInHand { player, card });
        }
        let legal = legal_plays(
            &self.current_trick.cards(),
            hand.cards(),
            self.trump,
            self.is_first_trick(),
        );
        if !legal.contains(&card) {
            return Err(ActionError::IllegalCard { card });
        }

        self.current_trick.play(player, card)?;
        self.hands[player.index()].remove(card);
        self.announced_this_lead = false;

        let Some(winner) = self.current_trick.winner(self.trump) else {
            return Ok(ActOutcome::Applied);
        };
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.tricks.push(CompletedTrick {
            trick: finished,
            winner,
            trump: self.trump,
        });
        if self.tricks.len() == HAND_SIZE {
            self.phase = DealPhase::Done;
            return Ok(ActOutcome::DealFinished { winner });
        }
        Ok(ActOutcome::TrickCompleted { winner })
    }

    fn announce(
        &mut self,
        player: PlayerPosition,
        suit: Suit,
        action: Action,
    ) -> Result<ActOutcome, ActionError> {
        if self.phase != DealPhase::Tricks {
            return Err(ActionError::WrongPhase {
                phase: self.phase,
                action,
            });
        }
        if !self.announceable(player).contains(&suit) {
            return Err(ActionError::AnnouncementNotAllowed { player, suit });
        }
        self.trump = Some(suit);
        self.announcements.push((player, suit));
        self.announced_this_lead = true;
        Ok(ActOutcome::Applied)
    }

    /// Suits `player` may declare as trump right now: only on lead after
    /// winning the previous trick, once per lead, each suit once per deal.
    fn announceable(&self, player: PlayerPosition) -> Vec<Suit> {
        let on_lead_after_win = self.current_trick.is_empty()
            && self.current_trick.leader() == player
            && self.tricks.last().is_some_and(|last| last.winner == player);
        if !on_lead_after_win || self.announced_this_lead {
            return Vec::new();
        }
        Suit::ALL
            .into_iter()
            .filter(|&suit| self.hand(player).has_pair(suit))
            .filter(|&suit| !self.announcements.iter().any(|&(_, done)| done == suit))
            .collect()
    }
}
