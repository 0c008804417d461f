use crate::policy::Policy;
use marjapussi_core::belief::{InformationTracker, ObservationError};
use marjapussi_core::game::action::Action;
use marjapussi_core::model::card::Card;
use marjapussi_core::model::player::PlayerPosition;
use tracing::{Level, event};

/// One seat at the table: its own view of the deal and the strategy acting on it.
pub struct Agent {
    seat: PlayerPosition,
    tracker: InformationTracker,
    policy: Box<dyn Policy>,
}

impl Agent {
    pub fn new(seat: PlayerPosition, hand: &[Card], policy: Box<dyn Policy>) -> Self {
        Self {
            seat,
            tracker: InformationTracker::new(seat, hand),
            policy,
        }
    }

    pub fn seat(&self) -> PlayerPosition {
        self.seat
    }

    pub fn tracker(&self) -> &InformationTracker {
        &self.tracker
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Forget the previous deal; the policy keeps its state.
    pub fn reset(&mut self, hand: &[Card]) {
        self.tracker.reset(hand);
    }

    pub fn next_action(&mut self, legal: &[Action]) -> Option<Action> {
        let chosen = self.policy.select_action(&self.tracker, legal);
        log_selection(self.seat, self.policy.name(), &self.tracker, legal, chosen);
        chosen
    }

    /// Feeds an action seen at the table into the tracker, then the policy.
    pub fn observe_action(&mut self, action: &Action) -> Result<(), ObservationError> {
        if let Err(err) = self.tracker.observe(action) {
            tracing::warn!(
                target: "marjapussi_bot::agent",
                seat = ?self.seat,
                action = %action,
                error = %err,
                "observation rejected"
            );
            return Err(err);
        }
        self.policy.observe_action(&self.tracker, action);
        event!(
            target: "marjapussi_bot::agent",
            Level::TRACE,
            seat = ?self.seat,
            action = %action,
            tricks = self.tracker.tricks_completed(),
        );
        Ok(())
    }
}

fn log_selection(
    seat: PlayerPosition,
    policy: &str,
    tracker: &InformationTracker,
    legal: &[Action],
    chosen: Option<Action>,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let choice = chosen.map_or_else(|| "none".to_string(), |action| action.to_string());
    let legal_preview = if legal.len() <= 4 {
        legal
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        format!("{} actions", legal.len())
    };

    event!(
        target: "marjapussi_bot::agent",
        Level::DEBUG,
        seat = ?seat,
        policy,
        legal_count = legal.len(),
        legal = %legal_preview,
        chosen = %choice,
        trump = ?tracker.trump(),
        standing = %tracker.standing_cards(),
        trick_cards = tracker.current_trick().len(),
    );
}
