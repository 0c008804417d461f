use super::Policy;
use marjapussi_core::belief::InformationTracker;
use marjapussi_core::game::action::Action;
use marjapussi_core::model::card::Card;
use marjapussi_core::model::deck::HAND_SIZE;

/// Deterministic baseline: announces a pair whenever it may, leads a
/// guaranteed winner when it holds one and otherwise gives away its weakest
/// legal card.
///
/// While passing it hands strong cards to the declarer and returns weak ones.
#[derive(Debug, Clone, Default)]
pub struct StandingPolicy;

impl StandingPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for StandingPolicy {
    fn select_action(&mut self, state: &InformationTracker, legal: &[Action]) -> Option<Action> {
        if let Some(announce) = legal
            .iter()
            .find(|action| matches!(action, Action::Announcement { .. }))
        {
            return Some(*announce);
        }

        let passes: Vec<Action> = legal
            .iter()
            .copied()
            .filter(|action| matches!(action, Action::CardPass { .. }))
            .collect();
        if !passes.is_empty() {
            let returning = state.hand().len() > HAND_SIZE;
            return if returning {
                weakest(&passes)
            } else {
                strongest(&passes)
            };
        }

        let plays: Vec<Action> = legal
            .iter()
            .copied()
            .filter(|action| matches!(action, Action::TrickPlay { .. }))
            .collect();
        if state.current_trick().is_empty() {
            let standing = state.standing_cards();
            let winners: Vec<Action> = plays
                .iter()
                .copied()
                .filter(|action| action.card().is_some_and(|card| standing.contains(card)))
                .collect();
            if !winners.is_empty() {
                return strongest(&winners);
            }
        }
        weakest(&plays).or_else(|| legal.first().copied())
    }

    fn name(&self) -> &'static str {
        "standing"
    }
}

fn strength(action: &Action) -> Option<(u8, u8)> {
    action
        .card()
        .map(|card: Card| (card.rank.strength(), card.suit.index() as u8))
}

fn strongest(actions: &[Action]) -> Option<Action> {
    actions.iter().copied().max_by_key(strength)
}

fn weakest(actions: &[Action]) -> Option<Action> {
    actions.iter().copied().min_by_key(strength)
}
