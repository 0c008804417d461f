use super::action::Action;
use super::deal::{ActionError, DealSetup, DealState};
use crate::model::deck::Deck;
use serde::{Deserialize, Serialize};

/// Replayable log of a deal: the shuffle seed, the bidding outcome and every
/// action applied since.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealRecord {
    pub seed: u64,
    pub setup: DealSetup,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl DealRecord {
    pub fn capture(seed: u64, state: &DealState) -> Self {
        DealRecord {
            seed,
            setup: state.setup(),
            actions: state.history().to_vec(),
        }
    }

    /// Rebuilds the deal by reshuffling from the seed and applying each
    /// recorded action in order.
    pub fn replay(&self) -> Result<DealState, ActionError> {
        let mut state = DealState::deal(&Deck::shuffled_with_seed(self.seed), self.setup);
        for action in &self.actions {
            state.act_action(*action)?;
        }
        Ok(state)
    }

    pub fn to_json(seed: u64, state: &DealState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(seed, state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::DealRecord;
    use crate::game::action::Action;
    use crate::game::deal::{ActionError, DealPhase, DealSetup, DealState};
    use crate::model::deck::Deck;
    use crate::model::player::PlayerPosition;

    const SETUP: DealSetup = DealSetup {
        declarer: PlayerPosition::East,
        game_value: 140,
    };

    fn play_steps(seed: u64, steps: usize) -> DealState {
        let mut state = DealState::deal(&Deck::shuffled_with_seed(seed), SETUP);
        for _ in 0..steps {
            let action = state.legal_actions()[0];
            state.act_action(action).unwrap();
        }
        state
    }

    #[test]
    fn record_serializes_to_json() {
        let state = play_steps(99, 3);
        let json = DealRecord::to_json(99, &state).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"game_value\": 140"));
        assert!(json.contains("\"kind\": \"card_pass\""));
    }

    #[test]
    fn replay_reaches_the_same_state() {
        let state = play_steps(7, 20);
        let record = DealRecord::from_json(&DealRecord::to_json(7, &state).unwrap()).unwrap();
        let replayed = record.replay().unwrap();
        assert_eq!(replayed.phase(), DealPhase::Tricks);
        assert_eq!(replayed.history(), state.history());
        for seat in PlayerPosition::LOOP {
            assert_eq!(replayed.hand(seat), state.hand(seat));
        }
        assert_eq!(replayed.current_trick(), state.current_trick());
    }

    #[test]
    fn missing_actions_field_means_fresh_deal() {
        let record = DealRecord::from_json(
            r#"{ "seed": 3, "setup": { "declarer": "South", "game_value": 120 } }"#,
        )
        .unwrap();
        let state = record.replay().unwrap();
        assert_eq!(state.phase(), DealPhase::Passing);
        assert_eq!(state.player_at_turn(), Some(PlayerPosition::North));
    }

    #[test]
    fn replay_rejects_tampered_log() {
        let state = play_steps(5, 1);
        let mut record = DealRecord::capture(5, &state);
        let Action::CardPass { card, .. } = record.actions[0] else {
            panic!("first action should be a pass");
        };
        record.actions.push(Action::CardPass {
            player: PlayerPosition::West,
            card,
        });
        assert!(matches!(
            record.replay(),
            Err(ActionError::CardNotInHand { .. })
        ));
    }
}
