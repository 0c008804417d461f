use super::Policy;
use marjapussi_core::belief::InformationTracker;
use marjapussi_core::game::action::Action;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Uniform choice over the legal actions, from its own seeded generator.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _state: &InformationTracker, legal: &[Action]) -> Option<Action> {
        legal.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
