mod random;
mod standing;

pub use random::RandomPolicy;
pub use standing::StandingPolicy;

use marjapussi_core::belief::InformationTracker;
use marjapussi_core::game::action::Action;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pluggable strategy for one seat.
pub trait Policy: Send {
    /// Picks one of `legal`. Returns `None` only when `legal` is empty.
    fn select_action(&mut self, state: &InformationTracker, legal: &[Action]) -> Option<Action>;

    /// Called after `state` has absorbed `action`, for every action of the deal.
    fn observe_action(&mut self, _state: &InformationTracker, _action: &Action) {}

    fn name(&self) -> &'static str;
}

/// Policies selectable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Standing,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Random, PolicyKind::Standing];

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Standing => "standing",
        }
    }

    /// `seed` feeds the policy's own random source where it has one.
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::Standing => Box::new(StandingPolicy::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy kind '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPolicy(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::PolicyKind;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert_eq!(" standing ".parse::<PolicyKind>(), Ok(PolicyKind::Standing));
        assert!("greedy".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn built_policy_reports_its_name() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.build(1).name(), kind.as_str());
        }
    }
}
