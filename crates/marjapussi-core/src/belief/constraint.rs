use crate::model::card_set::CardSet;
use serde::{Deserialize, Serialize};

/// Restriction on one seat's hidden hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// The seat certainly holds every card of the set.
    Holds(CardSet),
    /// The seat holds none of the set.
    Excludes(CardSet),
    /// The seat holds nothing outside the set.
    LimitTo(CardSet),
}
