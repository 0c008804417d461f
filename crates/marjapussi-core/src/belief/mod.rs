//! Per-seat knowledge about hidden hands.
//!
//! - `tracker`: the [`InformationTracker`] every agent owns, updated from observed actions.
//! - `constraint`: set-level restrictions external protocols feed into a tracker.
//! - `standing`: which owned cards are guaranteed trick winners.

mod constraint;
mod standing;
mod tracker;

pub use constraint::Constraint;
pub use standing::standing_cards;
pub use tracker::{InformationTracker, ObservationError};
