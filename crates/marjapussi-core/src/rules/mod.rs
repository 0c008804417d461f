//! Trick law: which cards may be played, which card takes a trick, and which
//! cards would beat a given card.

mod beating;
mod legal;
mod resolve;

pub use beating::{beating_cards, higher_cards};
pub use legal::{allowed_first_lead, is_legal, legal_plays};
pub use resolve::high_card;
