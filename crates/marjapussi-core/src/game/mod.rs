pub mod action;
pub mod deal;
pub mod serialization;
