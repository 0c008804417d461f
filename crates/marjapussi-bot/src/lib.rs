pub mod agent;
pub mod policy;

pub use agent::Agent;
pub use policy::{Policy, PolicyKind, RandomPolicy, StandingPolicy, UnknownPolicy};
