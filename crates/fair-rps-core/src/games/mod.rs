//! Move lists and the rules that rank them.

mod moves;
mod rules;

pub use moves::MoveSet;
pub use rules::{OutcomeMatrix, RuleEngine};
