//! Fair RPS Core Library
//!
//! This crate provides the commit-reveal primitives, the circular rule
//! engine and the session state machine for provably fair
//! rock-paper-scissors over any odd number of moves.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, HmacSha256, KeyedHash, RngSource, Secret, SecureRandomSource};
pub use error::{GameError, InputError, MoveSetError};
pub use games::{MoveSet, OutcomeMatrix, RuleEngine};
pub use protocol::{
    Command, Event, FairnessProof, GameSession, Outcome, Resolution, SessionId, SessionState,
    Transition,
};
