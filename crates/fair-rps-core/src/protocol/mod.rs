//! Protocol types, published messages and the session state machine.

mod messages;
mod session;
mod types;

pub use messages::{CommitAnnouncement, FairnessProof, Resolution};
pub use session::{
    Command, Event, GameSession, SessionState, Transition, EXIT_TOKEN, HELP_TOKEN,
};
pub use types::{Outcome, SessionId};
