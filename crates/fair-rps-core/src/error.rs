//! Error types.

use thiserror::Error;

/// Reasons a move list cannot form a fair game
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveSetError {
    #[error("at least 3 moves are required, got {0}")]
    TooFewMoves(usize),

    #[error("an odd number of moves is required, got {0}")]
    EvenMoveCount(usize),

    #[error("duplicate move: {0:?}")]
    DuplicateMove(String),
}

/// Reasons a line of player input was rejected
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0:?} is not a move number")]
    NotANumber(String),

    #[error("move {selection} is out of range, choose 1-{max}")]
    OutOfRange { selection: u64, max: usize },
}

/// Errors from game operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid move list: {0}")]
    Configuration(#[from] MoveSetError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Secure random source unavailable: {0}")]
    Environment(String),

    #[error("Fairness violation: published commitment {published} does not match recomputed {recomputed}")]
    FairnessViolation {
        published: String,
        recomputed: String,
    },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Session already resolved")]
    SessionFinished,
}

impl GameError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            GameError::Configuration(_) => 2,
            GameError::Environment(_) => 3,
            GameError::FairnessViolation { .. } => 4,
            GameError::Input(_) | GameError::InvalidHex(_) | GameError::SessionFinished => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_fatal_kinds() {
        let config = GameError::from(MoveSetError::EvenMoveCount(4));
        let env = GameError::Environment("no entropy".into());
        let fairness = GameError::FairnessViolation {
            published: "aa".into(),
            recomputed: "bb".into(),
        };

        assert_eq!(config.exit_code(), 2);
        assert_eq!(env.exit_code(), 3);
        assert_eq!(fairness.exit_code(), 4);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            MoveSetError::DuplicateMove("rock".into()).to_string(),
            "duplicate move: \"rock\""
        );
        assert_eq!(
            InputError::OutOfRange {
                selection: 9,
                max: 3
            }
            .to_string(),
            "move 9 is out of range, choose 1-3"
        );
    }
}
