//! Validated, ordered move lists.

use crate::error::MoveSetError;
use std::collections::HashSet;
use std::ops::Index;

/// An ordered list of distinct move labels with an odd length of at least 3.
///
/// The order is significant: a move's position decides which moves it beats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSet {
    labels: Vec<String>,
}

impl MoveSet {
    /// Minimum number of moves in a game
    pub const MIN_MOVES: usize = 3;

    /// Validate and build a move set
    pub fn new<I, S>(labels: I) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.len() < Self::MIN_MOVES {
            return Err(MoveSetError::TooFewMoves(labels.len()));
        }
        if labels.len() % 2 == 0 {
            return Err(MoveSetError::EvenMoveCount(labels.len()));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(MoveSetError::DuplicateMove(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; a valid move set has at least 3 moves
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Length of the longest label, in characters
    pub fn max_label_width(&self) -> usize {
        self.labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl Index<usize> for MoveSet {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}
