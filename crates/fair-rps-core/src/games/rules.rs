//! Circular dominance rules over an odd number of moves.
//!
//! Moves are arranged in a circle in list order. Each move beats the `n / 2`
//! moves that follow it and loses to the `n / 2` moves that precede it, so
//! with `[rock, scissors, paper]` rock beats scissors, scissors beats paper
//! and paper beats rock.

use super::moves::MoveSet;
use crate::error::GameError;
use crate::protocol::Outcome;
use std::cell::OnceCell;

/// Decides the outcome of any pair of moves in a [`MoveSet`]
#[derive(Clone, Debug)]
pub struct RuleEngine {
    moves: MoveSet,
    matrix: OnceCell<OutcomeMatrix>,
}

impl RuleEngine {
    pub fn new(moves: MoveSet) -> Self {
        Self {
            moves,
            matrix: OnceCell::new(),
        }
    }

    /// Validate `labels` and build the engine in one step
    pub fn from_labels<I, S>(labels: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(MoveSet::new(labels)?))
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Number of moves each move beats (and loses to)
    pub fn half(&self) -> usize {
        self.moves.len() / 2
    }

    /// Outcome of move `a` played against move `b`, from `a`'s side.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    pub fn determine_outcome(&self, a: usize, b: usize) -> Outcome {
        let n = self.moves.len();
        assert!(a < n && b < n, "move index out of range: ({}, {}) for {} moves", a, b, n);

        if a == b {
            return Outcome::Draw;
        }

        let diff = (b + n - a) % n;
        if diff <= self.half() {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    /// Full pairwise table, computed on first call
    pub fn outcome_matrix(&self) -> &OutcomeMatrix {
        self.matrix.get_or_init(|| {
            let n = self.moves.len();
            let cells = (0..n)
                .flat_map(|row| (0..n).map(move |col| (row, col)))
                .map(|(row, col)| self.determine_outcome(row, col))
                .collect();
            OutcomeMatrix { size: n, cells }
        })
    }
}

/// N x N table where cell `(row, col)` is the outcome of `row` played against `col`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeMatrix {
    size: usize,
    cells: Vec<Outcome>,
}

impl OutcomeMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// # Panics
    ///
    /// If either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Outcome {
        assert!(row < self.size && col < self.size, "matrix index out of range");
        self.cells[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[Outcome] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Outcome]> {
        self.cells.chunks(self.size)
    }
}
