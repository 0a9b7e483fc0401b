//! First-class action types for dots and boxes.
//!
//! Moves are domain events, not side effects. They name a player and a
//! line and can be validated independently of execution.

use crate::board::BoardError;
use crate::types::{Direction, DirectionError, Player};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in dots and boxes: a player claiming one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Column of the line.
    pub x: usize,
    /// Row of the line.
    pub y: usize,
    /// Orientation of the line.
    pub direction: Direction,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, direction: Direction, x: usize, y: usize) -> Self {
        Self {
            player,
            x,
            y,
            direction,
        }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the orientation of the claimed line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Encodes this move as its four replay integers `player,x,y,dir`.
    pub fn encode(&self) -> String {
        format!(
            "{},{},{},{}",
            self.player.index(),
            self.x,
            self.y,
            self.direction.code()
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} line ({}, {})",
            self.player, self.direction, self.x, self.y
        )
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum MoveError {
    /// The direction could not be normalized.
    #[display("{_0}")]
    #[from]
    UnknownDirection(DirectionError),

    /// The move addresses something outside the board.
    #[display("{_0}")]
    #[from]
    Board(BoardError),

    /// The line is already owned.
    #[display("The {direction} line at ({x}, {y}) is already claimed")]
    LineClaimed {
        /// Line orientation.
        direction: Direction,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}
