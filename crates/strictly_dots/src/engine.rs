//! Move engine: applies a single move to a board.
//!
//! The input board is only borrowed; every applied move yields a fresh
//! board so earlier snapshots stay valid.

use crate::action::Move;
use crate::board::{Board, BoardError};
use crate::rules::{adjacent_boxes, is_box_completed};
use crate::types::BoxCoord;
use derive_getters::{Dissolve, Getters};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board after a move, plus the boxes that move closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Dissolve)]
pub struct MoveOutcome {
    /// Board after the move.
    board: Board,
    /// Boxes completed by the move (zero, one or two).
    completed_boxes: Vec<BoxCoord>,
}

impl MoveOutcome {
    /// Returns true if the move closed at least one box.
    pub fn completed_any(&self) -> bool {
        !self.completed_boxes.is_empty()
    }
}

/// Applies a move to a board.
///
/// Claiming a line that is already owned is a no-op: the board comes back
/// unchanged with no completed boxes. Callers that treat this as illegal
/// check [`Board::line_owner`] first.
///
/// # Errors
///
/// Returns [`BoardError::LineOutOfBounds`] if the line is not on the board.
#[instrument(skip(board, action), fields(%action))]
pub fn apply_move(board: &Board, action: &Move) -> Result<MoveOutcome, BoardError> {
    if board
        .line_owner(action.direction, action.x, action.y)?
        .is_some()
    {
        debug!("Line already claimed, move ignored");
        return Ok(MoveOutcome {
            board: board.clone(),
            completed_boxes: Vec::new(),
        });
    }

    let mut next = board.clone();
    next.set_line(action.direction, action.x, action.y, action.player)?;

    let mut completed_boxes = Vec::new();
    for coord in adjacent_boxes(&next, action.direction, action.x, action.y) {
        if next.box_owner(coord.x, coord.y)?.is_some() {
            continue;
        }
        if is_box_completed(&next, coord)? {
            next.set_box_owner(coord.x, coord.y, action.player)?;
            completed_boxes.push(coord);
        }
    }

    debug!(completed = completed_boxes.len(), "Move applied");
    Ok(MoveOutcome {
        board: next,
        completed_boxes,
    })
}
