//! Box completion and end-of-game scoring.

use super::adjacency::bounding_lines;
use crate::board::{Board, BoardError};
use crate::outcome::Outcome;
use crate::types::{BoxCoord, Player};
use tracing::instrument;

/// Checks whether all four lines around a box are claimed.
///
/// # Errors
///
/// Returns [`BoardError::LineOutOfBounds`] if the box is not on the board.
#[instrument(skip(board))]
pub fn is_box_completed(board: &Board, coord: BoxCoord) -> Result<bool, BoardError> {
    for (direction, x, y) in bounding_lines(coord) {
        if board.line_owner(direction, x, y)?.is_none() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Result of a finished game given both scores, indexed by player.
///
/// The higher score wins; equal scores are a draw.
#[instrument]
pub fn outcome_from_scores(scores: [u32; 2]) -> Outcome {
    let [first, second] = scores;
    if first == second {
        Outcome::Draw
    } else if first > second {
        Outcome::Winner(Player::First)
    } else {
        Outcome::Winner(Player::Second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_box_needs_all_four_lines() {
        let mut board = Board::new(1, 1).unwrap();
        let coord = BoxCoord::new(0, 0);
        board.set_line(Direction::Horizontal, 0, 0, Player::First).unwrap();
        board.set_line(Direction::Horizontal, 0, 1, Player::Second).unwrap();
        board.set_line(Direction::Vertical, 0, 0, Player::First).unwrap();
        assert_eq!(is_box_completed(&board, coord), Ok(false));

        board.set_line(Direction::Vertical, 1, 0, Player::Second).unwrap();
        assert_eq!(is_box_completed(&board, coord), Ok(true));
    }

    #[test]
    fn test_box_out_of_bounds_is_error() {
        let board = Board::new(1, 1).unwrap();
        assert!(is_box_completed(&board, BoxCoord::new(3, 3)).is_err());
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(outcome_from_scores([2, 2]), Outcome::Draw);
        assert_eq!(outcome_from_scores([3, 1]), Outcome::Winner(Player::First));
        assert_eq!(outcome_from_scores([0, 4]), Outcome::Winner(Player::Second));
    }
}
