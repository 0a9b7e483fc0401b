//! Contract-based validation for dots and boxes.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{Move, MoveError};
use crate::board::{Board, BoardError};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::session::GameSession;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must still accept moves.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] once the session is finished.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), MoveError> {
        if session.is_finished() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the line must exist on the board.
pub struct LineInBounds;

impl LineInBounds {
    /// Fails with [`BoardError::LineOutOfBounds`] for lines off the board.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if board.contains_line(mov.direction, mov.x, mov.y) {
            Ok(())
        } else {
            Err(BoardError::LineOutOfBounds {
                direction: mov.direction,
                x: mov.x,
                y: mov.y,
            }
            .into())
        }
    }
}

/// Precondition: the line must not be owned yet.
pub struct LineUnclaimed;

impl LineUnclaimed {
    /// Fails with [`MoveError::LineClaimed`] if someone already owns the line.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if board.line_owner(mov.direction, mov.x, mov.y)?.is_some() {
            Err(MoveError::LineClaimed {
                direction: mov.direction,
                x: mov.x,
                y: mov.y,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the game is live and the line exists and is free.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        GameNotOver::check(session)?;
        LineInBounds::check(mov, session.board())?;
        LineUnclaimed::check(mov, session.board())?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game is not over
/// - Line is on the board and unclaimed
///
/// Postconditions:
/// - Boxes are owned exactly when closed, by whoever closed them
/// - Scores match owned boxes
/// - History matches claimed lines
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, session)
    }

    fn post(_before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Move postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Player};

    #[test]
    fn test_precondition_free_line() {
        let session = GameSession::new(2, 2).unwrap();
        let action = Move::new(Player::First, Direction::Horizontal, 0, 0);
        assert!(MoveContract::pre(&session, &action).is_ok());
    }

    #[test]
    fn test_precondition_claimed_line() {
        let session = GameSession::new(2, 2)
            .unwrap()
            .play(Direction::Horizontal, 0, 0)
            .unwrap();
        let action = Move::new(Player::Second, Direction::Horizontal, 0, 0);
        assert!(matches!(
            MoveContract::pre(&session, &action),
            Err(MoveError::LineClaimed { .. })
        ));
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let session = GameSession::new(1, 1).unwrap();
        let action = Move::new(Player::First, Direction::Vertical, 2, 0);
        assert!(matches!(
            MoveContract::pre(&session, &action),
            Err(MoveError::Board(BoardError::LineOutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_precondition_game_over() {
        let mut session = GameSession::new(1, 1).unwrap();
        for (direction, x, y) in [
            (Direction::Horizontal, 0, 0),
            (Direction::Horizontal, 0, 1),
            (Direction::Vertical, 0, 0),
            (Direction::Vertical, 1, 0),
        ] {
            session = session.play(direction, x, y).unwrap();
        }
        let action = Move::new(Player::First, Direction::Horizontal, 0, 0);
        assert_eq!(MoveContract::pre(&session, &action), Err(MoveError::GameOver));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameSession::new(2, 1).unwrap();
        let after = before.play(Direction::Vertical, 1, 0).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = GameSession::new(1, 1).unwrap();
        let mut after = before.play(Direction::Vertical, 1, 0).unwrap();
        // A box owned without its lines
        after.board.set_box_owner(0, 0, Player::First).unwrap();
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
