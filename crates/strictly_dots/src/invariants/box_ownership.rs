//! Box ownership invariant: a box is owned exactly when it is closed.

use super::Invariant;
use crate::board::Board;
use crate::rules::{bounding_lines, is_box_completed};
use crate::session::GameSession;

/// Invariant: every box is owned if and only if its four lines are claimed.
///
/// On a session the owner must also be the player who claimed the last of
/// those four lines.
pub struct BoxOwnershipInvariant;

impl Invariant<Board> for BoxOwnershipInvariant {
    fn holds(board: &Board) -> bool {
        board.boxes().all(|(coord, owner)| {
            matches!(is_box_completed(board, coord), Ok(closed) if closed == owner.is_some())
        })
    }

    fn description() -> &'static str {
        "Boxes are owned exactly when all four lines are claimed"
    }
}

impl Invariant<GameSession> for BoxOwnershipInvariant {
    fn holds(session: &GameSession) -> bool {
        if !<Self as Invariant<Board>>::holds(session.board()) {
            return false;
        }

        session.board().boxes().all(|(coord, owner)| {
            let Some(owner) = owner else {
                return true;
            };
            let lines = bounding_lines(coord);
            let closer = session
                .history()
                .iter()
                .rev()
                .find(|m| lines.contains(&(m.direction, m.x, m.y)));
            closer.is_some_and(|m| m.player == owner)
        })
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
