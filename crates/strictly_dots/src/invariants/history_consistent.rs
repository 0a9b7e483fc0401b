//! History consistency invariant: history matches claimed lines.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: history length equals the number of claimed lines, and each
/// recorded move's line belongs to the player who made it.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        session.history().len() == board.claimed_lines()
            && session.history().iter().all(|m| {
                board.line_owner(m.direction, m.x, m.y) == Ok(Some(m.player))
            })
    }

    fn description() -> &'static str {
        "History matches the claimed lines"
    }
}
