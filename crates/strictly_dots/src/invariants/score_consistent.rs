//! Score consistency invariant: scores equal owned boxes.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Player;
use strum::IntoEnumIterator;

/// Invariant: each player's score equals the number of boxes they own.
pub struct ScoreConsistentInvariant;

impl Invariant<GameSession> for ScoreConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        Player::iter().all(|player| {
            session.score(player) as usize == session.board().boxes_owned_by(player)
        })
    }

    fn description() -> &'static str {
        "Each score equals the boxes owned by that player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_holds() {
        let session = GameSession::new(2, 2).unwrap();
        assert!(ScoreConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_inflated_score_violates() {
        let mut session = GameSession::new(2, 2).unwrap();
        session.scores = [0, 1];
        assert!(!ScoreConsistentInvariant::holds(&session));
    }
}
