//! First-class invariants for dots and boxes.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for 2- and 3-tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

pub mod box_ownership;
pub mod history_consistent;
pub mod score_consistent;

pub use box_ownership::BoxOwnershipInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use score_consistent::ScoreConsistentInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    BoxOwnershipInvariant,
    ScoreConsistentInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameSession;
    use crate::types::{Direction, Player};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let session = GameSession::new(3, 3).unwrap();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let session = GameSession::new(1, 2)
            .unwrap()
            .play(Direction::Horizontal, 0, 1)
            .and_then(|s| s.play(Direction::Vertical, 0, 0))
            .and_then(|s| s.play(Direction::Vertical, 1, 0))
            .and_then(|s| s.play(Direction::Horizontal, 0, 0))
            .unwrap();
        assert_eq!(session.scores(), [0, 1]);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut session = GameSession::new(1, 1).unwrap();
        session.scores = [1, 0];
        session.board.set_box_owner(0, 0, Player::First).unwrap();
        let violations = SessionInvariants::check_all(&session).unwrap_err();
        // Score matches the bogus box, so only ownership fails
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <BoxOwnershipInvariant as Invariant<GameSession>>::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let session = GameSession::new(2, 2).unwrap();
        type TwoInvariants = (ScoreConsistentInvariant, HistoryConsistentInvariant);
        assert!(TwoInvariants::check_all(&session).is_ok());
    }
}
