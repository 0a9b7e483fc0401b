//! Game session: turn order, scoring and game end on top of the move engine.

use crate::action::{Move, MoveError};
use crate::board::{Board, BoardError};
use crate::contracts::{Contract, MoveContract};
use crate::engine::apply_move;
use crate::outcome::Outcome;
use crate::replay::encode_replay;
use crate::rules::outcome_from_scores;
use crate::types::{Direction, DirectionCode, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete state of one game.
///
/// Sessions are values: [`GameSession::play_move`] returns a new session and
/// leaves the receiver untouched, so every earlier session is a valid
/// snapshot of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) scores: [u32; 2],
    pub(crate) history: Vec<Move>,
    pub(crate) finished: bool,
    pub(crate) outcome: Option<Outcome>,
}

impl GameSession {
    /// Creates a new game on an empty `size_x` by `size_y` board.
    ///
    /// The first player moves first.
    ///
    /// # Errors
    ///
    /// Fails if either side is zero or the board is too large.
    #[instrument]
    pub fn new(size_x: usize, size_y: usize) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(size_x, size_y)?,
            current_player: Player::First,
            scores: [0, 0],
            history: Vec::new(),
            finished: false,
            outcome: None,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Both scores, indexed by player.
    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Returns one player's score.
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Returns the moves applied so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns true once every box is owned.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Winner or draw, once the game is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Plays a line for the current player.
    ///
    /// `dir` accepts any [`DirectionCode`] (0/1, `h`/`v`, any case).
    /// Moves after the game has ended and moves on an already claimed line
    /// are ignored: the session comes back unchanged.
    ///
    /// # Errors
    ///
    /// Fails on an unknown direction or a line that is not on the board.
    #[instrument(skip(self, dir))]
    pub fn play_move(&self, dir: impl DirectionCode, x: usize, y: usize) -> Result<Self, MoveError> {
        let direction = dir.to_direction()?;
        self.play(direction, x, y)
    }

    /// Plays a line for the current player, with an already normalized direction.
    ///
    /// Ignored moves behave as in [`GameSession::play_move`].
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::Board`] if the line is not on the board, and in
    /// debug builds with [`MoveError::InvariantViolation`] if the new session
    /// breaks a session invariant.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn play(&self, direction: Direction, x: usize, y: usize) -> Result<Self, MoveError> {
        let action = Move::new(self.current_player, direction, x, y);

        match MoveContract::pre(self, &action) {
            Ok(()) => {}
            Err(err @ (MoveError::GameOver | MoveError::LineClaimed { .. })) => {
                debug!(%err, "Move ignored");
                return Ok(self.clone());
            }
            Err(err) => return Err(err),
        }

        let result = apply_move(&self.board, &action)?;
        let extra_turn = result.completed_any();
        let (board, completed_boxes) = result.dissolve();

        let mut scores = self.scores;
        scores[self.current_player.index()] += completed_boxes.len() as u32;

        // Closing a box earns another move
        let current_player = if extra_turn {
            self.current_player
        } else {
            self.current_player.opponent()
        };

        let mut history = self.history.clone();
        history.push(action);

        let finished = board.claimed_boxes() == board.total_boxes();
        let outcome = finished.then(|| outcome_from_scores(scores));
        if let Some(outcome) = outcome {
            info!(%outcome, ?scores, moves = history.len(), "Game finished");
        }

        let next = Self {
            board,
            current_player,
            scores,
            history,
            finished,
            outcome,
        };

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        Ok(next)
    }

    /// Encodes this game's history in the replay format.
    #[instrument(skip(self))]
    pub fn to_replay(&self) -> String {
        encode_replay(self.board.size_x(), self.board.size_y(), &self.history)
    }
}
