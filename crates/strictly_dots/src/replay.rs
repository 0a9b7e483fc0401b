//! Replay decoding.
//!
//! A replay is the text `size_x,size_y` followed by groups of four integers
//! `player,x,y,dir`, one group per move. Decoding rebuilds one board frame
//! per legal move and pinpoints the first move that breaks the rules.
//!
//! Malformed text is a [`ReplayError`]. An illegal move in well-formed text
//! is not an error: it becomes a [`Violation`] on the returned [`Replay`].

use crate::action::{Move, MoveError};
use crate::board::Board;
use crate::config::{DecoderConfig, ViolationMode};
use crate::contracts::LineUnclaimed;
use crate::engine::apply_move;
use crate::outcome::Outcome;
use crate::rules::outcome_from_scores;
use crate::types::{Direction, DirectionError, Player};
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Why a replay string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ReplayError {
    /// Nothing but whitespace.
    #[display("Replay data is empty")]
    Empty,

    /// A token is not a decimal integer.
    #[display("Invalid number format: {token:?}")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },

    /// Fewer than the two board dimensions.
    #[display("Expected at least 2 numbers (board size), found {count}")]
    TooFewValues {
        /// Numbers found.
        count: usize,
    },

    /// A board dimension is zero or negative.
    #[display("Invalid board size {size_x}x{size_y}: dimensions must be positive")]
    InvalidDimensions {
        /// Encoded column count.
        size_x: i64,
        /// Encoded row count.
        size_y: i64,
    },

    /// A board dimension exceeds the configured limit.
    #[display("Board size {size_x}x{size_y} exceeds the limit of {max}")]
    BoardTooLarge {
        /// Encoded column count.
        size_x: i64,
        /// Encoded row count.
        size_y: i64,
        /// Configured limit.
        max: usize,
    },

    /// The move data does not split into groups of four.
    #[display("Invalid move data length {len}: must be a multiple of 4 (player,x,y,dir)")]
    MoveDataLength {
        /// Number of integers after the board size.
        len: usize,
    },

    /// A move names a player other than 0 or 1.
    #[display("Move {index}: invalid player {value} (expected 0 or 1)")]
    InvalidPlayer {
        /// Position of the move in the sequence.
        index: usize,
        /// Encoded player.
        value: i64,
    },

    /// A move's direction code is not 0 or 1.
    #[display("Move {index}: {source}")]
    UnknownDirection {
        /// Position of the move in the sequence.
        index: usize,
        /// The rejected direction.
        source: DirectionError,
    },

    /// A move addresses a line that is not on the board.
    #[display("Move {index}: no {direction} line at ({x}, {y}) on this board")]
    LineOffBoard {
        /// Position of the move in the sequence.
        index: usize,
        /// Line orientation.
        direction: Direction,
        /// Encoded column.
        x: i64,
        /// Encoded row.
        y: i64,
    },

    /// A stored replay has no frames at all.
    #[display("Replay has no frames")]
    NoFrames,

    /// A stored frame does not have the replay's dimensions.
    #[display("Frame {index} is not a {size_x}x{size_y} board")]
    FrameSizeMismatch {
        /// Position of the frame.
        index: usize,
        /// Replay column count.
        size_x: usize,
        /// Replay row count.
        size_y: usize,
    },

    /// The rules engine rejected a move it should have accepted.
    #[display("{_0}")]
    #[from]
    Rules(MoveError),
}

/// The first (or, in report-all mode, any) illegal move of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Violation {
    /// Position of the move in the decoded move list.
    index: usize,
    /// The move that tried to claim an owned line.
    #[serde(rename = "move")]
    attempted: Move,
    /// The offender's opponent, who wins by forfeit.
    winner: Player,
}

impl Violation {
    fn new(index: usize, attempted: Move) -> Self {
        Self {
            index,
            attempted,
            winner: attempted.player.opponent(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Move {}: {} tried to claim the {} line at ({}, {}), which is already taken; {} wins by forfeit",
            self.index,
            self.attempted.player,
            self.attempted.direction,
            self.attempted.x,
            self.attempted.y,
            self.winner
        )
    }
}

/// A decoded game: its moves and one board per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "RawReplay")]
pub struct Replay {
    /// Number of box columns.
    size_x: usize,
    /// Number of box rows.
    size_y: usize,
    /// Decoded moves, up to and including the violation decoding stopped at.
    moves: Vec<Move>,
    /// The empty board, then the board after each applied move.
    frames: Vec<Board>,
    /// Illegal moves, in order. At most one unless decoding in report-all mode.
    violations: Vec<Violation>,
    /// Move groups after the stopping violation, left undecoded.
    unchecked_moves: usize,
}

#[derive(Deserialize)]
struct RawReplay {
    size_x: usize,
    size_y: usize,
    moves: Vec<Move>,
    frames: Vec<Board>,
    violations: Vec<Violation>,
    #[serde(default)]
    unchecked_moves: usize,
}

impl TryFrom<RawReplay> for Replay {
    type Error = ReplayError;

    fn try_from(raw: RawReplay) -> Result<Self, Self::Error> {
        if raw.frames.is_empty() {
            return Err(ReplayError::NoFrames);
        }
        if let Some(index) = raw
            .frames
            .iter()
            .position(|frame| frame.size_x() != raw.size_x || frame.size_y() != raw.size_y)
        {
            return Err(ReplayError::FrameSizeMismatch {
                index,
                size_x: raw.size_x,
                size_y: raw.size_y,
            });
        }
        Ok(Self {
            size_x: raw.size_x,
            size_y: raw.size_y,
            moves: raw.moves,
            frames: raw.frames,
            violations: raw.violations,
            unchecked_moves: raw.unchecked_moves,
        })
    }
}

impl Replay {
    /// The first illegal move, if any.
    pub fn violation(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Returns one frame; frame 0 is the empty board.
    pub fn frame(&self, index: usize) -> Option<&Board> {
        self.frames.get(index)
    }

    /// Number of applied moves (frames after the initial one).
    pub fn total_moves(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// The last frame.
    pub fn final_board(&self) -> &Board {
        // Non-empty: decoding pushes the empty board first and
        // deserialization rejects an empty list
        &self.frames[self.frames.len() - 1]
    }

    /// Boxes owned by each player on the final frame.
    pub fn scores(&self) -> [u32; 2] {
        let board = self.final_board();
        [
            board.boxes_owned_by(Player::First) as u32,
            board.boxes_owned_by(Player::Second) as u32,
        ]
    }

    /// Forfeit winner if the replay has a violation, otherwise the box-count
    /// result once the final board is complete.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(violation) = self.violation() {
            return Some(Outcome::Winner(violation.winner));
        }
        self.final_board()
            .is_complete()
            .then(|| outcome_from_scores(self.scores()))
    }
}

/// Decodes replay text according to a [`DecoderConfig`].
#[derive(Debug, Clone, Default, Getters)]
pub struct ReplayDecoder {
    config: DecoderConfig,
}

impl ReplayDecoder {
    /// Creates a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Parses and replays a transcript.
    ///
    /// # Errors
    ///
    /// Returns a [`ReplayError`] describing the first structural problem
    /// among the groups actually read; no partial replay is produced. In
    /// [`ViolationMode::StopAtFirst`] the groups after the first violation
    /// are never read, so they cannot fail decoding.
    #[instrument(skip(self, text), fields(mode = %self.config.violation_mode(), len = text.len()))]
    pub fn decode(&self, text: &str) -> Result<Replay, ReplayError> {
        let values = tokenize(text)?;
        let (size_x, size_y) = self.dimensions(values[0], values[1])?;

        let move_data = &values[2..];
        if move_data.len() % 4 != 0 {
            return Err(ReplayError::MoveDataLength {
                len: move_data.len(),
            });
        }

        let mut board = Board::new(size_x, size_y).map_err(MoveError::from)?;
        let groups = move_data.len() / 4;
        debug!(size_x, size_y, groups, "Replay parsed");

        let mut moves = Vec::with_capacity(groups);
        let mut frames = Vec::with_capacity(groups + 1);
        frames.push(board.clone());
        let mut violations = Vec::new();

        // Groups are decoded lazily: nothing past a stopping violation is read
        for (index, group) in move_data.chunks_exact(4).enumerate() {
            let action = decode_move(&board, index, group)?;
            moves.push(action);

            match LineUnclaimed::check(&action, &board) {
                Ok(()) => {}
                Err(MoveError::LineClaimed { .. }) => {
                    let violation = Violation::new(index, action);
                    warn!(%violation, "Rule violation in replay");
                    violations.push(violation);
                    match self.config.violation_mode() {
                        ViolationMode::StopAtFirst => break,
                        ViolationMode::ReportAll => continue,
                    }
                }
                Err(err) => return Err(err.into()),
            }

            board = apply_move(&board, &action).map_err(MoveError::from)?.dissolve().0;
            frames.push(board.clone());
        }

        let unchecked_moves = groups - moves.len();
        info!(
            frames = frames.len(),
            violations = violations.len(),
            unchecked_moves,
            "Replay decoded"
        );
        Ok(Replay {
            size_x,
            size_y,
            moves,
            frames,
            violations,
            unchecked_moves,
        })
    }

    fn dimensions(&self, size_x: i64, size_y: i64) -> Result<(usize, usize), ReplayError> {
        if size_x <= 0 || size_y <= 0 {
            return Err(ReplayError::InvalidDimensions { size_x, size_y });
        }
        let max = *self.config.max_board_size();
        let too_large = ReplayError::BoardTooLarge {
            size_x,
            size_y,
            max,
        };
        let x = usize::try_from(size_x).map_err(|_| too_large.clone())?;
        let y = usize::try_from(size_y).map_err(|_| too_large.clone())?;
        if x > max || y > max {
            return Err(too_large);
        }
        Ok((x, y))
    }
}

/// Parses and replays a transcript with the default configuration.
///
/// # Errors
///
/// See [`ReplayDecoder::decode`].
pub fn parse_replay(text: &str) -> Result<Replay, ReplayError> {
    ReplayDecoder::default().decode(text)
}

/// Encodes a game as replay text.
pub fn encode_replay(size_x: usize, size_y: usize, moves: &[Move]) -> String {
    std::iter::once(format!("{},{}", size_x, size_y))
        .chain(moves.iter().map(Move::encode))
        .collect::<Vec<_>>()
        .join(",")
}

fn tokenize(text: &str) -> Result<Vec<i64>, ReplayError> {
    if text.trim().is_empty() {
        return Err(ReplayError::Empty);
    }

    let values = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| ReplayError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < 2 {
        return Err(ReplayError::TooFewValues {
            count: values.len(),
        });
    }
    Ok(values)
}

fn decode_move(board: &Board, index: usize, group: &[i64]) -> Result<Move, ReplayError> {
    let &[player, x, y, dir] = group else {
        return Err(ReplayError::MoveDataLength { len: group.len() });
    };

    let player = Player::from_index(player).ok_or(ReplayError::InvalidPlayer {
        index,
        value: player,
    })?;
    let direction = Direction::from_code(dir)
        .map_err(|source| ReplayError::UnknownDirection { index, source })?;

    let off_board = ReplayError::LineOffBoard {
        index,
        direction,
        x,
        y,
    };
    let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
        return Err(off_board);
    };
    if !board.contains_line(direction, ux, uy) {
        return Err(off_board);
    }

    Ok(Move::new(player, direction, ux, uy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_skips_blank_tokens() {
        assert_eq!(tokenize(" 2, 3 ,").unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_tokenize_rejects_words() {
        assert_eq!(
            tokenize("2,x"),
            Err(ReplayError::InvalidNumber {
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_replay("   "), Err(ReplayError::Empty));
        assert_eq!(parse_replay(""), Err(ReplayError::Empty));
    }

    #[test]
    fn test_single_number() {
        assert_eq!(
            parse_replay("4"),
            Err(ReplayError::TooFewValues { count: 1 })
        );
    }

    #[test]
    fn test_board_size_limit() {
        let decoder = ReplayDecoder::new(DecoderConfig::new().with_max_board_size(3));
        assert!(matches!(
            decoder.decode("4,1"),
            Err(ReplayError::BoardTooLarge { max: 3, .. })
        ));
        assert!(decoder.decode("3,3").is_ok());
    }

    #[test]
    fn test_invalid_player() {
        assert_eq!(
            parse_replay("1,1,2,0,0,0").unwrap_err(),
            ReplayError::InvalidPlayer { index: 0, value: 2 }
        );
    }

    #[test]
    fn test_unknown_direction_code() {
        let err = parse_replay("1,1,0,0,0,0,1,0,0,7").unwrap_err();
        assert!(matches!(err, ReplayError::UnknownDirection { index: 1, .. }));
        assert!(err.to_string().contains("Unknown direction"));
    }

    #[test]
    fn test_negative_coordinate_off_board() {
        assert!(matches!(
            parse_replay("1,1,0,-1,0,0"),
            Err(ReplayError::LineOffBoard { index: 0, x: -1, .. })
        ));
    }

    #[test]
    fn test_encode_empty_game() {
        assert_eq!(encode_replay(5, 4, &[]), "5,4");
    }
}
