//! Strictly Dots - rules engine and replay decoder for dots and boxes
//!
//! Every operation is a pure transition from one value to the next: applying
//! a move yields a new board, playing a move yields a new session, and a
//! decoded replay keeps one independent board per step.
//!
//! # Architecture
//!
//! - **Board**: lines and boxes with bounds-checked accessors
//! - **Engine**: applies one move and reports the boxes it closed
//! - **Session**: turn order, extra turns, scores and game end
//! - **Replay**: decodes `size_x,size_y,(player,x,y,dir)*` transcripts and
//!   flags the first illegal move
//!
//! # Example
//!
//! ```
//! use strictly_dots::{GameSession, Player, parse_replay};
//!
//! let session = GameSession::new(1, 1)?
//!     .play_move('h', 0, 0)?
//!     .play_move('h', 0, 1)?
//!     .play_move('v', 0, 0)?
//!     .play_move('v', 1, 0)?;
//! assert!(session.is_finished());
//! assert_eq!(session.score(Player::Second), 1);
//!
//! let replay = parse_replay(&session.to_replay())?;
//! assert_eq!(replay.frames().len(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod contracts;
mod engine;
mod invariants;
mod outcome;
mod replay;
mod rules;
mod session;
mod types;

// Crate-level exports - Domain types
pub use types::{BoxCoord, Direction, DirectionCode, DirectionError, Player};

// Crate-level exports - Board model
pub use board::{Board, BoardError};

// Crate-level exports - Moves and the move engine
pub use action::{Move, MoveError};
pub use engine::{MoveOutcome, apply_move};

// Crate-level exports - Rules
pub use rules::{adjacent_boxes, bounding_lines, is_box_completed, outcome_from_scores};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, GameNotOver, LegalMove, LineInBounds, LineUnclaimed, MoveContract,
};
pub use invariants::{
    BoxOwnershipInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, ScoreConsistentInvariant, SessionInvariants,
};

// Crate-level exports - Game session
pub use outcome::Outcome;
pub use session::GameSession;

// Crate-level exports - Replay decoding
pub use config::{ConfigError, DecoderConfig, ViolationMode};
pub use replay::{Replay, ReplayDecoder, ReplayError, Violation, encode_replay, parse_replay};
