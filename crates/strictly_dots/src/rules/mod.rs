//! Game rules for dots and boxes.
//!
//! This module contains pure functions for evaluating board state
//! according to dots and boxes rules. Rules are separated from board
//! storage so the move engine, contracts and invariants can share them.

pub mod adjacency;
pub mod completion;

pub use adjacency::{adjacent_boxes, bounding_lines};
pub use completion::{is_box_completed, outcome_from_scores};
