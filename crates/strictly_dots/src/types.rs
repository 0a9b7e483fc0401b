//! Core domain types for dots and boxes.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Player {
    /// Player with index 0 (moves first).
    #[display("Player 1")]
    First,
    /// Player with index 1.
    #[display("Player 2")]
    Second,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Returns the player's index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Creates a player from its index, rejecting anything but 0 and 1.
    #[instrument]
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }
}

/// Orientation of a line between two adjacent dots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Direction {
    /// Line running left to right (code 0).
    #[display("horizontal")]
    Horizontal,
    /// Line running top to bottom (code 1).
    #[display("vertical")]
    Vertical,
}

impl Direction {
    /// Returns the numeric code used in the replay encoding.
    pub fn code(self) -> u8 {
        match self {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
        }
    }

    /// Single-letter form (`h` or `v`).
    pub fn letter(self) -> char {
        match self {
            Direction::Horizontal => 'h',
            Direction::Vertical => 'v',
        }
    }

    /// Creates a direction from its numeric code.
    ///
    /// # Errors
    ///
    /// Any code other than 0 or 1 is a [`DirectionError`].
    pub fn from_code(code: i64) -> Result<Self, DirectionError> {
        match code {
            0 => Ok(Direction::Horizontal),
            1 => Ok(Direction::Vertical),
            other => Err(DirectionError::new(other.to_string())),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "h" | "horizontal" => Ok(Direction::Horizontal),
            "1" | "v" | "vertical" => Ok(Direction::Vertical),
            _ => Err(DirectionError::new(s)),
        }
    }
}

/// A direction value that could not be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown direction: {value:?}")]
pub struct DirectionError {
    /// The rejected input, as text.
    pub value: String,
}

impl DirectionError {
    /// Creates a new direction error for the given input.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Anything that can name a line direction.
///
/// Accepts the typed [`Direction`], the numeric codes 0/1, the letters
/// `h`/`v` and the words `horizontal`/`vertical` in any case.
pub trait DirectionCode {
    /// Normalizes this value into a [`Direction`].
    fn to_direction(&self) -> Result<Direction, DirectionError>;
}

impl DirectionCode for Direction {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        Ok(*self)
    }
}

impl DirectionCode for i64 {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        Direction::from_code(*self)
    }
}

impl DirectionCode for i32 {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        Direction::from_code(i64::from(*self))
    }
}

impl DirectionCode for u8 {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        Direction::from_code(i64::from(*self))
    }
}

impl DirectionCode for char {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        match self.to_ascii_lowercase() {
            '0' | 'h' => Ok(Direction::Horizontal),
            '1' | 'v' => Ok(Direction::Vertical),
            other => Err(DirectionError::new(other.to_string())),
        }
    }
}

impl DirectionCode for str {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        self.parse()
    }
}

impl DirectionCode for String {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        self.parse()
    }
}

impl<T: DirectionCode + ?Sized> DirectionCode for &T {
    fn to_direction(&self) -> Result<Direction, DirectionError> {
        (**self).to_direction()
    }
}

/// Coordinates of a box (unit cell), column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("({x}, {y})")]
pub struct BoxCoord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl BoxCoord {
    /// Creates a new box coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_swaps() {
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent(), Player::First);
    }

    #[test]
    fn test_player_from_index_rejects_others() {
        assert_eq!(Player::from_index(0), Some(Player::First));
        assert_eq!(Player::from_index(1), Some(Player::Second));
        assert_eq!(Player::from_index(2), None);
        assert_eq!(Player::from_index(-1), None);
    }

    #[test]
    fn test_direction_codes_normalize() {
        assert_eq!(0u8.to_direction(), Ok(Direction::Horizontal));
        assert_eq!(1i64.to_direction(), Ok(Direction::Vertical));
        assert_eq!('H'.to_direction(), Ok(Direction::Horizontal));
        assert_eq!('v'.to_direction(), Ok(Direction::Vertical));
        assert_eq!("Vertical".to_direction(), Ok(Direction::Vertical));
        assert_eq!("0".to_direction(), Ok(Direction::Horizontal));
        assert_eq!(" h ".to_direction(), Ok(Direction::Horizontal));
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let err = 2i32.to_direction().unwrap_err();
        assert_eq!(err.value, "2");
        assert!(err.to_string().contains("Unknown direction"));
        assert!("x".to_direction().is_err());
        assert!('d'.to_direction().is_err());
    }
}
