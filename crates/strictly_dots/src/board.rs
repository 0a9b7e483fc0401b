//! Board model: the grid of dots, the lines between them and the boxes they enclose.

use crate::action::MoveError;
use crate::types::{BoxCoord, Direction, DirectionCode, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Error raised for malformed board dimensions or out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Both dimensions must be positive.
    #[display("Board dimensions must be positive, got {size_x}x{size_y}")]
    InvalidDimensions {
        /// Requested number of box columns.
        size_x: usize,
        /// Requested number of box rows.
        size_y: usize,
    },

    /// The board would hold more than [`Board::MAX_LINES`] lines.
    #[display("Board of {size_x}x{size_y} boxes is too large")]
    TooLarge {
        /// Requested number of box columns.
        size_x: usize,
        /// Requested number of box rows.
        size_y: usize,
    },

    /// Stored line or box data does not fit the stated dimensions.
    #[display("Board data does not match a {size_x}x{size_y} board")]
    MalformedLayout {
        /// Stated number of box columns.
        size_x: usize,
        /// Stated number of box rows.
        size_y: usize,
    },

    /// The addressed line does not exist on this board.
    #[display("No {direction} line at ({x}, {y}) on this board")]
    LineOutOfBounds {
        /// Line orientation.
        direction: Direction,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// The addressed box does not exist on this board.
    #[display("No box at ({x}, {y}) on this board")]
    BoxOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
}

/// Dots and boxes board of `size_x` by `size_y` boxes.
///
/// Lines and boxes are stored in flat vectors; every accessor checks bounds.
///
/// - horizontal lines: `size_y + 1` rows of `size_x`, index `y * size_x + x`
/// - vertical lines: `size_x + 1` columns of `size_y`, index `x * size_y + y`
/// - boxes: `size_y` rows of `size_x`, index `y * size_x + x`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size_x: usize,
    size_y: usize,
    horizontal: Vec<Option<Player>>,
    vertical: Vec<Option<Player>>,
    boxes: Vec<Option<Player>>,
}

/// Serialized board, checked before it becomes a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    size_x: usize,
    size_y: usize,
    horizontal: Vec<Option<Player>>,
    vertical: Vec<Option<Player>>,
    boxes: Vec<Option<Player>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let (horizontal, vertical, boxes) = Board::layout(raw.size_x, raw.size_y)?;
        if raw.horizontal.len() != horizontal
            || raw.vertical.len() != vertical
            || raw.boxes.len() != boxes
        {
            return Err(BoardError::MalformedLayout {
                size_x: raw.size_x,
                size_y: raw.size_y,
            });
        }
        Ok(Self {
            size_x: raw.size_x,
            size_y: raw.size_y,
            horizontal: raw.horizontal,
            vertical: raw.vertical,
            boxes: raw.boxes,
        })
    }
}

impl Board {
    /// Upper bound on the number of lines a board may hold.
    pub const MAX_LINES: usize = 1 << 24;

    /// Creates an empty board with every line and box unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if either side is zero and
    /// [`BoardError::TooLarge`] if the board would exceed [`Board::MAX_LINES`].
    #[instrument]
    pub fn new(size_x: usize, size_y: usize) -> Result<Self, BoardError> {
        let (horizontal, vertical, boxes) = Self::layout(size_x, size_y)?;
        Ok(Self {
            size_x,
            size_y,
            horizontal: vec![None; horizontal],
            vertical: vec![None; vertical],
            boxes: vec![None; boxes],
        })
    }

    /// Lengths of the horizontal, vertical and box vectors.
    fn layout(size_x: usize, size_y: usize) -> Result<(usize, usize, usize), BoardError> {
        if size_x == 0 || size_y == 0 {
            return Err(BoardError::InvalidDimensions { size_x, size_y });
        }
        let too_large = BoardError::TooLarge { size_x, size_y };
        let horizontal = size_y
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(size_x))
            .ok_or(too_large.clone())?;
        let vertical = size_x
            .checked_add(1)
            .and_then(|columns| columns.checked_mul(size_y))
            .ok_or(too_large.clone())?;
        match horizontal.checked_add(vertical) {
            Some(lines) if lines <= Self::MAX_LINES => {}
            _ => return Err(too_large),
        }
        // Fewer boxes than horizontal lines, so this cannot overflow
        Ok((horizontal, vertical, size_x * size_y))
    }

    /// Number of box columns.
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    /// Number of box rows.
    pub fn size_y(&self) -> usize {
        self.size_y
    }

    fn line_index(&self, direction: Direction, x: usize, y: usize) -> Result<usize, BoardError> {
        let in_bounds = match direction {
            Direction::Horizontal => x < self.size_x && y <= self.size_y,
            Direction::Vertical => x <= self.size_x && y < self.size_y,
        };
        if !in_bounds {
            return Err(BoardError::LineOutOfBounds { direction, x, y });
        }
        Ok(match direction {
            Direction::Horizontal => y * self.size_x + x,
            Direction::Vertical => x * self.size_y + y,
        })
    }

    fn box_index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.size_x || y >= self.size_y {
            return Err(BoardError::BoxOutOfBounds { x, y });
        }
        Ok(y * self.size_x + x)
    }

    /// Returns true if a line exists at these coordinates.
    pub fn contains_line(&self, direction: Direction, x: usize, y: usize) -> bool {
        self.line_index(direction, x, y).is_ok()
    }

    /// Returns the owner of a line, or `None` if unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LineOutOfBounds`] if the line is not on the board.
    pub fn line_owner(
        &self,
        direction: Direction,
        x: usize,
        y: usize,
    ) -> Result<Option<Player>, BoardError> {
        let index = self.line_index(direction, x, y)?;
        Ok(match direction {
            Direction::Horizontal => self.horizontal[index],
            Direction::Vertical => self.vertical[index],
        })
    }

    /// Checks whether a line has been claimed.
    ///
    /// `dir` may be any [`DirectionCode`]: a [`Direction`], 0/1, `h`/`v`, or
    /// `horizontal`/`vertical` in any case.
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::UnknownDirection`] if `dir` is not a direction
    /// and [`MoveError::Board`] if the line is not on the board.
    #[instrument(skip(self, dir))]
    pub fn is_line_claimed(
        &self,
        dir: impl DirectionCode,
        x: usize,
        y: usize,
    ) -> Result<bool, MoveError> {
        let direction = dir.to_direction()?;
        Ok(self.line_owner(direction, x, y)?.is_some())
    }

    /// Assigns a line to a player.
    pub(crate) fn set_line(
        &mut self,
        direction: Direction,
        x: usize,
        y: usize,
        owner: Player,
    ) -> Result<(), BoardError> {
        let index = self.line_index(direction, x, y)?;
        match direction {
            Direction::Horizontal => self.horizontal[index] = Some(owner),
            Direction::Vertical => self.vertical[index] = Some(owner),
        }
        Ok(())
    }

    /// Returns the owner of a box, or `None` if unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoxOutOfBounds`] if the box is not on the board.
    pub fn box_owner(&self, x: usize, y: usize) -> Result<Option<Player>, BoardError> {
        let index = self.box_index(x, y)?;
        Ok(self.boxes[index])
    }

    /// Assigns a box to a player.
    pub(crate) fn set_box_owner(
        &mut self,
        x: usize,
        y: usize,
        owner: Player,
    ) -> Result<(), BoardError> {
        let index = self.box_index(x, y)?;
        self.boxes[index] = Some(owner);
        Ok(())
    }

    /// Total number of boxes (`size_x * size_y`).
    pub fn total_boxes(&self) -> usize {
        self.boxes.len()
    }

    /// Total number of lines on the board.
    pub fn total_lines(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// Number of boxes owned by anyone.
    pub fn claimed_boxes(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_some()).count()
    }

    /// Number of boxes owned by `player`.
    pub fn boxes_owned_by(&self, player: Player) -> usize {
        self.boxes.iter().filter(|b| **b == Some(player)).count()
    }

    /// Number of claimed lines.
    pub fn claimed_lines(&self) -> usize {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .filter(|l| l.is_some())
            .count()
    }

    /// Returns true once every box is owned.
    pub fn is_complete(&self) -> bool {
        self.boxes.iter().all(Option::is_some)
    }

    /// Iterates over every line as `(direction, x, y, owner)`.
    pub fn lines(&self) -> impl Iterator<Item = (Direction, usize, usize, Option<Player>)> + '_ {
        let horizontal = (0..=self.size_y).flat_map(move |y| {
            (0..self.size_x)
                .map(move |x| (Direction::Horizontal, x, y, self.horizontal[y * self.size_x + x]))
        });
        let vertical = (0..=self.size_x).flat_map(move |x| {
            (0..self.size_y)
                .map(move |y| (Direction::Vertical, x, y, self.vertical[x * self.size_y + y]))
        });
        horizontal.chain(vertical)
    }

    /// Lines nobody has claimed yet.
    pub fn open_lines(&self) -> Vec<(Direction, usize, usize)> {
        self.lines()
            .filter(|(.., owner)| owner.is_none())
            .map(|(direction, x, y, _)| (direction, x, y))
            .collect()
    }

    /// Iterates over every box as `(coord, owner)` in row-major order.
    pub fn boxes(&self) -> impl Iterator<Item = (BoxCoord, Option<Player>)> + '_ {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, owner)| (BoxCoord::new(i % self.size_x, i / self.size_x), *owner))
    }

    /// Formats the board as a human-readable string.
    ///
    /// Dots are `+`, claimed lines `---` and `|`, owned boxes show the
    /// owner's number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in 0..=self.size_y {
            for x in 0..self.size_x {
                result.push('+');
                let claimed = self.horizontal[y * self.size_x + x].is_some();
                result.push_str(if claimed { "---" } else { "   " });
            }
            result.push('+');
            if y == self.size_y {
                break;
            }
            result.push('\n');
            for x in 0..=self.size_x {
                let claimed = self.vertical[x * self.size_y + y].is_some();
                result.push(if claimed { '|' } else { ' ' });
                if x < self.size_x {
                    let cell = match self.boxes[y * self.size_x + x] {
                        Some(owner) => format!(" {} ", owner.index() + 1),
                        None => "   ".to_string(),
                    };
                    result.push_str(&cell);
                }
            }
            result.push('\n');
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3, 2).unwrap();
        assert_eq!(board.total_boxes(), 6);
        // 3 rows of 3 horizontal + 4 columns of 2 vertical
        assert_eq!(board.total_lines(), 17);
        assert_eq!(board.claimed_lines(), 0);
        assert_eq!(board.claimed_boxes(), 0);
        assert!(!board.is_complete());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Board::new(0, 5),
            Err(BoardError::InvalidDimensions { size_x: 0, size_y: 5 })
        );
        assert!(Board::new(4, 0).is_err());
    }

    #[test]
    fn test_line_bounds_follow_orientation() {
        let board = Board::new(2, 1).unwrap();
        assert!(board.contains_line(Direction::Horizontal, 1, 1));
        assert!(!board.contains_line(Direction::Horizontal, 2, 0));
        assert!(board.contains_line(Direction::Vertical, 2, 0));
        assert!(!board.contains_line(Direction::Vertical, 0, 1));
    }

    #[test]
    fn test_is_line_claimed_out_of_bounds_fails() {
        let board = Board::new(1, 1).unwrap();
        let err = board.is_line_claimed('h', 5, 0).unwrap_err();
        assert!(matches!(
            err,
            MoveError::Board(BoardError::LineOutOfBounds { x: 5, .. })
        ));
    }

    #[test]
    fn test_is_line_claimed_unknown_direction() {
        let board = Board::new(1, 1).unwrap();
        assert!(matches!(
            board.is_line_claimed("diagonal", 0, 0),
            Err(MoveError::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_set_line_and_query() {
        let mut board = Board::new(1, 1).unwrap();
        board.set_line(Direction::Vertical, 1, 0, Player::Second).unwrap();
        assert_eq!(board.is_line_claimed(1u8, 1, 0), Ok(true));
        assert_eq!(board.is_line_claimed("V", 0, 0), Ok(false));
        assert_eq!(
            board.line_owner(Direction::Vertical, 1, 0),
            Ok(Some(Player::Second))
        );
        assert_eq!(board.open_lines().len(), 3);
    }

    #[test]
    fn test_box_owner_bounds_checked() {
        let board = Board::new(2, 2).unwrap();
        assert_eq!(board.box_owner(1, 1), Ok(None));
        assert_eq!(
            board.box_owner(2, 0),
            Err(BoardError::BoxOutOfBounds { x: 2, y: 0 })
        );
    }

    #[test]
    fn test_display_renders_claims() {
        let mut board = Board::new(1, 1).unwrap();
        board.set_line(Direction::Horizontal, 0, 0, Player::First).unwrap();
        board.set_line(Direction::Horizontal, 0, 1, Player::First).unwrap();
        board.set_line(Direction::Vertical, 0, 0, Player::First).unwrap();
        board.set_line(Direction::Vertical, 1, 0, Player::First).unwrap();
        board.set_box_owner(0, 0, Player::First).unwrap();
        assert_eq!(board.display(), "+---+\n| 1 |\n+---+");
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Board::new(usize::MAX, 1),
            Err(BoardError::TooLarge {
                size_x: usize::MAX,
                size_y: 1
            })
        );
        assert!(matches!(
            Board::new(1, usize::MAX),
            Err(BoardError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_line_cap_enforced() {
        // 4097 * 4096 * 2 lines is past the cap without overflowing
        assert!(matches!(
            Board::new(4096, 4096),
            Err(BoardError::TooLarge { .. })
        ));
        assert!(Board::new(1024, 1024).is_ok());
    }

    #[test]
    fn test_deserialize_rejects_mismatched_vectors() {
        let json = r#"{"size_x":2,"size_y":2,"horizontal":[],"vertical":[],"boxes":[]}"#;
        let err = serde_json::from_str::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("does not match a 2x2 board"));
    }

    #[test]
    fn test_deserialize_rejects_zero_size() {
        let json = r#"{"size_x":0,"size_y":1,"horizontal":[],"vertical":[null],"boxes":[]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_deserialize_accepts_serialized_board() {
        let mut board = Board::new(2, 1).unwrap();
        board.set_line(Direction::Vertical, 2, 0, Player::Second).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }
}
