//! Which boxes a line borders, and which lines bound a box.

use crate::board::Board;
use crate::types::{BoxCoord, Direction};
use tracing::instrument;

/// Returns the boxes bordered by a line (at most two).
///
/// A horizontal line at (x, y) borders the box above, (x, y - 1), when
/// y > 0 and the box below, (x, y), when y < size_y. A vertical line at
/// (x, y) borders (x - 1, y) when x > 0 and (x, y) when x < size_x.
#[instrument(skip(board))]
pub fn adjacent_boxes(board: &Board, direction: Direction, x: usize, y: usize) -> Vec<BoxCoord> {
    let mut boxes = Vec::with_capacity(2);
    match direction {
        Direction::Horizontal => {
            if y > 0 {
                boxes.push(BoxCoord::new(x, y - 1));
            }
            if y < board.size_y() {
                boxes.push(BoxCoord::new(x, y));
            }
        }
        Direction::Vertical => {
            if x > 0 {
                boxes.push(BoxCoord::new(x - 1, y));
            }
            if x < board.size_x() {
                boxes.push(BoxCoord::new(x, y));
            }
        }
    }
    boxes
}

/// The four lines bounding a box: top, bottom, left, right.
pub fn bounding_lines(coord: BoxCoord) -> [(Direction, usize, usize); 4] {
    let BoxCoord { x, y } = coord;
    [
        (Direction::Horizontal, x, y),
        (Direction::Horizontal, x, y + 1),
        (Direction::Vertical, x, y),
        (Direction::Vertical, x + 1, y),
    ]
}
