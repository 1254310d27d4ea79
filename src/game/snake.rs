//! The snake body and its occupancy grid.
//!
//! Segments live in a `VecDeque` ordered head-to-tail, so growing at the
//! head and dropping the tail are both O(1). A flat `Vec<bool>` with one
//! slot per grid cell mirrors the segments for O(1) collision tests.

use std::collections::VecDeque;

use thiserror::Error;

use super::action::Direction;
use super::state::{Grid, Position};

/// Reasons an explicit segment list cannot form a snake
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    #[error("a snake needs at least one segment")]
    Empty,
    #[error("segment {index} at ({x}, {y}) is outside the grid")]
    OutOfBounds { index: usize, x: i32, y: i32 },
    #[error("segment {index} at ({x}, {y}) overlaps an earlier segment")]
    Overlap { index: usize, x: i32, y: i32 },
    #[error("segment {index} is not adjacent to the segment before it")]
    Disconnected { index: usize },
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    /// Body segments, head at the front
    body: VecDeque<Position>,
    occupied: Vec<bool>,
}

impl Snake {
    /// Create a single-segment snake at `position`.
    ///
    /// The caller must pass a cell on `grid`; staged snakes from untrusted
    /// coordinates go through [`Snake::from_segments`] instead.
    pub fn create_at(grid: Grid, position: Position) -> Self {
        let mut occupied = vec![false; grid.cell_count()];
        if let Some(index) = grid.index_of(position) {
            occupied[index] = true;
        }
        debug_assert!(grid.contains(position), "snake spawned off the grid");

        Self {
            grid,
            body: VecDeque::from([position]),
            occupied,
        }
    }

    /// Build a snake from an explicit head-to-tail path
    pub fn from_segments(grid: Grid, segments: &[Position]) -> Result<Self, SnakeError> {
        let mut occupied = vec![false; grid.cell_count()];
        let mut body = VecDeque::with_capacity(segments.len());

        for (index, &pos) in segments.iter().enumerate() {
            let cell = grid.index_of(pos).ok_or(SnakeError::OutOfBounds {
                index,
                x: pos.x,
                y: pos.y,
            })?;
            if occupied[cell] {
                return Err(SnakeError::Overlap {
                    index,
                    x: pos.x,
                    y: pos.y,
                });
            }
            if let Some(prev) = body.back() {
                if !pos.is_adjacent(*prev) {
                    return Err(SnakeError::Disconnected { index });
                }
            }
            occupied[cell] = true;
            body.push_back(pos);
        }

        if body.is_empty() {
            return Err(SnakeError::Empty);
        }

        Ok(Self {
            grid,
            body,
            occupied,
        })
    }

    /// Append a new head one step in `direction` and return its position.
    ///
    /// The caller must have checked that the new cell is on the grid and
    /// not occupied.
    pub fn extend_head(&mut self, direction: Direction) -> Position {
        let new_head = self.head().moved_in_direction(direction);
        debug_assert!(!self.occupies(new_head), "head extended into the body");

        if let Some(index) = self.grid.index_of(new_head) {
            self.occupied[index] = true;
        }
        self.body.push_front(new_head);
        new_head
    }

    /// Remove the tail segment and return the vacated cell.
    ///
    /// A single-segment snake has no separate tail; it is left as is and
    /// `None` is returned.
    pub fn truncate_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }

        let tail = self.body.pop_back()?;
        if let Some(index) = self.grid.index_of(tail) {
            self.occupied[index] = false;
        }
        Some(tail)
    }

    /// O(1) membership test; cells off the grid are never occupied
    pub fn occupies(&self, pos: Position) -> bool {
        self.grid
            .index_of(pos)
            .map(|index| self.occupied[index])
            .unwrap_or(false)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of cells marked in the occupancy grid
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&cell| cell).count()
    }

    /// True when the grid has no free cell left
    pub fn fills_grid(&self) -> bool {
        self.len() == self.grid.cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10, 10)
    }

    fn assert_consistent(snake: &Snake) {
        assert_eq!(snake.occupied_count(), snake.len());
        for pos in snake.segments() {
            assert!(snake.occupies(pos));
        }
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::create_at(grid(), Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));
        assert!(snake.occupies(Position::new(5, 5)));
        assert_eq!(snake.occupied_count(), 1);
    }

    #[test]
    fn test_extend_and_truncate() {
        let mut snake = Snake::create_at(grid(), Position::new(5, 5));

        assert_eq!(snake.extend_head(Direction::Right), Position::new(6, 5));
        assert_eq!(snake.extend_head(Direction::Down), Position::new(6, 6));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 6));
        assert_eq!(snake.tail(), Position::new(5, 5));
        assert_consistent(&snake);

        assert_eq!(snake.truncate_tail(), Some(Position::new(5, 5)));
        assert!(!snake.occupies(Position::new(5, 5)));
        assert_eq!(snake.tail(), Position::new(6, 5));
        assert_consistent(&snake);
    }

    #[test]
    fn test_truncate_single_segment_is_noop() {
        let mut snake = Snake::create_at(grid(), Position::new(0, 0));
        assert_eq!(snake.truncate_tail(), None);
        assert_eq!(snake.len(), 1);
        assert!(snake.occupies(Position::new(0, 0)));
    }

    #[test]
    fn test_occupies_off_grid() {
        let snake = Snake::create_at(grid(), Position::new(0, 0));
        assert!(!snake.occupies(Position::new(-1, 0)));
        assert!(!snake.occupies(Position::new(10, 0)));
    }

    #[test]
    fn test_segments_order() {
        let segments = [Position::new(2, 2), Position::new(1, 2), Position::new(0, 2)];
        let snake = Snake::from_segments(grid(), &segments).unwrap();

        assert_eq!(snake.segments().collect::<Vec<_>>(), segments.to_vec());
        assert_eq!(snake.head(), Position::new(2, 2));
        assert_eq!(snake.tail(), Position::new(0, 2));
        assert_consistent(&snake);
    }

    #[test]
    fn test_from_segments_validation() {
        assert_eq!(Snake::from_segments(grid(), &[]), Err(SnakeError::Empty));
        assert_eq!(
            Snake::from_segments(grid(), &[Position::new(0, 0), Position::new(-1, 0)]),
            Err(SnakeError::OutOfBounds { index: 1, x: -1, y: 0 })
        );
        assert_eq!(
            Snake::from_segments(
                grid(),
                &[Position::new(0, 0), Position::new(1, 0), Position::new(0, 0)]
            ),
            Err(SnakeError::Overlap { index: 2, x: 0, y: 0 })
        );
        assert_eq!(
            Snake::from_segments(grid(), &[Position::new(0, 0), Position::new(2, 0)]),
            Err(SnakeError::Disconnected { index: 1 })
        );
    }

    #[test]
    fn test_fills_grid() {
        let tiny = Grid::new(2, 1);
        let mut snake = Snake::create_at(tiny, Position::new(0, 0));
        assert!(!snake.fills_grid());
        snake.extend_head(Direction::Right);
        assert!(snake.fills_grid());
    }

    #[test]
    fn test_create_at_corners_marks_occupancy() {
        let grid = grid();
        let corners = [
            Position::new(0, 0),
            Position::new(grid.cols as i32 - 1, 0),
            Position::new(0, grid.rows as i32 - 1),
            Position::new(grid.cols as i32 - 1, grid.rows as i32 - 1),
        ];
        for corner in corners {
            let snake = Snake::create_at(grid, corner);
            assert_eq!(snake.occupied_count(), snake.len());
            assert_eq!(Snake::from_segments(grid, &[corner]), Ok(snake));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "snake spawned off the grid")]
    fn test_create_at_off_grid_panics_in_debug() {
        Snake::create_at(grid(), Position::new(-1, 0));
    }
}
