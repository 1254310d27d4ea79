use super::action::Direction;
use super::queue::MoveQueue;
use super::snake::Snake;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when the two positions share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Fixed board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && (pos.x as usize) < self.cols && pos.y >= 0 && (pos.y as usize) < self.rows
    }

    /// Flat cell index (`y * cols + x`), `None` when out of bounds
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.cols + pos.x as usize)
    }

    pub fn position_at(&self, index: usize) -> Position {
        Position::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn center(&self) -> Position {
        Position::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// Snake hit a wall
    WallCollision,
    /// Snake hit itself
    SelfCollision,
    /// Snake covers every cell of the grid
    BoardFilled,
}

impl TerminalReason {
    pub fn is_win(&self) -> bool {
        matches!(self, TerminalReason::BoardFilled)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TerminalReason::WallCollision => "hit a wall",
            TerminalReason::SelfCollision => "bit itself",
            TerminalReason::BoardFilled => "filled the board",
        }
    }
}

/// Observable phase of a game between ticks
///
/// Terminal outcomes reset the state inside the same step, so a state is
/// only ever observed idle or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    pub(crate) heading: Option<Direction>,
    pub(crate) moves: MoveQueue,
    pub(crate) food: Position,
    pub(crate) grow_len: usize,
    pub(crate) score: u32,
    pub(crate) steps: u32,
}

impl GameState {
    /// Create a motionless game state around an existing snake
    ///
    /// `grow_len` is the length the snake keeps growing towards before
    /// tail truncation starts; it is never below the current length.
    pub fn new(snake: Snake, food: Position, grow_len: usize) -> Self {
        let grow_len = grow_len.max(snake.len());
        Self {
            grid: snake.grid(),
            snake,
            heading: None,
            moves: MoveQueue::new(),
            food,
            grow_len,
            score: 0,
            steps: 0,
        }
    }

    /// Start already moving in `direction`, as if it had been adopted on an earlier tick
    pub fn with_heading(mut self, direction: Direction) -> Self {
        self.heading = Some(direction);
        self.moves.clear_with_last(Some(direction));
        self
    }

    /// Queue a direction change for the next tick.
    ///
    /// Returns false when the request exactly reverses the most recently
    /// queued direction (or the active one when nothing is queued).
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        self.moves.enqueue(direction)
    }

    /// Move the food to `pos` if that cell is on the grid and free
    pub fn relocate_food(&mut self, pos: Position) -> bool {
        if !self.grid.contains(pos) || self.snake.occupies(pos) {
            return false;
        }
        self.food = pos;
        true
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn pending_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Current segment count
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Target length before tail truncation resumes
    pub fn grow_len(&self) -> usize {
        self.grow_len
    }

    pub fn is_growing(&self) -> bool {
        self.snake.len() < self.grow_len
    }

    /// Food items eaten since the last reset
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Moving ticks since the last reset
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn phase(&self) -> Phase {
        match self.heading {
            None => Phase::Idle,
            Some(_) => Phase::Running,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_adjacency() {
        let pos = Position::new(2, 2);
        assert!(pos.is_adjacent(Position::new(3, 2)));
        assert!(pos.is_adjacent(Position::new(2, 1)));
        assert!(!pos.is_adjacent(Position::new(3, 3)));
        assert!(!pos.is_adjacent(pos));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 15);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 14)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 15)));
        assert!(!grid.contains(Position::new(0, -1)));
    }

    #[test]
    fn test_grid_indexing() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.index_of(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index_of(Position::new(3, 2)), Some(11));
        assert_eq!(grid.index_of(Position::new(4, 0)), None);

        for index in 0..grid.cell_count() {
            assert_eq!(grid.index_of(grid.position_at(index)), Some(index));
        }
        assert_eq!(grid.center(), Position::new(2, 1));
    }

    #[test]
    fn test_new_state_is_idle() {
        let snake = Snake::create_at(Grid::new(10, 10), Position::new(5, 5));
        let state = GameState::new(snake, Position::new(1, 1), 3);

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.len(), 1);
        assert_eq!(state.grow_len(), 3);
        assert!(state.is_growing());
        assert!(state.is_occupied_by_snake(Position::new(5, 5)));
        assert!(!state.is_occupied_by_snake(Position::new(1, 1)));
    }

    #[test]
    fn test_relocate_food() {
        let snake = Snake::create_at(Grid::new(10, 10), Position::new(5, 5));
        let mut state = GameState::new(snake, Position::new(1, 1), 1);

        assert!(state.relocate_food(Position::new(9, 9)));
        assert_eq!(state.food(), Position::new(9, 9));
        assert!(!state.relocate_food(Position::new(5, 5)));
        assert!(!state.relocate_food(Position::new(10, 0)));
        assert_eq!(state.food(), Position::new(9, 9));
    }

    #[test]
    fn test_grow_len_never_below_length() {
        let grid = Grid::new(10, 10);
        let snake = Snake::from_segments(
            grid,
            &[Position::new(2, 2), Position::new(1, 2), Position::new(0, 2)],
        )
        .unwrap();
        let state = GameState::new(snake, Position::new(5, 5), 1);

        assert_eq!(state.grow_len(), 3);
        assert!(!state.is_growing());
    }

    #[test]
    fn test_with_heading_blocks_reversal() {
        let snake = Snake::create_at(Grid::new(10, 10), Position::new(5, 5));
        let mut state = GameState::new(snake, Position::new(1, 1), 1).with_heading(Direction::Right);

        assert_eq!(state.phase(), Phase::Running);
        assert!(!state.enqueue_direction(Direction::Left));
        assert!(state.enqueue_direction(Direction::Up));
        assert_eq!(state.pending_moves(), 1);
    }
}
