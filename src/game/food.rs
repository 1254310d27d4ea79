use rand::Rng;
use rand::seq::SliceRandom;

use super::snake::Snake;
use super::state::Position;

/// Random draws tried before falling back to scanning for free cells
const MAX_REJECTIONS: usize = 64;

/// Pick a uniformly random cell not covered by the snake.
///
/// Rejection sampling handles the usual sparse board; a crowded board falls
/// back to choosing from the explicit list of free cells. Returns `None`
/// only when the snake fills the whole grid.
pub fn place_food<R: Rng>(snake: &Snake, rng: &mut R) -> Option<Position> {
    let grid = snake.grid();
    if snake.fills_grid() {
        return None;
    }

    for _ in 0..MAX_REJECTIONS {
        let x = rng.gen_range(0..grid.cols) as i32;
        let y = rng.gen_range(0..grid.rows) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..grid.cell_count())
        .map(|index| grid.position_at(index))
        .filter(|pos| !snake.occupies(*pos))
        .collect();
    tracing::trace!(
        free = free.len(),
        "food rejection sampling exhausted, drawing from free cells"
    );
    free.choose(rng).copied()
}
