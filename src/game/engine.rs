use super::{
    config::{ConfigError, GameConfig},
    directive::{CellRole, RenderDirective, full_redraw},
    food::place_food,
    snake::Snake,
    state::{GameState, Grid, TerminalReason},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No heading chosen yet; nothing moved
    Idle,
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto the food and new food was placed
    AteFood,
    /// The game ended and the state has already been reset
    Terminal {
        reason: TerminalReason,
        /// Length of the snake in the game that just ended
        final_length: usize,
        /// Food eaten in the game that just ended
        score: u32,
    },
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    /// Cells the renderer has to repaint, in order
    pub directives: Vec<RenderDirective>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            outcome: TickOutcome::Idle,
            directives: Vec::new(),
        }
    }

    /// Whether the game ended during this step
    pub fn terminated(&self) -> bool {
        matches!(self.outcome, TickOutcome::Terminal { .. })
    }

    pub fn ate_food(&self) -> bool {
        matches!(self.outcome, TickOutcome::AteFood)
    }

    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        match self.outcome {
            TickOutcome::Terminal { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible from `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap in a new configuration and start a fresh game under it
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<GameState, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self.reset())
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let grid = Grid::new(self.config.cols, self.config.rows);
        let center = grid.center();
        let snake = Snake::create_at(grid, center);

        // A validated grid has at least two cells, so a one-segment snake
        // always leaves room for food.
        let food = place_food(&snake, &mut self.rng).unwrap_or(center);

        GameState::new(snake, food, self.config.initial_snake_length)
    }

    /// Directives that paint `state` onto an empty board
    pub fn redraw(&self, state: &GameState) -> Vec<RenderDirective> {
        full_redraw(state)
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        state.heading = state.moves.next_heading(state.heading);
        let Some(direction) = state.heading else {
            return StepResult::idle();
        };
        state.steps += 1;

        let len_before = state.snake.len();
        let old_head = state.snake.head();
        let next = old_head.moved_in_direction(direction);

        if !state.grid.contains(next) {
            return self.finish(state, TerminalReason::WallCollision, len_before);
        }

        // The eating tick keeps its tail, so it counts towards the bonus
        let ate_food = next == state.food;
        if ate_food {
            state.grow_len += self.config.food_bonus;
        }
        let growing = state.is_growing();

        // Free the tail before the collision test so the head may follow it
        let mut vacated = None;
        let mut release_after_move = false;
        if !growing {
            if len_before > 1 {
                vacated = state.snake.truncate_tail();
            } else {
                release_after_move = true;
            }
        }

        if state.snake.occupies(next) {
            return self.finish(state, TerminalReason::SelfCollision, len_before);
        }

        let final_len = if growing { len_before + 1 } else { len_before };
        if final_len == state.grid.cell_count() {
            return self.finish(state, TerminalReason::BoardFilled, final_len);
        }

        state.snake.extend_head(direction);
        if release_after_move {
            vacated = state.snake.truncate_tail();
        }

        let mut directives = Vec::with_capacity(4);
        if let Some(tail) = vacated {
            directives.push(RenderDirective::draw(tail, CellRole::Blank));
        }
        if state.snake.occupies(old_head) {
            directives.push(RenderDirective::draw(old_head, CellRole::Body));
        }
        directives.push(RenderDirective::draw(next, CellRole::Head));

        if !ate_food {
            return StepResult {
                outcome: TickOutcome::Moved,
                directives,
            };
        }

        state.score += 1;
        match place_food(&state.snake, &mut self.rng) {
            Some(food) => {
                state.food = food;
                directives.push(RenderDirective::draw(food, CellRole::Food));
                debug!(
                    score = state.score,
                    length = state.snake.len(),
                    grow_len = state.grow_len,
                    food_x = food.x,
                    food_y = food.y,
                    "food eaten"
                );
                StepResult {
                    outcome: TickOutcome::AteFood,
                    directives,
                }
            }
            None => {
                let length = state.snake.len();
                self.finish(state, TerminalReason::BoardFilled, length)
            }
        }
    }

    /// End the current game and start the next one in place
    fn finish(
        &mut self,
        state: &mut GameState,
        reason: TerminalReason,
        final_length: usize,
    ) -> StepResult {
        let score = state.score;
        debug!(
            ?reason,
            final_length,
            score,
            steps = state.steps,
            "game over"
        );

        *state = self.reset();
        StepResult {
            outcome: TickOutcome::Terminal {
                reason,
                final_length,
                score,
            },
            directives: full_redraw(state),
        }
    }
}
