//! Interactive play in the terminal.
//!
//! One task owns the game: key events, simulation ticks, frame rendering and
//! Ctrl+C are branches of a single `tokio::select!`, so the move queue is
//! never touched by two handlers at once.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::{debug, info, trace};

use crate::game::{
    Difficulty, GameConfig, GameEngine, GameState, TickOutcome, config::MIN_TICK_INTERVAL_MS,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, GameSummary};
use crate::render::{BoardView, Renderer, StatusLine};

/// Milliseconds shaved off the tick interval per food item in rush mode
const RUSH_STEP_MS: u64 = 5;

/// Tick interval bookkeeping for rush mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RushSchedule {
    base_ms: u64,
    current_ms: u64,
}

impl RushSchedule {
    pub fn new(base_ms: u64) -> Self {
        Self {
            base_ms,
            current_ms: base_ms,
        }
    }

    pub fn current(&self) -> Duration {
        Duration::from_millis(self.current_ms)
    }

    pub fn current_ms(&self) -> u64 {
        self.current_ms
    }

    /// Speed up after a meal; returns the new interval if it changed
    pub fn on_food(&mut self) -> Option<Duration> {
        let next = self
            .current_ms
            .saturating_sub(RUSH_STEP_MS)
            .max(MIN_TICK_INTERVAL_MS);
        self.set(next)
    }

    /// Back to the configured interval; returns it if it changed
    pub fn reset(&mut self) -> Option<Duration> {
        self.set(self.base_ms)
    }

    fn set(&mut self, ms: u64) -> Option<Duration> {
        if ms == self.current_ms {
            return None;
        }
        self.current_ms = ms;
        Some(self.current())
    }
}

/// Replace the tick timer; the first tick of the new one is a full period away
fn reschedule(timer: &mut Interval, period: Duration) {
    *timer = interval_at(Instant::now() + period, period);
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    board: BoardView,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    schedule: RushSchedule,
    paused: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        }
        .context("Invalid game configuration")?;

        let state = engine.reset();
        let mut board = BoardView::new(state.grid());
        board.apply_all(&engine.redraw(&state));
        let schedule = RushSchedule::new(engine.config().tick_interval_ms);

        Ok(Self {
            engine,
            state,
            board,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            schedule,
            paused: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let config = self.engine.config();
        info!(
            cols = config.cols,
            rows = config.rows,
            tick_ms = config.tick_interval_ms,
            food_bonus = config.food_bonus,
            rush = config.rush,
            "starting game session"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            best_length = self.metrics.best_length,
            "game session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.schedule.current());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut tick_timer)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.on_tick(&mut tick_timer);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let status = self.status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board, &self.state, &self.metrics, status);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn status(&self) -> StatusLine {
        StatusLine {
            tick_interval_ms: self.schedule.current_ms(),
            paused: self.paused,
            rush: self.engine.config().rush,
        }
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            self.handle_key(key, tick_timer)?;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, tick_timer: &mut Interval) -> Result<()> {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if !self.state.enqueue_direction(direction) {
                    trace!(?direction, "reversal ignored");
                }
            }
            KeyAction::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            KeyAction::SetDifficulty(difficulty) => {
                self.change_difficulty(difficulty, tick_timer)?;
            }
            KeyAction::Restart => {
                self.reset_game(tick_timer);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    /// Timer ticks are dropped while paused; keys still reach the queue
    fn on_tick(&mut self, tick_timer: &mut Interval) {
        if self.paused {
            return;
        }
        self.update_game(tick_timer);
    }

    fn update_game(&mut self, tick_timer: &mut Interval) {
        let result = self.engine.step(&mut self.state);
        self.board.apply_all(&result.directives);

        match result.outcome {
            TickOutcome::AteFood if self.engine.config().rush => {
                if let Some(period) = self.schedule.on_food() {
                    debug!(tick_ms = self.schedule.current_ms(), "rush speed-up");
                    reschedule(tick_timer, period);
                }
            }
            TickOutcome::Terminal {
                reason,
                final_length,
                score,
            } => {
                info!(?reason, final_length, score, "game over");
                self.metrics.on_game_over(GameSummary {
                    reason,
                    final_length,
                    score,
                });
                if let Some(period) = self.schedule.reset() {
                    reschedule(tick_timer, period);
                }
            }
            _ => {}
        }
    }

    /// A new speed is a new configuration, so the game starts over
    fn change_difficulty(&mut self, difficulty: Difficulty, tick_timer: &mut Interval) -> Result<()> {
        let config = self.engine.config().clone().with_difficulty(difficulty);
        self.state = self
            .engine
            .reconfigure(config)
            .context("Failed to apply difficulty")?;
        self.schedule = RushSchedule::new(difficulty.tick_interval_ms());
        self.repaint();
        self.metrics.on_game_start();
        reschedule(tick_timer, self.schedule.current());
        info!(difficulty = difficulty.name(), "difficulty changed");
        Ok(())
    }

    fn reset_game(&mut self, tick_timer: &mut Interval) {
        self.state = self.engine.reset();
        self.repaint();
        self.metrics.on_game_start();
        if let Some(period) = self.schedule.reset() {
            reschedule(tick_timer, period);
        }
    }

    fn repaint(&mut self) {
        self.board = BoardView::new(self.state.grid());
        self.board.apply_all(&self.engine.redraw(&self.state));
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
