//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Each call to [`GameEngine::step`] advances the simulation by one tick and
//! reports the outcome together with the cells the renderer has to repaint.

pub mod action;
pub mod config;
pub mod directive;
pub mod engine;
pub mod food;
pub mod queue;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, Difficulty, GameConfig};
pub use directive::{CellRole, RenderDirective};
pub use engine::{GameEngine, StepResult, TickOutcome};
pub use food::place_food;
pub use queue::MoveQueue;
pub use snake::{Snake, SnakeError};
pub use state::{GameState, Grid, Phase, Position, TerminalReason};
