//! Grid Snake - a terminal Snake game built around a deterministic tick engine
//!
//! This library provides:
//! - Core game logic (game module): snake model, move queue, food placement,
//!   and the per-tick state machine emitting render directives
//! - Keyboard mapping (input module)
//! - TUI rendering driven by render directives (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
