use std::time::{Duration, Instant};

use crate::game::TerminalReason;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub reason: TerminalReason,
    pub final_length: usize,
    pub score: u32,
}

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub games_played: u32,
    pub last_game: Option<GameSummary>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 0,
            games_played: 0,
            last_game: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, summary: GameSummary) {
        self.games_played += 1;
        if summary.final_length > self.best_length {
            self.best_length = summary.final_length;
        }
        self.last_game = Some(summary);
        self.on_game_start();
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
