use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{Difficulty, GameConfig};
use grid_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Speed preset
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Tick interval in milliseconds (50-150), overrides --difficulty
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Segments gained per food item
    #[arg(long)]
    food_bonus: Option<usize>,

    /// Length the snake unfolds to after spawning
    #[arg(long)]
    initial_length: Option<usize>,

    /// Speed up a little every time food is eaten
    #[arg(long)]
    rush: bool,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Slow,
    Normal,
    Fast,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Slow => Difficulty::Slow,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Fast => Difficulty::Fast,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty.into());
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(food_bonus) = self.food_bonus {
            config.food_bonus = food_bonus;
        }
        if let Some(initial_length) = self.initial_length {
            config.initial_snake_length = initial_length;
        }
        config.rush |= self.rush;

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The TUI owns the terminal, so logs only go to a file when one is given
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
