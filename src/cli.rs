//! Command-line interface of the game binary.

use std::{fs::File, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use env_logger::{Env, Target};

use crate::config::{GameParams, MazeParams};

/// A maze game for the terminal: reach the red exit to score and get a fresh maze.
#[derive(Debug, Parser)]
#[command(name = "mazecrawl", version)]
pub struct Cli {
    /// Number of maze rows, border included.
    #[arg(long, default_value_t = 14)]
    pub rows: usize,
    /// Number of maze columns, border included.
    #[arg(long, default_value_t = 14)]
    pub cols: usize,
    /// Side length of a maze tile in world units.
    #[arg(long, default_value_t = 30.0)]
    pub tile_size: f32,
    /// Width of the world viewport the maze is centered in.
    #[arg(long, default_value_t = 800.0)]
    pub viewport_width: f32,
    /// Height of the world viewport the maze is centered in.
    #[arg(long, default_value_t = 600.0)]
    pub viewport_height: f32,
    /// Side length of the player box in world units.
    #[arg(long, default_value_t = 20.0)]
    pub player_size: f32,
    /// Distance covered by one key press in world units.
    #[arg(long, default_value_t = 5.0)]
    pub speed: f32,
    /// Seed for the maze generator; every run differs when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write logs to; logging is off when omitted. Filtered by `RUST_LOG`.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Returns the maze parameters selected on the command line.
    #[must_use]
    pub const fn maze_params(&self) -> MazeParams {
        MazeParams {
            rows: self.rows,
            cols: self.cols,
            tile_size: self.tile_size,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }

    /// Returns the gameplay parameters selected on the command line.
    #[must_use]
    pub fn game_params(&self) -> GameParams {
        GameParams {
            player_size: self.player_size,
            player_speed: self.speed,
            ..GameParams::default()
        }
    }

    /// Installs the file logger if a log file was requested.
    ///
    /// The terminal belongs to the interface while the game runs, so logs never go to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created or a logger is already installed.
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)?;
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .try_init()?;

        Ok(())
    }
}
