use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Highest frame rate the interactive loop accepts
pub const MAX_TARGET_FPS: u32 = 1000;

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square board
    pub cell_count: i32,
    /// Pixel size of one cell in the windowed layout
    pub cell_size: u32,
    /// Pixel margin around the board in the windowed layout
    pub margin: u32,
    /// Where the snake's head spawns, facing right
    pub spawn_head: Position,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed scaling
    /// Seconds between ticks at the start of every run
    pub base_interval: f64,
    /// Multiplier applied to the interval on each speed-up
    pub speed_factor: f64,
    /// Speed up every time the score reaches a multiple of this
    pub speed_up_every: u32,
    /// Upper clamp applied to the shrunk interval.
    ///
    /// The stock value (16.67) reads like a frame time in milliseconds but
    /// is compared against seconds, so it never binds.
    pub interval_cap: f64,

    /// Render frames per second of the interactive loop
    pub target_fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_count: 25,
            cell_size: 30,
            margin: 75,
            spawn_head: Position::new(6, 9),
            initial_snake_length: 3,
            base_interval: 0.2,
            speed_factor: 0.8,
            speed_up_every: 5,
            interval_cap: 16.67,
            target_fps: 60,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(cell_count: i32) -> Self {
        Self {
            cell_count,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Side length in pixels of the windowed layout, margins included.
    /// `None` when it does not fit in a `u32`.
    pub fn window_size(&self) -> Option<u32> {
        let board = self.cell_size.checked_mul(u32::try_from(self.cell_count).ok()?)?;
        self.margin.checked_mul(2)?.checked_add(board)
    }

    /// Time between rendered frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    /// Check that the board can hold the spawned snake and that the
    /// speed settings make sense
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_count < 2 {
            return Err(format!(
                "cell_count must be at least 2, got {}",
                self.cell_count
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let tail_x = self.spawn_head.x - (self.initial_snake_length as i32 - 1);
        let on_board = |v: i32| (0..self.cell_count).contains(&v);
        if !on_board(self.spawn_head.x) || !on_board(self.spawn_head.y) || !on_board(tail_x) {
            return Err(format!(
                "snake spawned at ({}, {}) with length {} does not fit a {}x{} board",
                self.spawn_head.x,
                self.spawn_head.y,
                self.initial_snake_length,
                self.cell_count,
                self.cell_count
            ));
        }

        if (self.initial_snake_length as i64) >= (self.cell_count as i64).pow(2) {
            return Err("snake leaves no free cell for food".to_string());
        }

        if self.base_interval.is_nan() || self.base_interval <= 0.0 {
            return Err(format!(
                "base_interval must be positive, got {}",
                self.base_interval
            ));
        }

        if self.speed_factor <= 0.0 || !(0.0..=1.0).contains(&self.speed_factor) {
            return Err(format!(
                "speed_factor must be in (0, 1], got {}",
                self.speed_factor
            ));
        }

        if self.speed_up_every == 0 {
            return Err("speed_up_every must be at least 1".to_string());
        }

        if self.interval_cap.is_nan() || self.interval_cap <= 0.0 {
            return Err(format!(
                "interval_cap must be positive, got {}",
                self.interval_cap
            ));
        }

        if self.window_size().is_none() {
            return Err(format!(
                "window of {} cells of {}px with a {}px margin is too large",
                self.cell_count, self.cell_size, self.margin
            ));
        }

        if !(1..=MAX_TARGET_FPS).contains(&self.target_fps) {
            return Err(format!(
                "target_fps must be in [1, {}], got {}",
                MAX_TARGET_FPS, self.target_fps
            ));
        }

        Ok(())
    }
}
