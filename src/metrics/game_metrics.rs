use std::time::{Duration, Instant};

use crate::game::StepInfo;

/// Per-session statistics shown next to the board
pub struct GameMetrics {
    pub run_started: Instant,
    pub run_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Run clock is stopped while waiting for a restart
    pub paused: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            run_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            paused: false,
        }
    }

    pub fn update(&mut self) {
        if !self.paused {
            self.run_time = self.run_started.elapsed();
        }
    }

    pub fn record(&mut self, step: &StepInfo) {
        if let Some(over) = step.game_over {
            self.games_played += 1;
            self.high_score = self.high_score.max(over.final_score);
            self.paused = true;
        }
    }

    /// A new run began after a game over
    pub fn on_resume(&mut self) {
        if self.paused {
            self.run_started = Instant::now();
            self.run_time = Duration::ZERO;
            self.paused = false;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.run_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
