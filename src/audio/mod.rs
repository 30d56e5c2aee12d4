//! Fire-and-forget sound signals raised by the game

use anyhow::{Context, Result};
use std::io::Write;

/// A sound the front end may play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Food was eaten
    Eat,
    /// The snake crashed into a wall or itself
    Wall,
}

/// Something that can play sound cues
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: SoundCue) -> Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell on crashes. Eating is silent.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        if cue == SoundCue::Wall {
            self.out
                .write_all(b"\x07")
                .and_then(|_| self.out.flush())
                .context("Failed to ring terminal bell")?;
        }
        Ok(())
    }
}
