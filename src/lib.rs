//! Retro Snake - a classic grid snake for the terminal
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, growth, speed scaling
//! - Sound cues raised by the game (audio module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The interactive terminal loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
