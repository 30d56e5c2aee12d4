//! Core game logic module for Snake
//!
//! Movement, collisions, growth, speed scaling and reset, without any I/O
//! or rendering dependencies.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MAX_TARGET_FPS};
pub use engine::{GameEngine, GameOver, StepInfo};
pub use food::Food;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
pub use timer::TickTimer;
