//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! All mutable game data lives in [`GameState`]; [`GameEngine`] advances it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod level;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use level::Level;
pub use state::{CollisionType, GameOverReason, GameState, Phase, Position, Snake};
