//! term_snake - Snake in the terminal
//!
//! This library provides:
//! - Core game logic (game module): a deterministic state engine, no I/O
//! - Keyboard and mouse-swipe input mapping (input module)
//! - TUI rendering with ratatui (render module)
//! - Sound effects behind a toggle (audio module)
//! - Persistent high score and preferences (storage module)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
