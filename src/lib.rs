//! Classic snake in the terminal.
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, food, speed ramp
//! - The interactive game loop (app module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - High-score persistence (score module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
