//! Core game logic: state, movement, collisions, food, speed ramp.
//!
//! Everything here is free of I/O and rendering so the simulation can be
//! exercised directly in tests.

pub mod config;
pub mod direction;
pub mod sim;
pub mod state;

pub use config::GameConfig;
pub use direction::Direction;
pub use sim::{Simulator, TickOutcome, SPEED_FLOOR_MS};
pub use state::{CollisionType, GameState, Position};
