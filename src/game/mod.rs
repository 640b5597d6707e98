//! Core game logic: movement, growth, and self-collision.
//!
//! The body is represented by its two endpoints plus a bounded log of
//! turns ([`TurnLog`]); collision geometry, tail routing, and rendering
//! cells are all derived from that log. No I/O happens here: the engine
//! consumes direction requests and emits draw/erase coordinates, and the
//! driver owns the clock.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod geometry;
pub mod state;
pub mod turn_log;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{MovementEngine, TickReport};
pub use geometry::{Position, Segment};
pub use state::{CollisionType, GamePhase, GameState};
pub use turn_log::TurnLog;
