//! segsnake - a grid snake whose body is a bounded log of turns
//!
//! The body is never stored cell by cell. The engine tracks two endpoints
//! (a drawing head and an erasing tail) plus a fixed-capacity circular log
//! of direction changes, and derives collision geometry, tail routing, and
//! render cells from that log.
//!
//! This library provides:
//! - Core movement and collision logic (game module), I/O-free
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Persistent high scores (score module) and session metrics (metrics)
//! - The interactive driver (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
