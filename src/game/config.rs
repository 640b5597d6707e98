use serde::{Deserialize, Serialize};

/// Configuration for the game.
///
/// The defaults mirror the 160x80 handheld board this game was written
/// for; `new` and the CLI override the dimensions for terminal play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells
    pub grid_width: usize,
    /// Height of the board in cells
    pub grid_height: usize,
    /// Body length at game start
    pub initial_length: i32,
    /// Cells added to the target length per apple
    pub growth_per_apple: i32,
    /// Inter-tick delay at game start, milliseconds
    pub initial_delay_ms: u64,
    /// Delay never drops below this, milliseconds
    pub min_delay_ms: u64,
    /// Per-axis slack for apple pickup (body collision is always exact)
    pub apple_tolerance: i32,
    /// Turn log capacity; turns beyond this many unretired corners are
    /// refused
    pub max_segments: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 160,
            grid_height: 80,
            initial_length: 10,
            growth_per_apple: 20,
            initial_delay_ms: 40,
            min_delay_ms: 5,
            apple_tolerance: 2,
            max_segments: 100,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
