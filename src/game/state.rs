use std::collections::HashSet;

use super::config::GameConfig;
use super::direction::Direction;
use super::geometry::Position;
use super::turn_log::TurnLog;

/// Lifecycle of a single game. `GameOver` is terminal: the driver discards
/// the state and asks the engine for a fresh one to play again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head or tail left the board
    Wall,
    /// Head landed on the body
    SelfCollision,
}

/// One tracked end of the body: the head that draws, or the tail that
/// erases. Between them the body is implied by the turn log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointTracker {
    pub position: Position,
    pub direction: Direction,
}

/// Complete state of one game.
///
/// There is no per-cell body store. The occupied path is exactly: the live
/// segments in `turn_log` (the front one re-anchored to the tail), plus the
/// in-progress stretch from `span_start` (or the tail, when the log is
/// empty) to the head.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub head: EndpointTracker,
    pub tail: EndpointTracker,
    /// Body length the snake is growing toward; raised on apple pickup
    pub target_length: i32,
    /// Ticks the head has advanced while the tail stayed parked. The tail
    /// starts following once this reaches `target_length`.
    pub growth_counter: i32,
    /// Start of the stretch currently being extended at the head
    pub span_start: Position,
    pub turn_log: TurnLog,
    pub apple: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub ticks: u32,
    /// Inter-tick delay the driver should honor, in milliseconds
    pub tick_delay_ms: u64,
}

impl GameState {
    /// Fresh running game with head and tail stacked at `start`.
    pub fn new(
        start: Position,
        direction: Direction,
        apple: Position,
        config: &GameConfig,
    ) -> Self {
        Self {
            phase: GamePhase::Running,
            head: EndpointTracker {
                position: start,
                direction,
            },
            tail: EndpointTracker {
                position: start,
                direction,
            },
            target_length: config.initial_length,
            growth_counter: 0,
            span_start: start,
            turn_log: TurnLog::new(config.max_segments),
            apple,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            score: 0,
            ticks: 0,
            tick_delay_ms: config.initial_delay_ms,
        }
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Every cell the body currently occupies, reconstructed from the turn
    /// log. Used for rendering; collision testing never materializes this.
    pub fn body_cells(&self) -> HashSet<Position> {
        let mut cells = HashSet::new();
        for segment in self.turn_log.iter() {
            fill_span(segment.span_start, segment.turn_point, &mut cells);
        }
        let stretch_start = if self.turn_log.is_empty() {
            self.tail.position
        } else {
            self.span_start
        };
        fill_span(stretch_start, self.head.position, &mut cells);
        cells
    }
}

/// Insert every cell of an axis-aligned span, endpoints included.
fn fill_span(a: Position, b: Position, cells: &mut HashSet<Position>) {
    if a.x == b.x {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            cells.insert(Position::new(a.x, y));
        }
    } else {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            cells.insert(Position::new(x, a.y));
        }
    }
}
