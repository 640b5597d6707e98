use rand::Rng;

use super::{
    collision::head_hits_body,
    config::GameConfig,
    direction::Direction,
    geometry::{point_on_segment, within_tolerance, Position},
    state::{CollisionType, GamePhase, GameState},
};

/// What one tick did, for the driver and its renderer.
///
/// `drawn`/`erased` are the cell-level draw and erase events a renderer
/// needs: the head's new cell, and the cell the tail vacated. Nothing is
/// erased while the body is still filling in toward its target length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Head cell drawn this tick
    pub drawn: Option<Position>,
    /// Tail cell vacated this tick
    pub erased: Option<Position>,
    /// Whether the apple was picked up this tick
    pub ate_apple: bool,
    /// Set when this tick ended the game
    pub collision: Option<CollisionType>,
}

impl TickReport {
    fn empty() -> Self {
        Self {
            drawn: None,
            erased: None,
            ate_apple: false,
            collision: None,
        }
    }
}

/// The movement engine: advances the head, feeds and grows the body, routes
/// the tail through the turn log, and ends the game on collision.
///
/// The engine owns no per-game state; the driver holds a [`GameState`] and
/// passes it in. It calls [`tick`](Self::tick) at the cadence the state's
/// `tick_delay_ms` asks for and [`turn`](Self::turn) whenever input arrives.
pub struct MovementEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl MovementEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Fresh game: head and tail at the board center, apple placed off the
    /// body.
    pub fn reset(&mut self) -> GameState {
        let start = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let mut state = GameState::new(start, Direction::Right, start, &self.config);
        state.apple = self.respawn_apple(&state);
        state
    }

    /// Advance the game by one discrete step.
    ///
    /// Order matters and is load-bearing: head advance, apple pickup,
    /// self-collision, growth/tail advance, bounds. A collision ends the
    /// game immediately with no further mutation that tick.
    pub fn tick(&mut self, state: &mut GameState) -> TickReport {
        if state.phase != GamePhase::Running {
            return TickReport::empty();
        }

        state.head.position = state.head.position.moved_in_direction(state.head.direction);
        state.ticks += 1;

        let ate_apple = within_tolerance(
            state.apple.x,
            state.head.position.x,
            self.config.apple_tolerance,
        ) && within_tolerance(
            state.apple.y,
            state.head.position.y,
            self.config.apple_tolerance,
        );
        if ate_apple {
            state.target_length += self.config.growth_per_apple;
            if state.tick_delay_ms > self.config.min_delay_ms {
                state.tick_delay_ms -= 1;
            }
            state.score += 1;
            state.apple = self.respawn_apple(state);
        }

        if head_hits_body(state.head.position, &state.turn_log) {
            state.phase = GamePhase::GameOver;
            return TickReport {
                drawn: None,
                erased: None,
                ate_apple,
                collision: Some(CollisionType::SelfCollision),
            };
        }

        let mut erased = None;
        if state.growth_counter < state.target_length {
            // body still filling in: the tail stays parked
            state.growth_counter += 1;
        } else {
            let vacated = state.tail.position;
            state.tail.position = state.tail.position.moved_in_direction(state.tail.direction);
            match state
                .turn_log
                .retire_if_tail_arrived(state.tail.position, state.head.direction)
            {
                Some(direction) => state.tail.direction = direction,
                None => state.turn_log.shrink_front_to(state.tail.position),
            }
            erased = Some(vacated);
        }

        if !state.is_in_bounds(state.head.position) || !state.is_in_bounds(state.tail.position) {
            state.phase = GamePhase::GameOver;
            return TickReport {
                drawn: None,
                erased: None,
                ate_apple,
                collision: Some(CollisionType::Wall),
            };
        }

        TickReport {
            drawn: Some(state.head.position),
            erased,
            ate_apple,
            collision: None,
        }
    }

    /// Request a direction change.
    ///
    /// Redundant requests (already travelling that way) and 180-degree
    /// reversals are silently ignored; they are normal input-debounce
    /// noise, not errors. A request is also refused when the turn log is at
    /// capacity, since losing the oldest segment would corrupt tail
    /// routing. Accepted while paused.
    pub fn turn(&self, state: &mut GameState, direction: Direction) {
        if state.phase == GamePhase::GameOver {
            return;
        }
        if direction == state.head.direction || state.head.direction.is_opposite(direction) {
            return;
        }
        if state.turn_log.is_full() {
            return;
        }

        // When the log is empty the whole body is one straight stretch, so
        // the retiring segment runs from the tail, not from the last
        // recorded turn.
        let span_start = if state.turn_log.is_empty() {
            state.tail.position
        } else {
            state.span_start
        };
        state
            .turn_log
            .record_turn(state.head.position, state.head.direction, span_start);
        state.span_start = state.head.position;
        state.head.direction = direction;
    }

    /// Suspend or resume tick effects. No-op once the game is over.
    pub fn toggle_pause(&self, state: &mut GameState) {
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Pick a random cell that is not on the body, by rejection sampling
    /// against the same containment test collision uses.
    fn respawn_apple(&mut self, state: &GameState) -> Position {
        loop {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);

            if !state.turn_log.iter().any(|seg| point_on_segment(pos, seg)) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Default-board game with the apple parked out of the way.
    fn start_state(engine: &mut MovementEngine) -> GameState {
        let mut state = engine.reset();
        state.apple = pos(5, 5);
        state
    }

    #[test]
    fn test_reset() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.head.position, pos(80, 40));
        assert_eq!(state.head.position, state.tail.position);
        assert!(state.turn_log.is_empty());
    }

    #[test]
    fn test_head_advances_one_cell_per_tick() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);

        let report = engine.tick(&mut state);
        assert_eq!(state.head.position, pos(81, 40));
        assert_eq!(report.drawn, Some(pos(81, 40)));
        assert_eq!(report.erased, None);
        assert_eq!(report.collision, None);
    }

    #[test]
    fn test_ten_straight_ticks_leave_tail_parked() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);

        for _ in 0..10 {
            engine.tick(&mut state);
        }

        assert_eq!(state.head.position, pos(90, 40));
        assert_eq!(state.tail.position, pos(80, 40));
        assert_eq!(state.growth_counter, 10);
        assert_eq!(state.turn_log.len(), 0);
    }

    #[test]
    fn test_turn_records_one_segment_from_tail() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);
        for _ in 0..10 {
            engine.tick(&mut state);
        }

        engine.turn(&mut state, Direction::Up);

        assert_eq!(state.turn_log.len(), 1);
        let seg = state.turn_log.front().unwrap();
        assert_eq!(seg.span_start, pos(80, 40));
        assert_eq!(seg.turn_point, pos(90, 40));
        assert_eq!(seg.direction, Direction::Right);
        assert_eq!(seg.length, 10);
        assert_eq!(state.head.direction, Direction::Up);
        assert_eq!(state.span_start, pos(90, 40));
    }

    #[test]
    fn test_redundant_and_reverse_turns_ignored() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);

        engine.turn(&mut state, Direction::Right);
        engine.turn(&mut state, Direction::Left);

        assert_eq!(state.head.direction, Direction::Right);
        assert!(state.turn_log.is_empty());
    }

    #[test]
    fn test_turn_refused_when_log_full() {
        let config = GameConfig {
            max_segments: 1,
            ..GameConfig::default()
        };
        let mut engine = MovementEngine::new(config);
        let mut state = start_state(&mut engine);

        engine.tick(&mut state);
        engine.turn(&mut state, Direction::Up);
        assert_eq!(state.head.direction, Direction::Up);
        assert!(state.turn_log.is_full());

        engine.tick(&mut state);
        engine.turn(&mut state, Direction::Left);
        assert_eq!(state.head.direction, Direction::Up);
        assert_eq!(state.turn_log.len(), 1);
    }

    #[test]
    fn test_apple_pickup_is_fuzzy() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);
        state.apple = pos(50, 50);

        // head steps onto (52,52): within 2 on both axes
        state.head.position = pos(51, 52);
        let report = engine.tick(&mut state);
        assert!(report.ate_apple);
        assert_eq!(state.score, 1);
        assert_eq!(state.target_length, 30);
        assert_eq!(state.tick_delay_ms, 39);

        // head steps onto (53,50): 3 off on x, not eaten
        let mut state = start_state(&mut engine);
        state.apple = pos(50, 50);
        state.head.position = pos(52, 50);
        let report = engine.tick(&mut state);
        assert!(!report.ate_apple);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_delay_never_drops_below_floor() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);
        state.tick_delay_ms = 7;

        for _ in 0..5 {
            // park the apple right on the head's next cell
            state.apple = state.head.position.moved_in_direction(state.head.direction);
            let report = engine.tick(&mut state);
            assert!(report.ate_apple);
        }

        assert_eq!(state.tick_delay_ms, 5);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_self_collision_in_tight_rectangle() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);

        // right 3, down 2, left 2, up 2: the head re-enters its own first
        // stretch at (81,40) on the 9th tick, before the tail has moved.
        let route: [(usize, Option<Direction>); 4] = [
            (3, Some(Direction::Down)),
            (2, Some(Direction::Left)),
            (2, Some(Direction::Up)),
            (2, None),
        ];

        let mut last_report = TickReport::empty();
        for (steps, turn) in route {
            for _ in 0..steps {
                assert_eq!(state.phase, GamePhase::Running);
                last_report = engine.tick(&mut state);
            }
            if let Some(direction) = turn {
                engine.turn(&mut state, direction);
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(last_report.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.head.position, pos(81, 40));
    }

    #[test]
    fn test_tail_follows_retires_and_adopts_direction() {
        let config = GameConfig {
            initial_length: 3,
            ..GameConfig::default()
        };
        let mut engine = MovementEngine::new(config);
        let mut state = start_state(&mut engine);

        engine.tick(&mut state); // head (81,40)
        engine.tick(&mut state); // head (82,40)
        engine.turn(&mut state, Direction::Down);
        engine.tick(&mut state); // head (82,41), counter reaches 3
        assert_eq!(state.tail.position, pos(80, 40));

        // tail starts following the old rightward stretch
        let report = engine.tick(&mut state);
        assert_eq!(state.tail.position, pos(81, 40));
        assert_eq!(report.erased, Some(pos(80, 40)));
        assert_eq!(state.turn_log.front().unwrap().span_start, pos(81, 40));
        assert_eq!(state.turn_log.front().unwrap().length, 1);

        // tail reaches the corner: segment retires, tail turns down
        engine.tick(&mut state);
        assert_eq!(state.tail.position, pos(82, 40));
        assert!(state.turn_log.is_empty());
        assert_eq!(state.tail.direction, Direction::Down);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = MovementEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = pos(0, 0);
        state.head.position = pos(9, 5);
        state.head.direction = Direction::Right;

        let report = engine.tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(report.collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_paused_tick_does_nothing_but_turns_still_land() {
        let mut engine = MovementEngine::new(GameConfig::default());
        let mut state = start_state(&mut engine);
        let head_before = state.head.position;

        engine.toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Paused);

        let report = engine.tick(&mut state);
        assert_eq!(state.head.position, head_before);
        assert_eq!(report, TickReport::empty());

        // turns are still accepted while paused
        engine.turn(&mut state, Direction::Up);
        assert_eq!(state.head.direction, Direction::Up);

        engine.toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut engine = MovementEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = pos(0, 0);
        state.head.position = pos(9, 5);
        state.head.direction = Direction::Right;
        engine.tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks_before = state.ticks;
        engine.tick(&mut state);
        engine.turn(&mut state, Direction::Up);
        engine.toggle_pause(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ticks, ticks_before);
        assert_eq!(state.head.direction, Direction::Right);
    }

    #[test]
    fn test_apple_never_respawns_on_a_segment() {
        let mut engine = MovementEngine::new(GameConfig::small());
        let mut state = engine.reset();

        // cover two long stretches of the 10x10 board
        state
            .turn_log
            .record_turn(pos(9, 2), Direction::Right, pos(0, 2));
        state
            .turn_log
            .record_turn(pos(9, 7), Direction::Down, pos(9, 2));
        state.span_start = pos(9, 7);

        for _ in 0..200 {
            let apple = engine.respawn_apple(&state);
            assert!(
                !state.turn_log.iter().any(|s| point_on_segment(apple, s)),
                "apple {:?} spawned on the body",
                apple
            );
        }
    }
}
