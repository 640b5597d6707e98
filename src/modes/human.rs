use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::Path;
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GamePhase, GameState, MovementEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::HighScoreStore;

/// Interactive driver: owns the clock, the terminal, and the score file.
/// The engine itself never blocks or draws; this loop calls `tick()` at the
/// cadence the engine's exposed delay asks for.
pub struct HumanMode {
    engine: MovementEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    score_store: HighScoreStore,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, score_path: impl AsRef<Path>) -> Self {
        let mut engine = MovementEngine::new(config);
        let state = engine.reset();
        let score_store = HighScoreStore::new(score_path);
        let metrics = GameMetrics::new(score_store.load());

        Self {
            engine,
            state,
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            score_store,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Tick cadence comes from the engine; apples speed it up over time
        let mut tick_delay = self.state.tick_delay_ms;
        let mut tick_timer = interval(Duration::from_millis(tick_delay));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.state.phase == GamePhase::Running {
                        self.advance_game()?;
                    }
                    if self.state.tick_delay_ms != tick_delay {
                        tick_delay = self.state.tick_delay_ms;
                        tick_timer = interval(Duration::from_millis(tick_delay));
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    // The engine debounces redundant and reversal requests
                    self.engine.turn(&mut self.state, direction);
                }
                KeyAction::TogglePause => {
                    self.engine.toggle_pause(&mut self.state);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn advance_game(&mut self) -> Result<()> {
        let report = self.engine.tick(&mut self.state);

        if report.collision.is_some() {
            self.on_game_over()?;
        }

        Ok(())
    }

    /// Runs once per game: GameOver is terminal, so the colliding tick is
    /// the only place this is reached.
    fn on_game_over(&mut self) -> Result<()> {
        self.metrics.on_game_over(self.state.score);
        let best = self.score_store.record_if_best(self.state.score)?;
        self.metrics.high_score = best;
        Ok(())
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
