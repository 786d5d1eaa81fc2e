//! The interactive game loop.
//!
//! A single task multiplexes keyboard events, the simulation tick timer,
//! and the render timer. Input only records a pending direction; it is
//! applied once at the start of the next tick, so ticks always run to
//! completion without racing the input handler. The tick timer is dropped
//! and rebuilt whenever the interval changes (after every food eat) and on
//! each start, keeping at most one tick in flight.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{self, Instant, Interval};

use crate::game::{Direction, GameConfig, GameState, Simulator};
use crate::input::{Command, InputHandler};
use crate::render::Renderer;
use crate::score::ScoreStore;

/// Frame interval for drawing, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct GameLoop {
    sim: Simulator,
    state: GameState,
    renderer: Renderer,
    input_handler: InputHandler,
    score_store: Box<dyn ScoreStore>,
    pending_direction: Option<Direction>,
    should_quit: bool,
}

impl GameLoop {
    pub fn new(config: GameConfig, score_store: Box<dyn ScoreStore>) -> Self {
        let mut sim = Simulator::new(config);
        let state = sim.initial_state();

        Self {
            sim,
            state,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            score_store,
            pending_direction: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor().context("failed to hide cursor")?;
        terminal.clear().context("failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = tick_interval(self.state.speed_delay);
        let mut render_timer = time::interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Keyboard events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            tick_timer = tick_interval(self.state.speed_delay);
                        }
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    if self.state.running && self.advance()? {
                        // Eating changed the interval; reschedule
                        tick_timer = tick_interval(self.state.speed_delay);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let high_score = self.score_store.get();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, high_score);
                    }).context("failed to draw frame")?;
                }

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

    /// Returns true when the tick timer must be rescheduled
    fn handle_event(&mut self, event: Event) -> bool {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return false;
            }

            return self.handle_command(self.input_handler.handle_key_event(key));
        }

        false
    }

    /// Returns true when the tick timer must be rescheduled
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Steer(direction) => {
                self.pending_direction = Some(direction);
                false
            }
            Command::Start => {
                if self.state.running {
                    return false;
                }
                // A direction chosen on the instruction screen becomes the
                // opening move, so leave any pending value in place
                self.state.running = true;
                tracing::info!(delay_ms = self.state.speed_delay, "game started");
                true
            }
            Command::Quit => {
                self.should_quit = true;
                false
            }
            Command::None => false,
        }
    }

    /// Run one simulation tick. Returns true when the speed delay changed
    /// and the tick timer must be rescheduled.
    fn advance(&mut self) -> Result<bool> {
        if let Some(direction) = self.pending_direction.take() {
            self.state.direction = direction;
        }

        let outcome = self.sim.tick(&mut self.state);

        if let Some(kind) = outcome.collision {
            tracing::info!(?kind, score = outcome.score, "game over");
            if outcome.score > self.score_store.get() {
                self.score_store.set(outcome.score)?;
                tracing::info!(high_score = outcome.score, "new high score");
            }
            // State is already reset; the instruction screen shows until
            // the next Start
            self.pending_direction = None;
        }

        Ok(outcome.ate_food)
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        terminal.show_cursor().context("failed to show cursor")?;
        Ok(())
    }
}

/// A repeating tick timer whose first tick fires one full interval from
/// now, so rescheduling never double-steps the snake.
fn tick_interval(delay_ms: u64) -> Interval {
    let period = Duration::from_millis(delay_ms);
    time::interval_at(Instant::now() + period, period)
}
