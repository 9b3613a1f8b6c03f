use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Interval};

use super::{new_game, GameSource};
use crate::game::{Simulation, SimulationConfig, SimulationStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

const MIN_TICK: Duration = Duration::from_millis(10);
const MAX_TICK: Duration = Duration::from_millis(2000);

/// Full-screen view of the snake driving itself
pub struct WatchMode {
    source: GameSource,
    config: SimulationConfig,
    seeds: SmallRng,
    sim: Simulation,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    paused: bool,
    should_quit: bool,
}

impl WatchMode {
    pub fn new(source: GameSource, config: SimulationConfig, seed: u64) -> Result<Self> {
        let sim = new_game(&source, &config, seed)?;
        let tick_interval = Duration::from_millis(config.tick_interval_ms);

        Ok(Self {
            source,
            config,
            // Restarts draw fresh seeds from here, so a seeded session replays too.
            seeds: SmallRng::seed_from_u64(seed),
            sim,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            paused: false,
            should_quit: false,
        })
    }

    /// Status of the game on screen
    pub fn status(&self) -> SimulationStatus {
        self.sim.status()
    }

    pub async fn run(&mut self) -> Result<SimulationStatus> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result.map(|()| self.sim.status())
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    if !self.sim.status().is_finished() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
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

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => self.restart(),
            KeyAction::Faster => self.change_speed(self.tick_interval / 2, tick_timer),
            KeyAction::Slower => self.change_speed(self.tick_interval * 2, tick_timer),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.sim.status().is_finished() {
            return;
        }

        let status = self.sim.tick();
        if status.is_finished() {
            self.metrics.on_game_over(status, self.sim.state().eaten);
        }
    }

    fn restart(&mut self) {
        let seed = self.seeds.gen();
        match new_game(&self.source, &self.config, seed) {
            Ok(sim) => {
                self.sim = sim;
                self.metrics.on_game_start();
                self.paused = false;
            }
            Err(err) => tracing::warn!("restart failed: {err:#}"),
        }
    }

    fn change_speed(&mut self, tick_interval: Duration, tick_timer: &mut Interval) {
        self.tick_interval = tick_interval.clamp(MIN_TICK, MAX_TICK);
        *tick_timer = interval(self.tick_interval);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn watch() -> WatchMode {
        WatchMode::new(GameSource::Random, SimulationConfig::default(), 21).unwrap()
    }

    #[test]
    fn test_initialization() {
        let mode = watch();
        assert_eq!(mode.status(), SimulationStatus::Running);
        assert_eq!(mode.sim.state().eaten, 0);
        assert_eq!(mode.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_restart_starts_fresh_game() {
        let mut mode = watch();
        mode.sim.run_until_finished(10_000);
        mode.paused = true;

        mode.restart();
        assert_eq!(mode.status(), SimulationStatus::Running);
        assert_eq!(mode.sim.state().ticks, 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_update_records_game_over() {
        let mut mode = watch();
        for _ in 0..10_000 {
            mode.update_game();
            if mode.status().is_finished() {
                break;
            }
        }
        if mode.status().is_finished() {
            assert_eq!(mode.metrics.games_played, 1);
            // Further updates are ignored
            mode.update_game();
            assert_eq!(mode.metrics.games_played, 1);
        }
    }

    #[tokio::test]
    async fn test_speed_is_clamped() {
        let mut mode = watch();
        let mut timer = interval(mode.tick_interval);

        for _ in 0..20 {
            mode.change_speed(mode.tick_interval / 2, &mut timer);
        }
        assert_eq!(mode.tick_interval, MIN_TICK);

        for _ in 0..20 {
            mode.change_speed(mode.tick_interval * 2, &mut timer);
        }
        assert_eq!(mode.tick_interval, MAX_TICK);
    }
}
