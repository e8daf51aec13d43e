use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::game::{Game, GameConfig, GameStatus};
use crate::input::{InputHandler, KeyAction, Menu, MenuAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

pub struct HumanMode {
    game: Game,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Clickable items from the last drawn frame
    menu: Menu,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_game(Game::new(config))
    }

    pub fn with_game(game: Game) -> Self {
        Self {
            game,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            menu: Menu::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal, undoing raw mode if a later step fails
        enable_raw_mode().context("Failed to enable raw mode")?;
        let setup_guard = RestoreGuard::new(restore_terminal);
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        setup_guard.disarm();

        info!(
            width = self.game.board().width(),
            height = self.game.board().height(),
            tick_ms = self.game.config().tick_interval_ms,
            "starting game"
        );

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

        let mut tick_timer = interval(self.game.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    games_played = self.stats.games_played,
                    high_score = self.stats.high_score,
                    "quitting"
                );
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.stats.update();

        let mut menu = None;
        terminal
            .draw(|frame| menu = self.renderer.render(frame, &self.game, &self.stats))
            .context("Failed to draw frame")?;
        self.menu = menu.unwrap_or_default();

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match self.input_handler.handle_event(event) {
            KeyAction::Turn(direction) => {
                self.game.queue_direction(direction);
            }
            KeyAction::Restart => self.request_restart(),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::Pointer { column, row } => match self.menu.hit(column, row) {
                Some(MenuAction::Restart) => self.request_restart(),
                Some(MenuAction::Quit) => self.should_quit = true,
                None => debug!(column, row, "click outside menu"),
            },
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let outcome = self.game.tick();

        if outcome.is_game_over() {
            self.stats.on_game_over(self.game.score());
        }
    }

    /// Restart only from the game over screen
    fn request_restart(&mut self) {
        if self.game.status() != GameStatus::GameOver {
            return;
        }

        self.game.restart();
        self.stats.on_round_start();
        self.menu = Menu::default();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Runs `restore` on drop unless disarmed
struct RestoreGuard<F: FnMut()> {
    restore: Option<F>,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            restore();
        }
    }
}

/// Best-effort terminal reset after a failed setup
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!(%err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(stderr(), DisableMouseCapture, LeaveAlternateScreen) {
        warn!(%err, "failed to leave alternate screen");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Snake};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn seeded_mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(11),
            food_avoids_snake: true,
            ..GameConfig::small()
        })
    }

    /// Run until the snake hits the right wall
    fn crash(mode: &mut HumanMode) {
        while mode.game.status().is_playing() {
            mode.update_game();
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = seeded_mode();
        assert!(mode.game.status().is_playing());
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_turn_applies_on_tick() {
        let mut mode = seeded_mode();
        mode.game = Game::new(GameConfig {
            seed: Some(11),
            start_y: Some(2),
            ..GameConfig::small()
        });

        mode.handle_event(&key(KeyCode::Down));
        assert_eq!(mode.game.snake().heading(), Direction::Right);

        mode.update_game();
        assert_eq!(mode.game.snake().heading(), Direction::Down);
        assert_eq!(mode.game.snake().head(), Cell::new(0, 3));
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut mode = seeded_mode();
        mode.update_game();
        let steps = mode.game.steps();

        mode.handle_event(&key(KeyCode::Char('r')));

        assert_eq!(mode.game.steps(), steps);
    }

    #[test]
    fn test_game_over_updates_stats() {
        let mut mode = seeded_mode();
        crash(&mut mode);

        assert_eq!(mode.game.status(), GameStatus::GameOver);
        assert_eq!(mode.stats.games_played, 1);
    }

    #[test]
    fn test_restart_key_after_game_over() {
        let mut mode = seeded_mode();
        crash(&mut mode);

        mode.handle_event(&key(KeyCode::Char('r')));

        assert!(mode.game.status().is_playing());
        assert_eq!(mode.game.score(), 0);
        assert_eq!(mode.game.snake().len(), 1);
    }

    #[test]
    fn test_movement_ignored_in_game_over() {
        let mut mode = seeded_mode();
        crash(&mut mode);
        let head = mode.game.snake().head();

        mode.handle_event(&key(KeyCode::Up));
        mode.update_game();

        assert_eq!(mode.game.snake().head(), head);
        assert_eq!(mode.game.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_menu_clicks() {
        let mut mode = seeded_mode();
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        crash(&mut mode);
        mode.draw(&mut terminal).unwrap();

        let close = mode.menu.items()[1].region;
        let play = mode.menu.items()[0].region;

        mode.handle_event(&click(0, 0));
        assert!(!mode.should_quit);
        assert!(!mode.game.status().is_playing());

        mode.handle_event(&click(play.x, play.y));
        assert!(mode.game.status().is_playing());

        // The menu is gone once play resumes
        mode.handle_event(&click(close.x, close.y));
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_close_button_quits() {
        let mut mode = seeded_mode();
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        mode.game.set_snake(Snake::new(Cell::new(9, 5), Direction::Right, 1));
        mode.update_game();
        mode.draw(&mut terminal).unwrap();

        let close = mode.menu.items()[1].region;
        mode.handle_event(&click(close.x, close.y));

        assert!(mode.should_quit);
    }

    #[test]
    fn test_restore_guard_runs_on_early_exit() {
        let restored = std::cell::Cell::new(0);

        let setup = || -> Result<()> {
            let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
            anyhow::bail!("terminal unavailable");
        };

        assert!(setup().is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_disarmed_guard_does_nothing() {
        let restored = std::cell::Cell::new(0);

        let guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        guard.disarm();

        assert_eq!(restored.get(), 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = seeded_mode();
        mode.handle_event(&key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
