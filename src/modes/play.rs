use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::audio::{AudioController, Sound};
use crate::game::{Direction, GameConfig, GameEngine, GameState, Level, Phase, TickOutcome};
use crate::input::{Command, InputHandler, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::{MenuItem, Renderer, Screen, View};
use crate::storage::{PreferenceStore, Preferences};

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive game: menus, playfield and persistence around the engine
pub struct PlayMode<S: PreferenceStore> {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    audio: AudioController,
    store: S,
    prefs: Preferences,
    screen: Screen,
    menu_cursor: usize,
    new_record: bool,
    should_quit: bool,
    /// Set when the level changes so the tick timer gets rebuilt
    level_changed: bool,
}

impl<S: PreferenceStore> PlayMode<S> {
    pub fn new(
        config: GameConfig,
        prefs: Preferences,
        store: S,
        audio: AudioController,
    ) -> Result<Self> {
        let mut engine =
            GameEngine::new(config).map_err(|e| anyhow!("Invalid configuration: {e}"))?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::with_high_score(prefs.high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(),
            audio,
            store,
            prefs,
            screen: Screen::Menu,
            menu_cursor: 0,
            new_record: false,
            should_quit: false,
            level_changed: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
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
        let mut tick_timer = interval(self.level().tick_interval());
        let mut render_timer = interval(RENDER_INTERVAL);

        info!(level = %self.level(), "Game loop started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => warn!(error = %e, "Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let view = self.view();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
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

            if self.level_changed {
                self.level_changed = false;
                tick_timer = interval(self.level().tick_interval());
            }
        }

        info!(games_played = self.metrics.games_played, "Game loop finished");
        Ok(())
    }

    fn view(&self) -> View<'_> {
        View {
            screen: self.screen,
            state: &self.state,
            metrics: &self.metrics,
            level: self.level(),
            sound_enabled: self.audio.is_enabled(),
            menu_cursor: self.menu_cursor,
            new_record: self.new_record,
        }
    }

    fn level(&self) -> Level {
        self.engine.config().level
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let command = self.input_handler.handle_key_event(key);
                self.handle_command(command);
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.swipe.handle_mouse_event(mouse) {
                    if self.screen == Screen::Game {
                        self.state.set_direction(direction);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => {
                self.should_quit = true;
                return;
            }
            Command::ToggleSound => {
                self.toggle_sound();
                return;
            }
            Command::None => return,
            _ => {}
        }

        match self.screen {
            Screen::Menu => self.handle_menu_command(command),
            Screen::LevelSelect => self.handle_level_command(command),
            Screen::Game => self.handle_game_command(command),
        }
    }

    fn handle_menu_command(&mut self, command: Command) {
        let items = MenuItem::ALL.len();
        match command {
            Command::Steer(Direction::Up) => {
                self.menu_cursor = (self.menu_cursor + items - 1) % items;
            }
            Command::Steer(Direction::Down) => {
                self.menu_cursor = (self.menu_cursor + 1) % items;
            }
            Command::Confirm => match MenuItem::ALL[self.menu_cursor] {
                MenuItem::Start => self.start_game(),
                MenuItem::Levels => self.screen = Screen::LevelSelect,
                MenuItem::Sound => self.toggle_sound(),
                MenuItem::Quit => self.should_quit = true,
            },
            Command::Restart | Command::TogglePause => self.start_game(),
            Command::LevelSelect => self.screen = Screen::LevelSelect,
            _ => {}
        }
    }

    fn handle_level_command(&mut self, command: Command) {
        match command {
            Command::Steer(Direction::Up) | Command::Steer(Direction::Left) => {
                self.change_level(self.level().previous());
            }
            Command::Steer(Direction::Down) | Command::Steer(Direction::Right) => {
                self.change_level(self.level().next());
            }
            Command::Confirm | Command::Back | Command::LevelSelect => {
                self.screen = Screen::Menu;
            }
            _ => {}
        }
    }

    fn handle_game_command(&mut self, command: Command) {
        match (self.state.phase, command) {
            (Phase::Running, Command::Steer(direction)) => {
                self.state.set_direction(direction);
            }
            (Phase::Running | Phase::Paused, Command::TogglePause)
            | (Phase::Paused, Command::Confirm) => {
                self.toggle_pause();
            }
            (Phase::Paused | Phase::GameOver, Command::Restart)
            | (Phase::GameOver, Command::Confirm) => {
                self.start_game();
            }
            (_, Command::Back) => {
                self.state.return_to_menu();
                self.screen = Screen::Menu;
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        if self.state.phase == Phase::Paused {
            self.state.return_to_menu();
        }
        if self.engine.start(&mut self.state) {
            self.screen = Screen::Game;
            self.new_record = false;
            self.metrics.on_game_start();
            info!(level = %self.level(), "Game started");
        }
    }

    fn toggle_pause(&mut self) {
        if !self.state.toggle_pause() {
            return;
        }
        if self.state.phase == Phase::Paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick(&mut self.state);

        match outcome {
            TickOutcome::Skipped | TickOutcome::Moved => {}
            TickOutcome::Ate { score } => {
                self.audio.play(Sound::Eat);
                debug!(score, length = self.state.snake.len(), "Food eaten");
                self.record_score(score);
            }
            TickOutcome::Collided(collision) => {
                info!(?collision, score = self.state.score, "Snake crashed");
                self.audio.play(Sound::GameOver);
                self.finish_game();
            }
            TickOutcome::BoardCleared { score } => {
                info!(score, "Board cleared");
                self.audio.play(Sound::Eat);
                self.record_score(score);
                self.finish_game();
            }
        }
    }

    /// Save a beaten record right away; leaving mid-game must not lose it
    fn record_score(&mut self, score: u32) {
        if !self.prefs.record_score(score) {
            return;
        }
        if !self.new_record {
            info!(high_score = score, "New high score");
        }
        self.new_record = true;
        self.metrics.high_score = score;
        self.persist();
    }

    fn finish_game(&mut self) {
        let score = self.state.score;
        self.metrics.on_game_over(score);
        if self.new_record {
            info!(high_score = score, "Game finished with a new record");
        }
    }

    fn toggle_sound(&mut self) {
        self.prefs.sound_enabled = self.audio.toggle();
        self.persist();
    }

    fn change_level(&mut self, level: Level) {
        self.engine.set_level(level);
        self.prefs.level = level;
        self.level_changed = true;
        self.persist();
    }

    /// Write preferences; a failed write is logged, never fatal
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.prefs) {
            warn!(error = %e, "Failed to save preferences");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
