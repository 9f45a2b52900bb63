//! Core application state and logic for the labyrinth game.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::{
    config::Config,
    events,
    game::Game,
    player::Outcome,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the labyrinth game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Settings the application was started with.
    pub(crate) config: Config,
    /// Game being played, if any.
    ///
    /// A game is created when "PLAY" is selected and dropped when going back to the main menu. It
    /// survives the game menu, so that resuming continues where the player stopped.
    pub(crate) game: Option<Game>,
}

impl App {
    /// Creates a new application showing the main menu.
    ///
    /// When [`Config::skip_menu`] is set, the first level is loaded right away instead.
    ///
    /// # Errors
    ///
    /// Fails when the configured labyrinth is too small to be generated, so that the problem is
    /// reported before the terminal is taken over.
    pub fn new(config: Config) -> Result<Self> {
        let _ = config.generator()?;

        let mut app = Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Play),
            config,
            game: None,
        };

        if app.config.skip_menu {
            events::start_game(&mut app)?;
        }

        Ok(app)
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and advances the game once per configured tick. The loop
    /// continues until the exit condition is `true`, after which the function returns to the call
    /// site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick = self.config.tick();
        let mut last_tick = Instant::now();
        info!(tick_ms = self.config.tick_ms, "entering main loop");

        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;

            events::handle_events(self, tick.saturating_sub(last_tick.elapsed()))?;

            if last_tick.elapsed() >= tick {
                self.tick();
                last_tick = Instant::now();
            }
        }

        info!("leaving main loop");

        Ok(())
    }

    /// Advances the running game by one tick, unless it is paused.
    pub(crate) fn tick(&mut self) {
        if self.screen != Screen::InGame {
            return;
        }

        if let Some(game) = self.game.as_mut() {
            if game.tick() == Outcome::ReachedExit {
                debug!(level = game.level(), "moved on to the next level");
            }
        }
    }
}
