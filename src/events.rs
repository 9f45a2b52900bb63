//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, info};

use crate::{
    game::Game,
    types::{MainMenuItem, PauseMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function waits at most `timeout` for a keyboard event and dispatches it to the handler
/// matching the current screen. Key releases are ignored, only presses and their auto-repeats
/// count.
pub(crate) fn handle_events(app: &mut App, timeout: Duration) -> Result<()> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press.
///
/// Menus share the `j`/`k`/`l`/`h` navigation scheme, with arrow keys, `Enter` and `Esc` as
/// alternatives; `q` leaves the application from any menu.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if matches!(app.screen, Screen::InGame) {
        handle_in_game_events(app, code);
        return Ok(());
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => handle_j_events(app),
        KeyCode::Char('k') | KeyCode::Up => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app)?,
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Play) => {
            app.screen = Screen::MainMenu(MainMenuItem::Instructions);
        }
        Screen::MainMenu(MainMenuItem::Instructions) => {
            app.screen = Screen::MainMenu(MainMenuItem::Exit);
        }
        Screen::PauseMenu(PauseMenuItem::Resume) => {
            app.screen = Screen::PauseMenu(PauseMenuItem::MainMenu);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Exit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Instructions);
        }
        Screen::MainMenu(MainMenuItem::Instructions) => {
            app.screen = Screen::MainMenu(MainMenuItem::Play);
        }
        Screen::PauseMenu(PauseMenuItem::MainMenu) => {
            app.screen = Screen::PauseMenu(PauseMenuItem::Resume);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection.
///
/// Selecting "PLAY" starts a brand new game, which fails only when the configured labyrinth is
/// too small.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Play) => start_game(app)?,
        Screen::MainMenu(MainMenuItem::Instructions) => {
            app.screen = Screen::Instructions;
        }
        Screen::MainMenu(MainMenuItem::Exit) => {
            app.exit = true;
        }
        Screen::Instructions => {
            app.screen = Screen::MainMenu(MainMenuItem::Instructions);
        }
        Screen::PauseMenu(PauseMenuItem::Resume) => {
            app.screen = Screen::InGame;
        }
        Screen::PauseMenu(PauseMenuItem::MainMenu) => leave_game(app),
        Screen::InGame => {}
    }

    debug!(screen = ?app.screen, "menu selection");

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// Going back from the instructions shows the main menu, and going back from the game menu
/// resumes the game.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::Instructions => {
            app.screen = Screen::MainMenu(MainMenuItem::Instructions);
        }
        Screen::PauseMenu(_) => {
            app.screen = Screen::InGame;
        }
        _ => {}
    }
}

/// Handles key presses while a labyrinth is being played.
pub(crate) fn handle_in_game_events(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.screen = Screen::PauseMenu(PauseMenuItem::Resume);
        }
        KeyCode::Char('h') => leave_game(app),
        KeyCode::Char('l') => {
            info!("exit requested from the game");
            app.exit = true;
        }
        code => {
            let Some(game) = app.game.as_mut() else {
                return;
            };
            let player = &mut game.player;

            match code {
                KeyCode::Char('w') => player.move_forward(),
                KeyCode::Char('s') => player.move_backward(),
                KeyCode::Char('a') => player.strafe_left(),
                KeyCode::Char('d') => player.strafe_right(),
                KeyCode::Left => player.turn_left(),
                KeyCode::Right => player.turn_right(),
                KeyCode::Char(' ') => player.jump(),
                KeyCode::Char('c') => player.toggle_crouch(),
                _ => {}
            }
        }
    }
}

/// Starts a new game on the first level and switches to the in-game screen.
pub(crate) fn start_game(app: &mut App) -> Result<()> {
    app.game = Some(Game::new(&app.config)?);
    app.screen = Screen::InGame;
    info!("new game started");

    Ok(())
}

/// Drops the running game and goes back to the main menu.
fn leave_game(app: &mut App) {
    if let Some(game) = app.game.take() {
        info!(level = game.level(), "game abandoned");
    }
    app.screen = Screen::MainMenu(MainMenuItem::Play);
}
