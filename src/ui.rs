//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{block, shade},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    game::Game,
    generator::{world_to_cell, Cell},
    player::{Facing, Player, Stance},
    types::{MainMenuItem, MenuType, PauseMenuItem, Screen},
    world::WallTexture,
    App,
};

/// Terminal columns used to draw a single labyrinth cell, which keeps cells roughly square.
const CELL_COLUMNS: u16 = 2;

/// Key bindings shown at the bottom of the in-game screen.
const GAME_TOOLTIP: &str = "(w/s) move / (a/d) strafe / (left/right) turn / (space) jump / \
                            (c) crouch / (esc) menu / (h) main menu / (l) quit";

/// Body of the instructions screen.
const INSTRUCTIONS: [&str; 14] = [
    "CONTROLS:",
    "",
    "W - Move Forward",
    "S - Move Backward",
    "A - Strafe Left",
    "D - Strafe Right",
    "LEFT / RIGHT - Turn Around",
    "SPACE - Jump",
    "C - Crouch",
    "ESC - Game Menu",
    "",
    "GOAL:",
    "",
    "Find the exit (highlighted in green) to advance to the next level.",
];

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type. The game
/// menu is drawn on top of the running game.
///
/// # Errors
///
/// This function fails when an in-game screen is shown without a running game, or when the
/// labyrinth dimensions cannot be converted to screen coordinates.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::Instructions => instructions(frame),
        Screen::InGame => in_game(app, frame)?,
        Screen::PauseMenu(item) => {
            in_game(app, frame)?;
            pause_menu(frame, item);
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and game menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the entries are rendered by
/// the caller into the returned rows.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders menu entries into the rows returned by [`init_menu`], highlighting the selected one.
fn menu_entries(frame: &mut Frame, rows: &[Rect], entries: &[(&'static str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (&(label, selected), row) in entries.iter().zip(rows) {
        let style = if selected {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(label, style).centered(), *row);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with the "PLAY", "INSTRUCTIONS" and "EXIT" entries and
/// highlights the currently selected one.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let rows = init_menu(frame, MenuType::MainMenu(3));
    let entries = MainMenuItem::ALL.map(|entry| (entry.label(), entry == item));

    menu_entries(frame, &rows, &entries);
}

/// Renders the game menu on top of the current frame.
pub(crate) fn pause_menu(frame: &mut Frame, item: PauseMenuItem) {
    let rows = init_menu(frame, MenuType::PauseMenu(2));
    let entries = PauseMenuItem::ALL.map(|entry| (entry.label(), entry == item));

    menu_entries(frame, &rows, &entries);
}

/// Renders the instructions screen with the controls and the goal of the game.
pub(crate) fn instructions(frame: &mut Frame) {
    clear(frame);

    let [space] = Layout::horizontal([Constraint::Max(72)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [space] = Layout::vertical([Constraint::Max(18)])
        .flex(Flex::Center)
        .areas(space);

    let block = Block::bordered()
        .title("Instructions")
        .title_bottom("(h) back")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let text: Vec<Line> = INSTRUCTIONS.iter().map(|&line| Line::raw(line)).collect();
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .block(block);

    frame.render_widget(body, space);
}

/// Renders the in-game screen.
///
/// The screen is made of the level indicator at the top, a top-down view of the labyrinth
/// following the player, the current notification if any and the key bindings at the bottom.
///
/// # Errors
///
/// This function fails when no game is running or when the labyrinth dimensions cannot be
/// converted to screen coordinates.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let game = app.game.as_ref().ok_or_eyre("no game is running")?;

    let [hud_area, maze_area, tooltip_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(hud(game), hud_area);
    frame.render_widget(Paragraph::new(maze_lines(game, maze_area)?), maze_area);

    if let Some(message) = game.notification() {
        notification(frame, maze_area, message)?;
    }

    let tooltip_block = Block::bordered()
        .title(GAME_TOOLTIP)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Builds the level indicator, followed by the posture of the player.
fn hud(game: &Game) -> Line<'static> {
    let stance = match game.player.stance {
        Stance::Standing => "standing",
        Stance::Crouching => "crouching",
    };
    let mut spans = vec![
        Span::styled(game.hud_text(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(stance, Style::default().fg(Color::DarkGray)),
    ];
    if !game.player.on_ground {
        spans.push(Span::styled(
            " airborne",
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

/// Renders a notification box at the top of `area`.
fn notification(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
    let width = u16::try_from(message.len())?.saturating_add(4).min(area.width);

    let [row] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::Start)
        .areas(area);
    let [space] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let popup = Paragraph::new(Line::raw(message.to_owned()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(Clear, space);
    frame.render_widget(popup, space);

    Ok(())
}

/// Builds the visible part of the labyrinth as text lines filling `area`.
///
/// Cells outside the labyrinth are left blank. The player is drawn on top of its cell.
fn maze_lines(game: &Game, area: Rect) -> Result<Vec<Line<'static>>> {
    let grid = game.grid();
    let world = game.world();

    let player_cell = world_to_cell(game.player.position);
    let view_columns = i32::from(area.width / CELL_COLUMNS);
    let view_rows = i32::from(area.height);
    let origin_x = viewport_origin(
        i32::try_from(player_cell.0)?,
        i32::try_from(grid.width())?,
        view_columns,
    );
    let origin_z = viewport_origin(
        i32::try_from(player_cell.1)?,
        i32::try_from(grid.height())?,
        view_rows,
    );

    let lines = (0..view_rows)
        .map(|row| {
            let spans: Vec<Span> = (0..view_columns)
                .map(|column| {
                    let coords = usize::try_from(origin_x + column)
                        .ok()
                        .zip(usize::try_from(origin_z + row).ok());

                    match coords {
                        Some(coords) if coords == player_cell => player_span(&game.player),
                        Some((x, z)) => {
                            cell_span(grid.get(x, z), world.wall_texture_at((x, z)))
                        }
                        None => cell_span(None, None),
                    }
                })
                .collect();

            Line::from(spans)
        })
        .collect();

    Ok(lines)
}

/// First cell shown along one axis of the viewport.
///
/// A labyrinth narrower than the view is centered in it, which may yield a negative origin.
/// Otherwise the view follows `focus` and stops at the labyrinth's edges.
fn viewport_origin(focus: i32, cells: i32, view: i32) -> i32 {
    if cells <= view {
        -rounded_div::i32(view - cells, 2)
    } else {
        (focus - rounded_div::i32(view, 2)).clamp(0, cells - view)
    }
}

/// Glyph of a labyrinth cell.
fn cell_span(cell: Option<Cell>, texture: Option<WallTexture>) -> Span<'static> {
    match (cell, texture) {
        (Some(Cell::Wall), Some(WallTexture::Brick)) => Span::styled(
            shade::DARK.repeat(2),
            Style::default().fg(Color::LightRed),
        ),
        (Some(Cell::Wall), _) => {
            Span::styled(block::FULL.repeat(2), Style::default().fg(Color::Gray))
        }
        (Some(Cell::Exit), _) => {
            Span::styled(block::FULL.repeat(2), Style::default().fg(Color::Green))
        }
        (Some(Cell::Start), _) => Span::styled("..", Style::default().fg(Color::DarkGray)),
        (Some(Cell::Path) | None, _) => Span::raw("  "),
    }
}

/// Glyph of the player, pointing where it looks.
fn player_span(player: &Player) -> Span<'static> {
    let glyph = match player.facing() {
        Facing::North => "^^",
        Facing::East => ">>",
        Facing::South => "vv",
        Facing::West => "<<",
    };
    let mut style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    if player.stance == Stance::Crouching {
        style = style.remove_modifier(Modifier::BOLD);
    }

    Span::styled(glyph, style)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;

    /// Creates a test app running a small seeded game.
    fn create_test_app() -> App {
        App::new(Config {
            width: 9,
            height: 9,
            seed: Some(3),
            skip_menu: true,
            ..Config::default()
        })
        .expect("app should start")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Draws the application and returns the screen content as a single string.
    fn render(app: &App) -> String {
        let mut terminal = create_test_terminal();
        let result = terminal.draw(|frame| {
            draw(app, frame).expect("drawing should succeed in test");
        });
        assert!(result.is_ok(), "drawing should succeed");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Play);

        let screen = render(&app);

        assert!(screen.contains("Labyrinth"), "the title should be shown");
        for label in ["PLAY", "INSTRUCTIONS", "EXIT"] {
            assert!(screen.contains(label), "the {label} entry should be shown");
        }
    }

    #[test]
    fn test_draw_instructions() {
        let mut app = create_test_app();
        app.screen = Screen::Instructions;

        let screen = render(&app);

        assert!(screen.contains("CONTROLS:"), "the controls should be listed");
        assert!(screen.contains("W - Move Forward"), "movement keys should be listed");
        assert!(screen.contains("GOAL:"), "the goal should be explained");
    }

    #[test]
    fn test_draw_in_game() {
        let app = create_test_app();

        let screen = render(&app);

        assert!(screen.contains("Level: 1"), "the level indicator should be shown");
        assert!(screen.contains("standing"), "the posture should be shown");
        assert!(
            screen.contains("Level 1 - Find the exit!"),
            "the level notification should be shown"
        );
        assert!(screen.contains("vv"), "the player should look south");
    }

    #[test]
    fn test_exit_is_green() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();
        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });
        assert!(result.is_ok(), "drawing should succeed");

        let exit_cells = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.symbol() == block::FULL && cell.fg == Color::Green)
            .count();

        assert_eq!(exit_cells, usize::from(CELL_COLUMNS));
    }

    #[test]
    fn test_draw_pause_menu_over_game() {
        let mut app = create_test_app();
        app.screen = Screen::PauseMenu(PauseMenuItem::Resume);

        let screen = render(&app);

        assert!(screen.contains("Game Menu"), "the menu title should be shown");
        assert!(screen.contains("RESUME"), "the resume entry should be shown");
        assert!(screen.contains("MAIN MENU"), "the main menu entry should be shown");
        assert!(screen.contains("Level: 1"), "the game should stay visible");
    }

    #[test]
    fn test_in_game_without_game_fails() {
        let mut app = create_test_app();
        app.game = None;
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            assert!(
                in_game(&app, frame).is_err(),
                "in-game should fail without a running game"
            );
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if in_game fails"
        );
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(3));
            assert_eq!(layout.len(), 3, "main menu should have 3 items");

            let layout = init_menu(frame, MenuType::PauseMenu(2));
            assert_eq!(layout.len(), 2, "game menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }

    #[test]
    fn test_viewport_follows_player() {
        assert_eq!(viewport_origin(50, 101, 20), 40);
        assert_eq!(viewport_origin(2, 101, 20), 0);
        assert_eq!(viewport_origin(100, 101, 20), 81);
    }

    #[test]
    fn test_viewport_centers_small_labyrinth() {
        assert_eq!(viewport_origin(3, 6, 10), -2);
        assert_eq!(viewport_origin(0, 10, 10), 0);
    }

    #[test]
    fn test_cell_glyphs() {
        assert_eq!(cell_span(Some(Cell::Path), None).content, "  ");
        assert_eq!(cell_span(None, None).content, "  ");
        assert_eq!(
            cell_span(Some(Cell::Wall), Some(WallTexture::Stone)).content,
            block::FULL.repeat(2)
        );
        assert_eq!(
            cell_span(Some(Cell::Wall), Some(WallTexture::Brick)).content,
            shade::DARK.repeat(2)
        );
    }

    #[test]
    fn test_player_glyph_follows_facing() {
        let mut player = Player::spawn(glam::DVec2::ZERO, 0.0);
        assert_eq!(player_span(&player).content, "vv");

        player.yaw = 90.0;
        assert_eq!(player_span(&player).content, ">>");

        player.yaw = 180.0;
        assert_eq!(player_span(&player).content, "^^");

        player.yaw = 270.0;
        assert_eq!(player_span(&player).content, "<<");
    }
}
