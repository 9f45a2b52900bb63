//! Type definitions and enums for the application state and navigation.

use crate::config::TITLE;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the menu shown at startup and after leaving a game.
    MainMenu(MainMenuItem),
    /// Controls and goal of the game.
    Instructions,
    /// Labyrinth being played.
    InGame,
    /// Game menu opened on top of a running game.
    ///
    /// The game underneath is kept as is and resumes where it stopped.
    PauseMenu(PauseMenuItem),
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// Starts a new game from the first level.
    Play,
    /// Shows the instructions screen.
    Instructions,
    /// Leaves the application.
    Exit,
}

impl MainMenuItem {
    /// Every item, in display order.
    pub(crate) const ALL: [Self; 3] = [Self::Play, Self::Instructions, Self::Exit];

    /// Text shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Play => "PLAY",
            Self::Instructions => "INSTRUCTIONS",
            Self::Exit => "EXIT",
        }
    }
}

/// Game menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PauseMenuItem {
    /// Goes back to the running game.
    Resume,
    /// Abandons the running game and shows the main menu.
    MainMenu,
}

impl PauseMenuItem {
    /// Every item, in display order.
    pub(crate) const ALL: [Self; 2] = [Self::Resume, Self::MainMenu];

    /// Text shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Resume => "RESUME",
            Self::MainMenu => "MAIN MENU",
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Both menus share their layout and only differ in title and entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuType {
    /// Main menu configuration, with its number of entries.
    MainMenu(u8),
    /// Game menu configuration, with its number of entries.
    PauseMenu(u8),
}

impl MenuType {
    /// Returns the title rendered in the menu's border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => TITLE,
            Self::PauseMenu(_) => "Game Menu",
        }
    }

    /// Returns the number of menu entries, used to size the menu container.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::PauseMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::Play);
        let pause_menu = Screen::PauseMenu(PauseMenuItem::Resume);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::Play));
        assert_ne!(main_menu, Screen::MainMenu(MainMenuItem::Exit));
        assert_ne!(pause_menu, Screen::InGame);
        assert_ne!(Screen::Instructions, Screen::InGame);
    }

    #[test]
    fn test_item_labels() {
        let main: Vec<&str> = MainMenuItem::ALL.iter().map(|item| item.label()).collect();
        let pause: Vec<&str> = PauseMenuItem::ALL.iter().map(|item| item.label()).collect();

        assert_eq!(main, vec!["PLAY", "INSTRUCTIONS", "EXIT"]);
        assert_eq!(pause, vec!["RESUME", "MAIN MENU"]);
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(3).repr(), "Labyrinth");
        assert_eq!(MenuType::PauseMenu(2).repr(), "Game Menu");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(3).value(), 3);
        assert_eq!(MenuType::PauseMenu(2).value(), 2);
        assert_eq!(MenuType::PauseMenu(0).value(), 0);
    }
}
