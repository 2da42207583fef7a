//! Type definitions for menu navigation and input handling.

use crate::session::Intent;

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which item
/// is highlighted and what selecting it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    ///
    /// Selecting it generates a fresh maze and enters the game.
    StartGame,
    /// "Quit" menu option.
    ///
    /// Selecting it closes the application.
    Quit,
}

impl MainMenuItem {
    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::StartGame => Self::Quit,
            Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::StartGame => Self::StartGame,
            Self::Quit => Self::StartGame,
        }
    }

    /// Returns the label shown for the item, including its shortcut key.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::StartGame => "(1) Start Game",
            Self::Quit => "(2) Quit",
        }
    }
}

/// Action requested by a single key press.
///
/// Key presses are first translated into one of these, which keeps the translation independent of
/// the state it is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Close the application.
    Quit,
    /// Move the main menu cursor to the given item.
    Highlight(MainMenuItem),
    /// Forward an intent to the game session.
    Session(Intent),
    /// The key means nothing in the current context.
    Ignore,
}
