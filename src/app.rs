//! Core application state and main loop for the maze game.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::{GameParams, MazeParams},
    events,
    session::Session,
    types::MainMenuItem,
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui renders the game and Crossterm events write to. Game rules live in the [`Session`];
/// this structure only adds what the terminal front end needs on top of it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Highlighted main menu entry.
    ///
    /// This field holds the item under the menu cursor. It is only meaningful while the session is
    /// in the menu state.
    pub(crate) menu_item: MainMenuItem,
    /// Game session driven by this front end.
    ///
    /// This field owns the maze, the player, the score, and the menu/playing state machine.
    pub(crate) session: Session,
}

impl App {
    /// Creates a new application on the main menu.
    ///
    /// `seed` fixes the sequence of generated mazes; without one every run differs.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze or game parameters fail validation.
    pub fn new(maze: MazeParams, game: GameParams, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            exit: false,
            menu_item: MainMenuItem::StartGame,
            session: Session::new(maze, game, seed)?,
        })
    }

    /// Returns the game session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration draws a frame, handles at most one key press, and resolves the goal check.
    /// The loop continues until the exit condition is `true`, after which the function returns to
    /// the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
            let _ = self.session.tick();
        }

        Ok(())
    }
}
