//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    session::{Direction, Intent, State},
    types::{Command, MainMenuItem},
    App,
};

/// Input poll timeout in milliseconds.
///
/// This constant bounds how long the loop waits for a key before moving on to the next frame, so
/// the goal check keeps running at roughly thirty frames per second while the player is idle.
pub(crate) const FRAME_POLL_MS: u64 = 33;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events with a timeout to avoid blocking the frame, translates
/// the pressed key into a [`Command`], and applies it.
///
/// # Errors
///
/// This function may return errors from polling or reading terminal events.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                apply(app, command_for(app.session.state(), app.menu_item, key));
            }
        }
    }

    Ok(())
}

/// Translates a key press into a command for the given state.
///
/// The menu reads `1` and `2` as direct shortcuts and `j`/`k`/arrows plus `l`/Enter as cursor
/// navigation. In game the arrows move the player and `2` or Esc returns to the menu. `q` and
/// Ctrl-C quit from anywhere.
pub(crate) fn command_for(state: State, item: MainMenuItem, key: KeyEvent) -> Command {
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Command::Quit;
    }

    match state {
        State::Menu => menu_command(item, key.code),
        State::Playing => game_command(key.code),
    }
}

/// Translates a key pressed while the main menu is shown.
const fn menu_command(item: MainMenuItem, code: KeyCode) -> Command {
    match code {
        KeyCode::Char('1') => Command::Session(Intent::Start),
        KeyCode::Char('2') => Command::Quit,
        KeyCode::Char('j') | KeyCode::Down => Command::Highlight(item.next()),
        KeyCode::Char('k') | KeyCode::Up => Command::Highlight(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::StartGame => Command::Session(Intent::Start),
            MainMenuItem::Quit => Command::Quit,
        },
        _ => Command::Ignore,
    }
}

/// Translates a key pressed while the maze is shown.
const fn game_command(code: KeyCode) -> Command {
    match code {
        KeyCode::Up => Command::Session(Intent::Move(Direction::Up)),
        KeyCode::Down => Command::Session(Intent::Move(Direction::Down)),
        KeyCode::Left => Command::Session(Intent::Move(Direction::Left)),
        KeyCode::Right => Command::Session(Intent::Move(Direction::Right)),
        KeyCode::Char('2') | KeyCode::Esc => Command::Session(Intent::ReturnToMenu),
        _ => Command::Ignore,
    }
}

/// Applies a command to the application state.
///
/// Returning to the menu always leaves the cursor on "Start Game", the way the menu first opens.
pub(crate) fn apply(app: &mut App, command: Command) {
    match command {
        Command::Quit => app.exit = true,
        Command::Highlight(item) => app.menu_item = item,
        Command::Session(intent) => {
            let _ = app.session.handle(intent);
            if app.session.state() == State::Menu {
                app.menu_item = MainMenuItem::StartGame;
            }
        }
        Command::Ignore => {}
    }
}
