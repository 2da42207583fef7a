//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Rectangle},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{config::MazeParams, geometry::Aabb, session::State, types::MainMenuItem, App};

/// Main menu entries in display order.
const MENU_ITEMS: [MainMenuItem; 2] = [MainMenuItem::StartGame, MainMenuItem::Quit];

/// Updates the application UI based on the persistent state.
///
/// This function renders the screen matching the session state stored in the [`App`] structure.
///
/// # Errors
///
/// This function may return errors from layout computations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.session.state() {
        State::Menu => main_menu(frame, app.menu_item),
        State::Playing => in_game(app, frame)?,
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

/// Renders the centered, bordered menu box and returns one row per entry.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, entries: u16) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(entries + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title)
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); entries.into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with its "Start Game" and "Quit" entries and highlights
/// the one under the cursor.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, "Mazecrawl", 2);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (entry, area) in MENU_ITEMS.iter().zip(inner_layout.iter()) {
        let style = if *entry == item {
            active_content_style
        } else {
            content_style
        };

        frame.render_widget(Line::styled(entry.label(), style).centered(), *area);
    }
}

/// Computes the largest area inside `area` that shows the maze with square tiles.
///
/// Terminal cells are roughly twice as tall as they are wide, so a square tile needs two columns
/// for every row.
///
/// # Errors
///
/// This function may return errors if the grid dimensions do not fit the terminal coordinate
/// types.
pub(crate) fn fit_maze(area: Rect, params: &MazeParams) -> Result<Rect> {
    let cols = i32::try_from(params.cols)?;
    let rows = i32::try_from(params.rows)?;

    let mut height = i32::from(area.height);
    let scaled_width = height
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_mul(cols))
        .ok_or_eyre("maze is too wide to fit the terminal")?;
    let mut width = rounded_div::i32(scaled_width, rows);
    if width > i32::from(area.width) {
        width = i32::from(area.width);
        let scaled_height = width
            .checked_mul(rows)
            .ok_or_eyre("maze is too tall to fit the terminal")?;
        let double_cols = cols
            .checked_mul(2)
            .ok_or_eyre("maze is too wide to fit the terminal")?;
        height = rounded_div::i32(scaled_height, double_cols);
    }

    let width = u16::try_from(width.max(1))?;
    let height = u16::try_from(height.max(1))?;

    let column = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze column from horizontal layout")?;

    Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(column)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze area from vertical layout")
}

/// Converts a world box to a canvas rectangle.
///
/// World coordinates grow downwards while canvas coordinates grow upwards, so the box is mirrored
/// inside the vertical bounds `[top, bottom]`.
fn to_canvas(rect: &Aabb, top: f64, bottom: f64, color: Color) -> Rectangle {
    Rectangle {
        x: f64::from(rect.x),
        y: top + bottom - f64::from(rect.bottom()),
        width: f64::from(rect.width),
        height: f64::from(rect.height),
        color,
    }
}

/// Renders the in-game screen with the maze, the player, and the score.
///
/// This function draws every wall tile, the entrance and exit zones, and the player box onto a
/// [`Canvas`] whose bounds are the maze's world-space extent, so the world geometry is shown
/// unchanged and only scaled to the terminal.
///
/// # Errors
///
/// This function may return errors from layout computations or coordinate conversions.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = &app.session;
    let params = session.maze_params();
    let maze = session.maze();

    let overall_layout = Layout::vertical([
        Constraint::Length(1), // Score line
        Constraint::Min(1),    // Maze
        Constraint::Length(1), // Tooltip
    ])
    .split(frame.area());

    let header_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get header area from layout")?;
    let maze_content_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let mut header = format!("Score: {}", session.score());
    if !maze.exit_reachable() {
        header.push_str(" (exit sealed)");
    }
    frame.render_widget(
        Line::styled(header, Style::default().fg(Color::White)).right_aligned(),
        header_area,
    );

    let space = fit_maze(maze_content_area, params)?;
    let offset = params.offset();
    let left = f64::from(offset.x);
    let right = left + f64::from(params.maze_width());
    let top = f64::from(offset.y);
    let bottom = top + f64::from(params.maze_height());

    let player = session.player().bounds();
    let canvas = Canvas::default()
        .x_bounds([left, right])
        .y_bounds([top, bottom])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for wall in maze.walls() {
                ctx.draw(&to_canvas(wall, top, bottom, Color::White));
            }
            ctx.layer();
            ctx.draw(&to_canvas(&maze.entrance_zone(), top, bottom, Color::Green));
            ctx.draw(&to_canvas(&maze.exit_zone(), top, bottom, Color::Red));
            ctx.draw(&to_canvas(&player, top, bottom, Color::Blue));
        });

    frame.render_widget(canvas, space);

    let tooltip_block = Block::bordered()
        .title("(arrows) move / (2) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GameParams,
        session::{Direction, Intent},
    };
    use ratatui::{backend::TestBackend, Terminal};

    /// Creates a seeded test app.
    fn create_test_app() -> App {
        App::new(MazeParams::default(), GameParams::default(), Some(17))
            .expect("default parameters are valid")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Concatenates every symbol in the terminal buffer.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Mazecrawl"), "menu title is shown");
        assert!(text.contains("(1) Start Game"), "start entry is shown");
        assert!(text.contains("(2) Quit"), "quit entry is shown");
    }

    #[test]
    fn test_main_menu_quit_selected() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            main_menu(frame, MainMenuItem::Quit);
        });

        assert!(
            result.is_ok(),
            "rendering main menu with quit selected should succeed"
        );
    }

    #[test]
    fn test_draw_in_game() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        let _ = app.session.handle(Intent::Start);
        let _ = app.session.handle(Intent::Move(Direction::Down));

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing in-game screen should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"), "score is shown");
        assert!(text.contains("return to menu"), "tooltip is shown");
        assert!(!text.contains("exit sealed"), "default exit is never sealed");
    }

    #[test]
    fn test_in_game_on_tiny_terminal() {
        let mut app = create_test_app();
        let _ = app.session.handle(Intent::Start);
        let mut terminal =
            Terminal::new(TestBackend::new(10, 4)).expect("failed to create test terminal");

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("in-game should render on a tiny terminal");
        });

        assert!(result.is_ok(), "rendering on a tiny terminal should succeed");
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, "Mazecrawl", 2);
            assert_eq!(layout.len(), 2, "main menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }

    #[test]
    fn test_fit_maze_limited_by_height() {
        let area = Rect::new(0, 0, 80, 20);

        let fitted = fit_maze(area, &MazeParams::default()).expect("fits");

        assert_eq!(fitted, Rect::new(20, 0, 40, 20), "square maze takes two columns per row");
    }

    #[test]
    fn test_fit_maze_limited_by_width() {
        let area = Rect::new(0, 0, 30, 20);

        let fitted = fit_maze(area, &MazeParams::default()).expect("fits");

        assert_eq!(fitted.width, 30, "width is capped by the area");
        assert_eq!(fitted.height, 15, "height follows the aspect ratio");
    }

    #[test]
    fn test_fit_maze_rejects_oversized_grid() {
        let params = MazeParams {
            rows: 5,
            cols: 100_000_000,
            ..MazeParams::default()
        };

        let err = fit_maze(Rect::new(0, 0, 80, 20), &params)
            .expect_err("grid dimensions overflow the fitting arithmetic");
        assert!(err.to_string().contains("too wide"), "unexpected message: {err}");
    }

    #[test]
    fn test_to_canvas_flips_vertically() {
        let rect = Aabb::new(190.0, 90.0, 30.0, 30.0);

        let mirrored = to_canvas(&rect, 90.0, 510.0, Color::White);

        assert_eq!(
            (mirrored.x, mirrored.y, mirrored.width, mirrored.height),
            (190.0, 480.0, 30.0, 30.0),
            "top row of the world becomes the top row of the canvas"
        );
    }
}
