//! Maze and gameplay parameters.
//!
//! The defaults describe a 14 by 14 grid of 30 unit tiles centered in an 800 by 600 viewport, a
//! 20 unit player moving 5 units per key press, and 100 points per exit reached.

use color_eyre::eyre::{ensure, Result};

use crate::{
    geometry::{Aabb, Vec2},
    maze::CellCoord,
};

/// Smallest number of rows or columns a maze may have.
///
/// Five cells leave room for the border, the entrance at `(1, 1)`, and an exit that differs from
/// it and does not touch the border.
pub const MIN_CELLS: usize = 5;

/// Geometry of the maze grid and of the viewport it is centered in.
///
/// This structure is what the generator is built from. Nothing in it is checked on construction;
/// call [`MazeParams::validate`] before handing it to anything that carves or draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeParams {
    /// Number of grid rows.
    ///
    /// This field counts the border rows too, so only `rows - 2` rows can ever be carved.
    pub rows: usize,
    /// Number of grid columns.
    ///
    /// This field counts the border columns too, just like `rows`.
    pub cols: usize,
    /// Side length of one grid cell in world units.
    ///
    /// This field scales every wall box, the entrance and exit zones, and the corridor width the
    /// player has to fit through.
    pub tile_size: f32,
    /// Viewport width in world units.
    pub viewport_width: f32,
    /// Viewport height in world units.
    pub viewport_height: f32,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            rows: 14,
            cols: 14,
            tile_size: 30.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl MazeParams {
    /// Entrance cell, just inside the top-left corner.
    ///
    /// This constant does not depend on the grid size: carving always starts here and the player
    /// always spawns on it.
    pub const ENTRANCE: CellCoord = CellCoord::new(1, 1);

    /// Checks that the parameters describe a maze that can be carved and displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is smaller than [`MIN_CELLS`] on either axis, if the tile size
    /// is not a positive finite number, or if the viewport is not finite or cannot hold the whole
    /// maze.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.rows >= MIN_CELLS && self.cols >= MIN_CELLS,
            "maze must be at least {MIN_CELLS}x{MIN_CELLS} cells, got {}x{}",
            self.cols,
            self.rows
        );
        ensure!(
            self.tile_size.is_finite() && self.tile_size > 0.0,
            "tile size must be a positive number, got {}",
            self.tile_size
        );
        ensure!(
            self.viewport_width.is_finite() && self.viewport_height.is_finite(),
            "viewport dimensions must be finite"
        );
        ensure!(
            self.viewport_width >= self.maze_width() && self.viewport_height >= self.maze_height(),
            "viewport {}x{} cannot hold a {}x{} maze",
            self.viewport_width,
            self.viewport_height,
            self.maze_width(),
            self.maze_height()
        );

        Ok(())
    }

    /// Returns the width of the whole grid in world units.
    #[must_use]
    pub fn maze_width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// Returns the height of the whole grid in world units.
    #[must_use]
    pub fn maze_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Returns the offset that centers the grid in the viewport.
    ///
    /// This function splits the spare viewport space evenly on both sides of each axis. Every
    /// world coordinate in a maze is shifted by it.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        let spare_width = self.viewport_width - self.maze_width();
        let spare_height = self.viewport_height - self.maze_height();

        Vec2::new(spare_width / 2.0, spare_height / 2.0)
    }

    /// Returns the world-space box covered by a grid cell.
    ///
    /// This function does not check the coordinate against the grid, so it also places cells
    /// outside of it.
    #[must_use]
    pub fn cell_rect(&self, cell: CellCoord) -> Aabb {
        let offset = self.offset();

        Aabb::new(
            (cell.x as f32).mul_add(self.tile_size, offset.x),
            (cell.y as f32).mul_add(self.tile_size, offset.y),
            self.tile_size,
            self.tile_size,
        )
    }

    /// Returns the exit cell, near the bottom-right corner.
    ///
    /// The exit sits one column in from the right border and two rows up from the bottom one.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        CellCoord::new(self.cols.saturating_sub(2), self.rows.saturating_sub(3))
    }
}

/// Player and scoring parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameParams {
    /// Side length of the square player box in world units.
    ///
    /// This field must stay strictly below the maze tile size, otherwise the player cannot enter
    /// a one cell corridor.
    pub player_size: f32,
    /// Distance covered by a single move intent in world units.
    ///
    /// This field is applied in one go: a move either covers the whole distance or does not
    /// happen at all.
    pub player_speed: f32,
    /// Points awarded each time the exit is reached.
    pub goal_reward: u64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            player_size: 20.0,
            player_speed: 5.0,
            goal_reward: 100,
        }
    }
}

impl GameParams {
    /// Checks that the player fits the corridors of the given maze.
    ///
    /// # Errors
    ///
    /// Returns an error if the player size or speed is not a positive finite number, or if the
    /// player is not strictly smaller than a maze tile.
    pub fn validate(&self, maze: &MazeParams) -> Result<()> {
        ensure!(
            self.player_size.is_finite() && self.player_size > 0.0,
            "player size must be a positive number, got {}",
            self.player_size
        );
        ensure!(
            self.player_size < maze.tile_size,
            "player size {} does not fit in a {} unit corridor",
            self.player_size,
            maze.tile_size
        );
        ensure!(
            self.player_speed.is_finite() && self.player_speed > 0.0,
            "player speed must be a positive number, got {}",
            self.player_speed
        );

        Ok(())
    }

    /// Returns the player box size as a vector.
    #[must_use]
    pub const fn player_extent(&self) -> Vec2 {
        Vec2::splat(self.player_size)
    }
}
