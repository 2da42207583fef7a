//! Maze generation by randomized depth-first carving.
//!
//! A maze starts out as a grid made entirely of walls. Carving walks the grid in steps of two
//! cells from the entrance, opening the destination cell and the connector between the two, so
//! corridors and walls are both one cell wide. Every carved cell is visited exactly once, which
//! makes the carved region a spanning tree: a perfect maze.

use std::collections::BTreeSet;

use color_eyre::eyre::Result;
use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};

use crate::{config::MazeParams, geometry::Aabb};

/// Carving displacements: down, right, up, left, two cells at a time.
const CARVE_STEPS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// Displacements to the four edge-adjacent neighbours of a cell.
const NEIGHBOUR_STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Zero-based grid coordinate, `x` being the column and `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoord {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl CellCoord {
    /// Builds a coordinate from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate displaced by `(dx, dy)`, or `None` if it would go negative.
    #[must_use]
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        match (self.x.checked_add_signed(dx), self.y.checked_add_signed(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Impassable cell.
    ///
    /// Every cell in this state becomes one wall box, which is both drawn and collided with.
    Wall,
    /// Passable cell.
    ///
    /// Cells start out walled and are switched to this state by carving, plus the exit cell.
    Path,
}

/// Rectangular grid of cells stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Cell states, `cols` per row.
    ///
    /// This field always holds exactly `rows * cols` entries; the cell at `(x, y)` lives at index
    /// `y * cols + x`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid where every cell is a wall.
    #[must_use]
    pub fn walled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Wall; rows.saturating_mul(cols)],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Maps a coordinate to its position in the cell vector.
    fn index(&self, coord: CellCoord) -> Option<usize> {
        (coord.x < self.cols && coord.y < self.rows).then(|| coord.y * self.cols + coord.x)
    }

    /// Returns the state of a cell, or `None` if the coordinate lies outside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.index(coord)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Overwrites the state of a cell. Out-of-grid coordinates are ignored.
    fn set(&mut self, coord: CellCoord, cell: Cell) {
        if let Some(slot) = self.index(coord).and_then(|idx| self.cells.get_mut(idx)) {
            *slot = cell;
        }
    }

    /// Checks whether a cell exists and is passable.
    #[must_use]
    pub fn is_path(&self, coord: CellCoord) -> bool {
        self.cell(coord) == Some(Cell::Path)
    }

    /// Checks whether a coordinate lies on the outer ring of the grid.
    #[must_use]
    pub const fn is_border(&self, coord: CellCoord) -> bool {
        coord.x == 0 || coord.y == 0 || coord.x + 1 == self.cols || coord.y + 1 == self.rows
    }

    /// Checks whether a coordinate lies strictly inside the border.
    #[must_use]
    pub const fn is_interior(&self, coord: CellCoord) -> bool {
        coord.x > 0 && coord.y > 0 && coord.x + 1 < self.cols && coord.y + 1 < self.rows
    }

    /// Iterates over every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |y| (0..cols).map(move |x| CellCoord::new(x, y)))
    }

    /// Iterates over the in-grid neighbours sharing an edge with `coord`.
    pub fn neighbours(&self, coord: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        NEIGHBOUR_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| coord.offset(dx, dy))
            .filter(move |next| self.index(*next).is_some())
    }

    /// Counts the passable cells.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Path).count()
    }

    /// Counts the wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Wall).count()
    }

    /// Collects every passable cell connected to `start` through edge-adjacent passable cells.
    ///
    /// This function flood-fills from `start` with an explicit stack and never walks through
    /// walls. The result is empty when `start` itself is not passable.
    #[must_use]
    pub fn reachable_from(&self, start: CellCoord) -> BTreeSet<CellCoord> {
        let mut seen = BTreeSet::new();
        if !self.is_path(start) {
            return seen;
        }

        let _ = seen.insert(start);
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for next in self.neighbours(current) {
                if self.is_path(next) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        seen
    }
}

/// A single carving step: `from` was linked to `to` by opening the `via` cell between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passage {
    /// Cell the carving step started from.
    pub from: CellCoord,
    /// Connector cell opened between the two.
    pub via: CellCoord,
    /// Newly opened cell.
    pub to: CellCoord,
}

/// A generated maze: its grid, the derived world geometry, and the carving record.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    /// Cell states after carving.
    grid: Grid,
    /// One box per wall cell, in row-major order.
    ///
    /// This field is derived from `grid` once at generation time, already shifted by the
    /// viewport offset, so collision checks never touch the grid.
    walls: Vec<Aabb>,
    /// World box of the entrance cell.
    entrance_zone: Aabb,
    /// World box of the exit cell.
    exit_zone: Aabb,
    /// Entrance cell.
    start_cell: CellCoord,
    /// Exit cell.
    end_cell: CellCoord,
    /// Carving steps in the order they were taken.
    passages: Vec<Passage>,
    /// Whether the exit is connected to the entrance.
    ///
    /// This field is computed by a flood fill after the exit has been opened, so it reflects the
    /// final grid rather than the carving record.
    exit_reachable: bool,
}

impl Maze {
    /// Returns the carved grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the wall boxes the player collides with.
    #[must_use]
    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    /// Returns the world box of the entrance cell. Its corner is where the player spawns.
    #[must_use]
    pub const fn entrance_zone(&self) -> Aabb {
        self.entrance_zone
    }

    /// Returns the world box of the exit cell, the goal area.
    #[must_use]
    pub const fn exit_zone(&self) -> Aabb {
        self.exit_zone
    }

    /// Returns the entrance cell.
    #[must_use]
    pub const fn start_cell(&self) -> CellCoord {
        self.start_cell
    }

    /// Returns the exit cell.
    #[must_use]
    pub const fn end_cell(&self) -> CellCoord {
        self.end_cell
    }

    /// Returns the carving steps in the order they were taken.
    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Collects the cells opened by carving: the entrance plus both cells of every passage.
    ///
    /// The exit only appears here if carving reached it on its own.
    #[must_use]
    pub fn carved_cells(&self) -> BTreeSet<CellCoord> {
        let mut cells = BTreeSet::from([self.start_cell]);
        cells.extend(
            self.passages
                .iter()
                .flat_map(|passage| [passage.via, passage.to]),
        );

        cells
    }

    /// Checks whether the player can walk from the entrance to the exit.
    ///
    /// The exit is opened after carving regardless of whether carving reached it, so on some grid
    /// shapes it can end up sealed off from the rest of the maze.
    #[must_use]
    pub const fn exit_reachable(&self) -> bool {
        self.exit_reachable
    }
}

/// Generates a maze for the given parameters, drawing randomness from `rng`.
///
/// This function carves from [`MazeParams::ENTRANCE`], opens the exit cell whether or not carving
/// reached it, and derives the wall boxes and zones from the result. The same parameters and the
/// same random sequence always give the same maze.
///
/// The parameters are expected to have passed [`MazeParams::validate`]; unvalidated degenerate
/// grids produce a maze with no carved interior rather than a panic.
pub fn generate<R: Rng + ?Sized>(params: &MazeParams, rng: &mut R) -> Maze {
    let start_cell = MazeParams::ENTRANCE;
    let end_cell = params.exit();

    let mut grid = Grid::walled(params.rows, params.cols);
    let passages = carve(&mut grid, start_cell, rng);
    grid.set(end_cell, Cell::Path);

    let walls: Vec<Aabb> = grid
        .coords()
        .filter(|coord| grid.cell(*coord) == Some(Cell::Wall))
        .map(|coord| params.cell_rect(coord))
        .collect();

    let exit_reachable = grid.reachable_from(start_cell).contains(&end_cell);
    if !exit_reachable {
        warn!(
            "exit ({}, {}) is sealed off from the entrance",
            end_cell.x, end_cell.y
        );
    }
    debug!(
        "generated {}x{} maze with {} passages and {} walls",
        params.cols,
        params.rows,
        passages.len(),
        walls.len()
    );

    Maze {
        entrance_zone: params.cell_rect(start_cell),
        exit_zone: params.cell_rect(end_cell),
        grid,
        walls,
        start_cell,
        end_cell,
        passages,
        exit_reachable,
    }
}

/// Carves passages into `grid` starting from `start` and returns them in carving order.
///
/// Cells are taken from an explicit stack; each one tries its four two-step neighbours in random
/// order and opens every neighbour that is still walled and strictly inside the border.
fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: CellCoord, rng: &mut R) -> Vec<Passage> {
    let mut passages = Vec::new();

    grid.set(start, Cell::Path);
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        let mut steps = CARVE_STEPS;
        steps.shuffle(rng);

        for (dx, dy) in steps {
            let Some(next) = current.offset(dx, dy) else {
                continue;
            };
            if !grid.is_interior(next) || grid.is_path(next) {
                continue;
            }
            let Some(via) = current.offset(dx / 2, dy / 2) else {
                continue;
            };

            grid.set(next, Cell::Path);
            grid.set(via, Cell::Path);
            passages.push(Passage {
                from: current,
                via,
                to: next,
            });
            stack.push(next);
        }
    }

    passages
}

/// Maze factory owning its parameters and random source.
///
/// The random source is seeded once at construction, so a generator built with a fixed seed
/// yields the same sequence of mazes every run.
#[derive(Clone, Debug)]
pub struct Generator {
    /// Validated grid and viewport parameters.
    params: MazeParams,
    /// Source of the carving order.
    ///
    /// This field is advanced by every generated maze, so consecutive mazes differ even with a
    /// fixed seed.
    rng: StdRng,
}

impl Generator {
    /// Builds a generator, seeding it from `seed` or from OS entropy when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail [`MazeParams::validate`].
    pub fn new(params: MazeParams, seed: Option<u64>) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            params,
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        })
    }

    /// Returns the parameters mazes are generated with.
    #[must_use]
    pub const fn params(&self) -> &MazeParams {
        &self.params
    }

    /// Generates the next maze.
    pub fn generate(&mut self) -> Maze {
        generate(&self.params, &mut self.rng)
    }
}
