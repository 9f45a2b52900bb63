//! Labyrinth generation module.
//!
//! This module contains the [`Grid`] type holding a labyrinth layout and the [`Generator`] that
//! carves it with a randomised depth-first search, then places the exit on the open cell farthest
//! away from the start.

use std::collections::VecDeque;

use glam::DVec2;
use rand::{seq::IndexedRandom as _, Rng};
use tracing::debug;

use crate::error::GenerationError;

/// Side length of a grid cell in world units.
pub(crate) const CELL_SIZE: f64 = 2.0;

/// Height of a wall in world units.
///
/// The ceiling of every level sits at this elevation.
pub(crate) const WALL_HEIGHT: f64 = 3.0;

/// Offsets to the carvable neighbours of a cell: right, down, left, up.
const CARVE_DIRECTIONS: [(isize, isize); 4] = [(2, 0), (0, 2), (-2, 0), (0, -2)];

/// Offsets to the adjacent cells of a cell: right, down, left, up.
const STEP_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// State of a single labyrinth cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    /// Solid wall block.
    Wall,
    /// Carved corridor.
    Path,
    /// Corridor cell where the player spawns.
    Start,
    /// Corridor cell holding the exit of the level.
    Exit,
}

impl Cell {
    /// Returns whether the player may stand on this cell.
    pub(crate) const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Labyrinth layout stored row by row.
///
/// Both dimensions are always odd: corridors live on odd coordinates and the walls between them on
/// even ones, which keeps a solid wall ring around the whole grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Grid coordinates of the start cell.
    start: (usize, usize),
    /// Grid coordinates of the exit cell.
    exit: (usize, usize),
}

impl Grid {
    /// Creates a grid of the given size with every cell set to `cell`.
    fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
            start: (0, 0),
            exit: (0, 0),
        }
    }

    /// Number of columns.
    pub(crate) const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    /// Grid coordinates of the start cell.
    pub(crate) const fn start(&self) -> (usize, usize) {
        self.start
    }

    /// Grid coordinates of the exit cell.
    pub(crate) const fn exit(&self) -> (usize, usize) {
        self.exit
    }

    /// Returns the cell at column `x` and row `z`, or `None` outside the grid.
    pub(crate) fn get(&self, x: usize, z: usize) -> Option<Cell> {
        self.index(x, z)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Returns whether the cell at column `x` and row `z` can be walked on.
    ///
    /// Cells outside of the grid are never walkable.
    pub(crate) fn is_walkable(&self, x: usize, z: usize) -> bool {
        self.get(x, z).is_some_and(Cell::is_walkable)
    }

    /// Iterates over every cell together with its grid coordinates, row by row.
    pub(crate) fn iter(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            (
                (
                    idx.checked_rem(self.width).unwrap_or_default(),
                    idx.checked_div(self.width).unwrap_or_default(),
                ),
                *cell,
            )
        })
    }

    /// World position of the start cell centre on the floor plane.
    pub(crate) fn start_world(&self) -> DVec2 {
        cell_to_world(self.start.0, self.start.1)
    }

    /// World position of the exit cell centre on the floor plane.
    pub(crate) fn exit_world(&self) -> DVec2 {
        cell_to_world(self.exit.0, self.exit.1)
    }

    /// Maps grid coordinates to an index into the cell storage.
    const fn index(&self, x: usize, z: usize) -> Option<usize> {
        if x < self.width && z < self.height {
            Some(z * self.width + x)
        } else {
            None
        }
    }

    /// Overwrites the cell at the given coordinates; out of range coordinates are ignored.
    fn set(&mut self, (x, z): (usize, usize), cell: Cell) {
        if let Some(slot) = self.index(x, z).and_then(|idx| self.cells.get_mut(idx)) {
            *slot = cell;
        }
    }

    /// Returns the coordinates reached from `(x, z)` by the offset, if they stay inside the grid.
    fn offset(&self, (x, z): (usize, usize), (dx, dz): (isize, isize)) -> Option<(usize, usize)> {
        let next_x = x.checked_add_signed(dx)?;
        let next_z = z.checked_add_signed(dz)?;

        (next_x < self.width && next_z < self.height).then_some((next_x, next_z))
    }
}

/// Converts grid coordinates into the world position of the cell centre.
#[expect(
    clippy::cast_precision_loss,
    reason = "Grid dimensions are bounded far below the precision limit of an f64."
)]
pub(crate) fn cell_to_world(x: usize, z: usize) -> DVec2 {
    DVec2::new(x as f64 * CELL_SIZE, z as f64 * CELL_SIZE)
}

/// Converts a world position into the grid coordinates of the cell containing it.
///
/// Positions left of or above the grid clamp to the first column or row.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is rounded and clamped to be non-negative before the conversion."
)]
pub(crate) fn world_to_cell(position: DVec2) -> (usize, usize) {
    let cell = (position / CELL_SIZE).round().max(DVec2::ZERO);

    (cell.x as usize, cell.y as usize)
}

/// Randomised depth-first labyrinth generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Generator {
    /// Normalised (odd) number of columns.
    width: usize,
    /// Normalised (odd) number of rows.
    height: usize,
}

impl Generator {
    /// Creates a generator for a labyrinth of roughly `width` by `height` cells.
    ///
    /// Even dimensions are bumped to the next odd number so that the labyrinth is enclosed by
    /// walls on every side.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TooSmall`] when the normalised grid has fewer than two carvable
    /// cells, since the start and the exit must be different cells.
    pub(crate) const fn new(width: usize, height: usize) -> Result<Self, GenerationError> {
        let width = if width % 2 == 0 { width + 1 } else { width };
        let height = if height % 2 == 0 { height + 1 } else { height };

        if (width / 2) * (height / 2) < 2 {
            return Err(GenerationError::TooSmall { width, height });
        }

        Ok(Self { width, height })
    }

    /// Generates a new labyrinth.
    ///
    /// Corridors are carved from a random start cell with an explicit depth-first stack, which
    /// yields a perfect labyrinth: every open cell is reachable through exactly one path. The exit
    /// is then placed on the corridor cell farthest from the start.
    pub(crate) fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::filled(self.width, self.height, Cell::Wall);

        let start = (
            rng.random_range(0..self.width / 2) * 2 + 1,
            rng.random_range(0..self.height / 2) * 2 + 1,
        );
        grid.set(start, Cell::Path);

        let mut stack = vec![start];
        while let Some(&current) = stack.last() {
            let neighbours = self.unvisited_neighbours(&grid, current);

            if let Some(&next) = neighbours.choose(rng) {
                grid.set(
                    ((current.0 + next.0) / 2, (current.1 + next.1) / 2),
                    Cell::Path,
                );
                grid.set(next, Cell::Path);
                stack.push(next);
            } else {
                let _ = stack.pop();
            }
        }

        grid.start = start;
        grid.set(start, Cell::Start);

        let (exit, distance) = farthest_path_cell(&grid, start);
        grid.exit = exit;
        grid.set(exit, Cell::Exit);

        debug!(
            width = self.width,
            height = self.height,
            ?start,
            ?exit,
            distance,
            "generated labyrinth"
        );

        grid
    }

    /// Collects the carvable cells two steps away from `current` that are still solid.
    ///
    /// Candidates on the outer ring are rejected so the border stays intact.
    fn unvisited_neighbours(&self, grid: &Grid, current: (usize, usize)) -> Vec<(usize, usize)> {
        CARVE_DIRECTIONS
            .iter()
            .filter_map(|&direction| grid.offset(current, direction))
            .filter(|&(x, z)| {
                x > 0
                    && x < self.width - 1
                    && z > 0
                    && z < self.height - 1
                    && grid.get(x, z) == Some(Cell::Wall)
            })
            .collect()
    }
}

/// Finds the corridor cell with the greatest walking distance from `start`.
///
/// Runs a breadth-first search over walkable cells. Ties keep the first cell reached, and when no
/// corridor cell is reachable the start itself is returned with a distance of zero.
fn farthest_path_cell(grid: &Grid, start: (usize, usize)) -> ((usize, usize), usize) {
    let mut distances: Vec<Option<usize>> = vec![None; grid.width * grid.height];
    let mut queue = VecDeque::from([(start, 0_usize)]);

    if let Some(slot) = grid
        .index(start.0, start.1)
        .and_then(|idx| distances.get_mut(idx))
    {
        *slot = Some(0);
    }

    let mut farthest = (start, 0);
    while let Some((current, distance)) = queue.pop_front() {
        if distance > farthest.1 && grid.get(current.0, current.1) == Some(Cell::Path) {
            farthest = (current, distance);
        }

        for direction in STEP_DIRECTIONS {
            let Some(next) = grid.offset(current, direction) else {
                continue;
            };
            if !grid.is_walkable(next.0, next.1) {
                continue;
            }
            let Some(slot) = grid
                .index(next.0, next.1)
                .and_then(|idx| distances.get_mut(idx))
            else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(distance + 1);
                queue.push_back((next, distance + 1));
            }
        }
    }

    farthest
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    /// Generates a grid with a fixed seed.
    fn seeded_grid(width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        Generator::new(width, height)
            .expect("dimensions should be valid")
            .generate(&mut rng)
    }

    /// Computes walking distances from `start` over walkable cells.
    fn distances_from(grid: &Grid, start: (usize, usize)) -> Vec<((usize, usize), usize)> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0)]);
        let mut result = Vec::new();

        while let Some((current, distance)) = queue.pop_front() {
            result.push((current, distance));
            for direction in STEP_DIRECTIONS {
                if let Some(next) = grid.offset(current, direction) {
                    if grid.is_walkable(next.0, next.1) && seen.insert(next) {
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }

        result
    }

    #[test]
    fn test_even_dimensions_become_odd() {
        let generator = Generator::new(20, 20).expect("dimensions should be valid");

        assert_eq!(
            generator,
            Generator {
                width: 21,
                height: 21
            }
        );

        let generator = Generator::new(7, 10).expect("dimensions should be valid");

        assert_eq!((generator.width, generator.height), (7, 11));
    }

    #[test]
    fn test_too_small_dimensions_are_rejected() {
        assert_eq!(
            Generator::new(3, 3),
            Err(GenerationError::TooSmall {
                width: 3,
                height: 3
            })
        );
        assert!(
            Generator::new(0, 0).is_err(),
            "an empty grid should be rejected"
        );
        assert!(
            Generator::new(5, 3).is_ok(),
            "two carvable cells should be enough"
        );
    }

    #[test]
    fn test_border_is_solid() {
        let grid = seeded_grid(20, 14, 7);

        for ((x, z), cell) in grid.iter() {
            if x == 0 || z == 0 || x == grid.width() - 1 || z == grid.height() - 1 {
                assert_eq!(cell, Cell::Wall, "border cell ({x}, {z}) should be a wall");
            }
        }
    }

    #[test]
    fn test_every_carvable_cell_is_open() {
        let grid = seeded_grid(15, 11, 3);

        for ((x, z), cell) in grid.iter() {
            if x % 2 == 1 && z % 2 == 1 {
                assert!(cell.is_walkable(), "cell ({x}, {z}) should be carved");
            }
            if x % 2 == 0 && z % 2 == 0 {
                assert_eq!(cell, Cell::Wall, "pillar ({x}, {z}) should stay solid");
            }
        }
    }

    #[test]
    fn test_labyrinth_is_perfect() {
        let grid = seeded_grid(21, 21, 42);

        let open: Vec<(usize, usize)> = grid
            .iter()
            .filter(|(_, cell)| cell.is_walkable())
            .map(|(coords, _)| coords)
            .collect();
        let edges = open
            .iter()
            .map(|&(x, z)| {
                usize::from(grid.is_walkable(x + 1, z)) + usize::from(grid.is_walkable(x, z + 1))
            })
            .sum::<usize>();
        let reachable = distances_from(&grid, grid.start()).len();

        assert_eq!(reachable, open.len(), "every open cell should be reachable");
        assert_eq!(edges, open.len() - 1, "the corridors should form a tree");
    }

    #[test]
    fn test_single_start_and_exit() {
        let grid = seeded_grid(21, 21, 9);

        let starts: Vec<_> = grid.iter().filter(|(_, cell)| *cell == Cell::Start).collect();
        let exits: Vec<_> = grid.iter().filter(|(_, cell)| *cell == Cell::Exit).collect();

        assert_eq!(starts, vec![(grid.start(), Cell::Start)]);
        assert_eq!(exits, vec![(grid.exit(), Cell::Exit)]);
        assert_ne!(grid.start(), grid.exit());
    }

    #[test]
    fn test_exit_is_farthest_from_start() {
        for seed in 0..16 {
            let grid = seeded_grid(13, 17, seed);
            let distances = distances_from(&grid, grid.start());

            let max = distances
                .iter()
                .map(|(_, distance)| *distance)
                .max()
                .expect("there should be reachable cells");
            let exit_distance = distances
                .iter()
                .find(|(coords, _)| *coords == grid.exit())
                .map(|(_, distance)| *distance)
                .expect("the exit should be reachable");

            assert_eq!(exit_distance, max, "seed {seed} placed the exit too close");
        }
    }

    #[test]
    fn test_start_on_odd_coordinates() {
        for seed in 0..16 {
            let (x, z) = seeded_grid(11, 9, seed).start();

            assert!(x % 2 == 1 && z % 2 == 1, "start ({x}, {z}) should be odd");
        }
    }

    #[test]
    fn test_same_seed_same_labyrinth() {
        assert_eq!(seeded_grid(21, 21, 1234), seeded_grid(21, 21, 1234));
    }

    #[test]
    fn test_smallest_labyrinth() {
        let grid = seeded_grid(5, 3, 0);

        assert_eq!(grid.get(2, 1), Some(Cell::Path));
        let mut ends = [grid.start(), grid.exit()];
        ends.sort_unstable();
        assert_eq!(ends, [(1, 1), (3, 1)]);
    }

    #[test]
    fn test_world_coordinates() {
        assert_eq!(cell_to_world(3, 5), DVec2::new(6.0, 10.0));
        assert_eq!(world_to_cell(DVec2::new(6.9, 9.1)), (3, 5));
        assert_eq!(world_to_cell(DVec2::new(-3.0, -0.5)), (0, 0));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = seeded_grid(5, 5, 0);

        assert_eq!(grid.get(5, 0), None);
        assert!(!grid.is_walkable(0, 99), "out of range cells are not walkable");
    }
}
