//! Obstacle and food placement.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::Cell;
use crate::snake::Snake;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use tracing::trace;

use std::collections::BTreeSet;

/// Longest obstacle run, in cells.
pub const MAX_OBSTACLE_RUN: i32 = 10;

/// Anchors stay this many cells away from the right and bottom edges.
const ANCHOR_MARGIN: i32 = 4;

/// Where layout randomness comes from.
pub trait RandomSource {
    /// A uniformly distributed integer in `low..=high`.
    fn int_in(&mut self, low: i32, high: i32) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        Uniform::new_inclusive(low, high).sample(self)
    }
}

/// Lays down `config.obstacle_count` horizontal runs of obstacle cells.
///
/// Each run is anchored on the grid at least `ANCHOR_MARGIN` cells from the
/// right and bottom edges, is 1 to `MAX_OBSTACLE_RUN` cells wide and exactly
/// one cell tall. Runs may poke past the right edge; those cells are walls
/// anyway and are dropped. Cells in `reserved` are never obstacles.
pub fn obstacles<R: RandomSource + ?Sized>(
    config: &Config,
    rng: &mut R,
    reserved: &[Cell],
) -> BTreeSet<Cell> {
    let cs = config.cell_size;
    let mut set = BTreeSet::new();

    for _ in 0..config.obstacle_count {
        let x = rng.int_in(0, (config.width - ANCHOR_MARGIN * cs) / cs) * cs;
        let y = rng.int_in(0, (config.height - ANCHOR_MARGIN * cs) / cs) * cs;

        let w = rng.int_in(1, MAX_OBSTACLE_RUN) * cs;
        // Always one row; the draw is kept so layouts line up seed for seed.
        let h = rng.int_in(1, 1) * cs;

        trace!(x, y, w, h, "obstacle run");

        for col in (x..x + w).step_by(cs as usize) {
            for row in (y..y + h).step_by(cs as usize) {
                let cell = Cell::new(col, row);

                if cell.within(config.width, config.height, cs) && !reserved.contains(&cell) {
                    set.insert(cell);
                }
            }
        }
    }

    set
}

/// Picks a random cell that's neither snake nor obstacle.
///
/// Guessing is cheap and almost always succeeds quickly, so we guess first.
/// The expected number of guesses is `cells / free`, which only blows up when
/// the board is nearly full; after `0.78 * cells` misses we stop guessing and
/// pick uniformly from an explicit list of the free cells instead. If there
/// are none, that's an error rather than a hang.
pub fn place_food<R: RandomSource + ?Sized>(
    config: &Config,
    rng: &mut R,
    snake: &Snake,
    obstacles: &BTreeSet<Cell>,
) -> Result<Cell> {
    let cs = config.cell_size;
    let (cols, rows) = (config.columns(), config.rows());
    let taken = |c: &Cell| snake.contains(*c) || obstacles.contains(c);

    let guesses = (0.78f32 * config.cells() as f32).ceil() as usize;

    for _ in 0..guesses {
        let x = rng.int_in(0, cols - 1) * cs;
        let y = rng.int_in(0, rows - 1) * cs;
        let pos = Cell::new(x, y);

        if !taken(&pos) {
            return Ok(pos);
        }
    }

    let free: Vec<Cell> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| Cell::from_grid(c, r, cs)))
        .filter(|c| !taken(c))
        .collect();

    if free.is_empty() {
        return Err(Error::NoFreeCell {
            width: config.width,
            height: config.height,
        });
    }

    let idx = rng.int_in(0, free.len() as i32 - 1);
    Ok(free[idx as usize])
}

/// Obstacles and the first food pellet for a fresh episode. The snake's
/// cells are kept clear of obstacles.
pub fn generate<R: RandomSource + ?Sized>(
    config: &Config,
    rng: &mut R,
    snake: &Snake,
) -> Result<(BTreeSet<Cell>, Cell)> {
    let reserved: Vec<Cell> = snake.iter().copied().collect();

    let obstacles = obstacles(config, rng, &reserved);
    let food = place_food(config, rng, snake, &obstacles)?;

    Ok((obstacles, food))
}
