use crate::config::Config;
use crate::grid::Cell;

use std::collections::BTreeSet;

/// The static part of an episode plus the current food pellet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub obstacles: BTreeSet<Cell>,
    pub food: Cell,
}

impl Board {
    pub fn new(config: &Config, obstacles: BTreeSet<Cell>, food: Cell) -> Self {
        Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            obstacles,
            food,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.within(self.width, self.height, self.cell_size)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }
}
