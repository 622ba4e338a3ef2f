use crate::error::{Error, Result};
use crate::layout::MAX_OBSTACLE_RUN;

use serde::{Deserialize, Serialize};

use std::path::Path;

/// Board geometry and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board width in board units; a multiple of `cell_size`.
    pub width: i32,
    /// Board height in board units; a multiple of `cell_size`.
    pub height: i32,
    pub cell_size: i32,
    /// Number of obstacle runs placed on every reset.
    pub obstacle_count: u32,
    pub rewards: Rewards,
}

/// The reward contract handed back to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub food: i32,
    pub death: i32,
    /// An episode is cut off once it has run for more than this many ticks
    /// per body segment.
    pub stagnation_factor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            cell_size: 20,
            obstacle_count: 10,
            rewards: Rewards::default(),
        }
    }
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            food: 100,
            death: -10,
            stagnation_factor: 100,
        }
    }
}

impl Config {
    pub fn new(width: i32, height: i32, obstacle_count: u32) -> Self {
        Self {
            width,
            height,
            obstacle_count,
            ..Default::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cells(&self) -> usize {
        (self.columns() as usize) * (self.rows() as usize)
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(Error::InvalidConfig(msg));

        if self.cell_size <= 0 {
            return bad(format!("cell size must be positive, got {}", self.cell_size));
        }

        for &(name, dim) in &[("width", self.width), ("height", self.height)] {
            if dim <= 0 || dim % self.cell_size != 0 {
                return bad(format!(
                    "{} {} is not a positive multiple of the cell size {}",
                    name, dim, self.cell_size
                ));
            }

            // Coordinates reach at most one obstacle run past the far edge.
            let reach = i64::from(MAX_OBSTACLE_RUN) * i64::from(self.cell_size);
            if i64::from(dim) + reach > i64::from(i32::MAX) {
                return bad(format!(
                    "{} {} with cell size {} is too large to address",
                    name, dim, self.cell_size
                ));
            }

            // Obstacle anchors are drawn from [0, dim - 4 cells].
            let margin = 4 * self.cell_size;
            if self.obstacle_count > 0 && dim < margin {
                return bad(format!(
                    "{} {} leaves no room for obstacles (need at least {})",
                    name, dim, margin
                ));
            }
        }

        // Worst case every run is full length and disjoint; food still needs
        // somewhere to go next to the starting snake.
        let worst = u64::from(self.obstacle_count) * MAX_OBSTACLE_RUN as u64;
        if worst + 1 >= self.cells() as u64 {
            return bad(format!(
                "{} obstacles can cover up to {} of {} cells",
                self.obstacle_count,
                worst,
                self.cells()
            ));
        }

        if self.rewards.stagnation_factor == 0 {
            return bad("stagnation factor must be non-zero".to_string());
        }

        Ok(())
    }
}
