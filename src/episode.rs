use crate::board::Board;
use crate::config::Config;
use crate::error::Result;
use crate::grid::Cell;
use crate::layout::{self, RandomSource};
use crate::snake::Snake;
use crate::{Direction, Status};

use tracing::debug;

/// Everything that changes over one game, from reset to termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub snake: Snake,
    pub board: Board,
    pub score: u32,
    pub ticks: u32,
    pub status: Status,
    /// What the board was built from; ticks read rewards and food placement
    /// from here so they can't disagree with `board`.
    pub(crate) config: Config,
}

impl Episode {
    /// A fresh episode: a one cell snake heading right from the middle of the
    /// board, then obstacles and food drawn from `rng`.
    pub fn new<R: RandomSource + ?Sized>(config: &Config, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let head = Self::start_cell(config);
        let snake = Snake::new(head, Direction::Right);
        let (obstacles, food) = layout::generate(config, rng, &snake)?;

        debug!(%head, %food, obstacles = obstacles.len(), "episode reset");

        Ok(Self {
            snake,
            board: Board::new(config, obstacles, food),
            score: 0,
            ticks: 0,
            status: Status::Running,
            config: config.clone(),
        })
    }

    /// The centre of the board. On an odd number of columns (or rows) this
    /// truncates toward the top left.
    pub fn start_cell(config: &Config) -> Cell {
        Cell::from_grid(config.columns() / 2, config.rows() / 2, config.cell_size)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}
