//! Snake, with obstacles and a reward signal.

use super::{Cell, SnakeGame, Status, Turn};
use crate::config::Config;
use crate::engine::Step;
use crate::episode::Episode;
use crate::error::Result;
use crate::layout::RandomSource;
use crate::render::Frame;

use std::fmt::{self, Display};

use rand::{rngs::StdRng, SeedableRng};

/// An episode plus what's needed to start the next one: the configuration,
/// the random source and a running episode count.
pub struct Game<R = StdRng> {
    config: Config,
    rng: R,

    episode: Episode,
    episodes: u32,
}

impl Game<StdRng> {
    pub fn with_seed(config: Config, seed: u64) -> Result<Self> {
        let rng: StdRng = SeedableRng::seed_from_u64(seed);

        Self::new(config, rng)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: Config, mut rng: R) -> Result<Self> {
        let episode = Episode::new(&config, &mut rng)?;

        Ok(Self {
            config,
            rng,
            episode,
            episodes: 1,
        })
    }

    /// Throws away the current episode and starts a new one.
    pub fn reset(&mut self) -> Result<()> {
        self.episode = Episode::new(&self.config, &mut self.rng)?;
        self.episodes += 1;

        Ok(())
    }

    pub fn step(&mut self, turn: Turn) -> Result<Step> {
        self.episode.step(&mut self.rng, turn)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// 1-based number of the current episode.
    pub fn episode_number(&self) -> u32 {
        self.episodes
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame::new(
            &self.episode.board,
            &self.episode.snake,
            self.episode.score,
            self.episodes,
        )
    }
}

impl<R: RandomSource> SnakeGame for Game<R> {
    fn status(&self) -> Status {
        self.episode.status
    }

    fn head(&self) -> Cell {
        self.episode.snake.head()
    }

    fn len(&self) -> usize {
        self.episode.snake.len()
    }

    fn score(&self) -> u32 {
        self.episode.score
    }

    fn reset(&mut self) -> Result<()> {
        Game::reset(self)
    }

    fn step(&mut self, turn: Turn) -> Result<Step> {
        Game::step(self, turn)
    }
}

impl<R> Display for Game<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let frame = Frame::new(
            &self.episode.board,
            &self.episode.snake,
            self.episode.score,
            self.episodes,
        );

        Display::fmt(&frame, fmt)
    }
}
