//! A grid snake environment: an external controller hands the engine one
//! relative turn per tick and gets a reward and a termination flag back.
//!
//! The y axis grows downward. That is what makes [`Direction::clockwise`]
//! visually clockwise; nothing else depends on it.

#![deny(unsafe_code)]

use std::convert::TryFrom;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Clockwise order, starting from `Right`.
    pub const CYCLE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    fn index(self) -> usize {
        use Direction::*;

        match self {
            Right => 0,
            Down => 1,
            Left => 2,
            Up => 3,
        }
    }

    pub fn clockwise(self) -> Self {
        Self::CYCLE[(self.index() + 1) % 4]
    }

    pub fn counter_clockwise(self) -> Self {
        Self::CYCLE[(self.index() + 3) % 4]
    }

    pub fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Straight => self,
            Turn::Clockwise => self.clockwise(),
            Turn::CounterClockwise => self.counter_clockwise(),
        }
    }

    pub(crate) fn into_pair(self) -> (i32, i32) {
        use Direction::*;

        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// A relative steering decision. There is deliberately no way to ask for an
/// absolute direction, so a 180° reversal can't be expressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Turn {
    Straight,
    Clockwise,
    CounterClockwise,
}

/// Action indices as an agent would emit them: 0 straight, 1 clockwise,
/// 2 counter-clockwise.
impl TryFrom<u8> for Turn {
    type Error = Error;

    fn try_from(idx: u8) -> Result<Self> {
        match idx {
            0 => Ok(Turn::Straight),
            1 => Ok(Turn::Clockwise),
            2 => Ok(Turn::CounterClockwise),
            _ => Err(Error::InvalidTurn(format!("action index {}", idx))),
        }
    }
}

/// One-hot `[straight, clockwise, counter_clockwise]`.
impl TryFrom<[u8; 3]> for Turn {
    type Error = Error;

    fn try_from(one_hot: [u8; 3]) -> Result<Self> {
        match one_hot {
            [1, 0, 0] => Ok(Turn::Straight),
            [0, 1, 0] => Ok(Turn::Clockwise),
            [0, 0, 1] => Ok(Turn::CounterClockwise),
            other => Err(Error::InvalidTurn(format!("one-hot {:?}", other))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Running,
    Terminated,
}

pub trait SnakeGame: Display {
    fn status(&self) -> Status;
    fn head(&self) -> Cell;
    fn len(&self) -> usize;
    fn score(&self) -> u32;

    fn reset(&mut self) -> Result<()>;
    fn step(&mut self, turn: Turn) -> Result<Step>;
}

pub mod board;
pub mod collision;
pub mod config;
pub mod engine;
pub mod episode;
pub mod error;
pub mod game;
pub mod grid;
pub mod layout;
pub mod render;
pub mod snake;

pub use board::Board;
pub use collision::Collision;
pub use config::{Config, Rewards};
pub use engine::{Outcome, Step};
pub use episode::Episode;
pub use error::{Error, Result};
pub use game::Game;
pub use grid::{Cell, Rect};
pub use layout::RandomSource;
pub use render::{Frame, Renderer, TextRenderer};
pub use snake::Snake;
