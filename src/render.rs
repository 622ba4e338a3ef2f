//! Read-only snapshots for renderers, and a plain text renderer.

use crate::board::Board;
use crate::grid::Cell;
use crate::snake::Snake;
use crate::Direction;

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::io::{self, Write};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Empty,
    Food,
    Obstacle,
    Snake,
    Head(Direction),
}

impl Display for Tile {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use Direction::*;
        use Tile::*;

        write!(fmt, "{}", match self {
            Empty => "  ",
            Food => "🍎",
            Obstacle => "🧱",
            Snake => "⬛",
            Head(Up) => "🔺",
            Head(Right) => "▶️",
            Head(Down) => "🔻",
            Head(Left) => "◀️",
        })
    }
}

/// Everything a renderer is allowed to see of an episode.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub snake: &'a Snake,
    pub obstacles: &'a BTreeSet<Cell>,
    pub food: Cell,
    pub score: u32,
    /// 1-based episode label.
    pub episode: u32,
}

impl<'a> Frame<'a> {
    pub fn new(board: &'a Board, snake: &'a Snake, score: u32, episode: u32) -> Self {
        Self {
            width: board.width,
            height: board.height,
            cell_size: board.cell_size,
            snake,
            obstacles: &board.obstacles,
            food: board.food,
            score,
            episode,
        }
    }

    pub fn columns(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    pub fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    /// The board as rows of tiles. Cells off the board (a head that just went
    /// through a wall, say) are left out.
    pub fn tiles(&self) -> Vec<Vec<Tile>> {
        let mut map = vec![vec![Tile::Empty; self.columns()]; self.rows()];

        let mut put = |cell: Cell, tile: Tile| {
            let (col, row) = cell.grid_pos(self.cell_size);
            if col < 0 || row < 0 {
                return;
            }

            if let Some(slot) = map.get_mut(row as usize).and_then(|r| r.get_mut(col as usize)) {
                *slot = tile;
            }
        };

        for &pos in self.obstacles.iter() {
            put(pos, Tile::Obstacle);
        }

        put(self.food, Tile::Food);

        let mut snek = self.snake.iter();
        if let Some(&head) = snek.next() {
            for &pos in snek {
                put(pos, Tile::Snake);
            }

            // Last, so a head that bit the body or an obstacle still shows.
            put(head, Tile::Head(self.snake.heading()));
        }

        map
    }
}

impl Display for Frame<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let cols = self.columns();

        write!(fmt, "┏")?;
        for _ in 0..cols { write!(fmt, "━━")? }
        writeln!(fmt, "┓")?;

        for row in self.tiles() {
            write!(fmt, "┃")?;
            for tile in row.iter() {
                write!(fmt, "{}", tile)?
            }
            writeln!(fmt, "┃")?;
        }

        write!(fmt, "┗")?;
        for _ in 0..cols { write!(fmt, "━━")? }
        writeln!(fmt, "┛")?;

        writeln!(fmt, "Score: {} | Episode: {}", self.score, self.episode)
    }
}

/// Something that can show a [`Frame`].
pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

/// Draws frames as text onto any writer.
pub struct TextRenderer<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }

    /// Clear the terminal before each frame.
    pub fn clearing(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if self.clear {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }

        write!(self.out, "{}", frame)?;
        self.out.flush()
    }
}
