use crate::grid::Cell;
use crate::{Direction, Turn};

use std::collections::VecDeque;

/// Body segments, head at the front, plus the current heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
}

impl Snake {
    pub fn new(head: Cell, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);

        Self { body, heading }
    }

    pub fn head(&self) -> Cell {
        // Never empty: built with a head and `shrink` only runs after a grow.
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Applies `turn` to the heading and returns the new heading.
    pub fn steer(&mut self, turn: Turn) -> Direction {
        self.heading = self.heading.turn(turn);
        self.heading
    }

    /// Where the head goes next under the current heading.
    pub fn next_head(&self, cell_size: i32) -> Option<Cell> {
        self.head().stepped(self.heading, cell_size)
    }

    pub fn grow(&mut self, new_head: Cell) {
        self.body.push_front(new_head);
    }

    /// Drops the tail. A lone head is never removed.
    pub fn shrink(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], heading: Direction) -> Self {
        Self {
            body: cells.iter().copied().collect(),
            heading,
        }
    }
}
