//! Is a cell fatal to move into?

use crate::board::Board;
use crate::grid::Cell;

use std::collections::VecDeque;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collision {
    Wall,
    Obstacle,
    Body,
}

/// What `cell` would hit, if anything.
///
/// `body` is head first; the head segment itself is never counted, so a
/// freshly prepended head (or the current head, checked in place) doesn't
/// collide with itself.
pub fn collision(cell: Cell, board: &Board, body: &VecDeque<Cell>) -> Option<Collision> {
    if !board.contains(cell) {
        Some(Collision::Wall)
    } else if board.is_obstacle(cell) {
        Some(Collision::Obstacle)
    } else if body.iter().skip(1).any(|p| *p == cell) {
        Some(Collision::Body)
    } else {
        None
    }
}

pub fn is_fatal(cell: Cell, board: &Board, body: &VecDeque<Cell>) -> bool {
    collision(cell, board, body).is_some()
}
