//! Legal move generation.
//!
//! `jumps` scans the destinations of a single piece; this module flattens
//! them into plies for a whole side in a fixed, reproducible order.

pub mod jumps;

use std::fmt;

pub use jumps::{legal_moves, MoveMap, DIRECTIONS};

use crate::board::{BoardError, BoardState, Color, Square};

/// A single move by one piece, with the opponent squares it jumps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ply {
    pub from: Square,
    pub to: Square,
    pub captured: Vec<Square>,
}

impl Ply {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Returns a copy of `board` with this ply applied.
    ///
    /// The ply must come from [`legal_plies`] on the same board. Use
    /// [`Ply::try_apply`] for plies of unknown origin.
    pub fn apply(&self, board: &BoardState) -> BoardState {
        let next = self.try_apply(board);
        debug_assert!(next.is_ok(), "ply {} does not fit the board: {:?}", self, next);
        next.unwrap_or_else(|_| board.clone())
    }

    /// Like [`Ply::apply`], but fails if the source square is empty or the
    /// target is occupied.
    pub fn try_apply(&self, board: &BoardState) -> Result<BoardState, BoardError> {
        let mut next = board.clone();
        next.move_piece(self.from, self.to)?;
        next.remove(&self.captured);
        Ok(next)
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        for sq in &self.captured {
            write!(f, "x{sq}")?;
        }
        Ok(())
    }
}

/// Every legal ply for `color`: pieces in row-major order, then destinations
/// in ascending square order.
pub fn legal_plies(board: &BoardState, color: Color) -> Vec<Ply> {
    let mut plies = Vec::new();
    for (from, _) in board.pieces(color) {
        let Ok(moves) = legal_moves(board, from) else {
            continue;
        };
        for (to, captured) in moves {
            plies.push(Ply { from, to, captured });
        }
    }
    plies
}

/// Whether `color` has at least one legal ply.
pub fn has_legal_move(board: &BoardState, color: Color) -> bool {
    board
        .pieces(color)
        .iter()
        .any(|&(from, _)| legal_moves(board, from).map_or(false, |m| !m.is_empty()))
}
