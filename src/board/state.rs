//! Game position representation.
//!
//! Holds the grid of pieces plus per-color live and king counts. This is the
//! single source of truth for a position; search clones it to explore
//! successors and never mutates the caller's copy.

use std::fmt;

use super::piece::{Color, Piece};
use super::square::Square;
use super::{COLS, PIECES_PER_SIDE, ROWS};
use crate::movegen::legal_moves;

/// Errors raised by board operations.
///
/// None of the operations returning these mutate the board on failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfRange { row: usize, col: usize },

    #[error("no piece at {0}")]
    NoPiece(Square),

    #[error("square {0} is occupied")]
    Occupied(Square),

    #[error("{to} is not a legal destination for the piece at {from}")]
    IllegalMove { from: Square, to: Square },
}

/// Complete position: grid plus piece and king counters.
///
/// Counters are indexed by `Color as usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [[Option<Piece>; COLS]; ROWS],
    left: [u8; 2],
    kings: [u8; 2],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl BoardState {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        BoardState {
            cells: [[None; COLS]; ROWS],
            left: [0; 2],
            kings: [0; 2],
        }
    }

    /// Creates the standard opening position: White men on the dark squares
    /// of rows 0..=2, Red men on the dark squares of rows 5..=7.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for sq in Square::all().filter(|s| s.is_dark()) {
            let color = match sq.row() {
                0..=2 => Color::White,
                5..=7 => Color::Red,
                _ => continue,
            };
            board.cells[sq.row()][sq.col()] = Some(Piece::man(color));
            board.left[color as usize] += 1;
        }
        debug_assert_eq!(board.left, [PIECES_PER_SIDE; 2]);
        board
    }

    /// Places a piece on an empty square, updating the counters.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Result<(), BoardError> {
        if self.piece_at(sq).is_some() {
            return Err(BoardError::Occupied(sq));
        }
        self.cells[sq.row()][sq.col()] = Some(piece);
        self.left[piece.color as usize] += 1;
        if piece.king {
            self.kings[piece.color as usize] += 1;
        }
        Ok(())
    }

    /// Returns the piece at raw coordinates, failing outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Piece>, BoardError> {
        Square::new(row, col)
            .map(|sq| self.piece_at(sq))
            .ok_or(BoardError::OutOfRange { row, col })
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row()][sq.col()]
    }

    /// Live pieces of one color in row-major order.
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| match self.piece_at(sq) {
                Some(p) if p.color == color => Some((sq, p)),
                _ => None,
            })
            .collect()
    }

    /// Number of live pieces of a color.
    pub fn count(&self, color: Color) -> u8 {
        self.left[color as usize]
    }

    /// Number of kings of a color.
    pub fn kings(&self, color: Color) -> u8 {
        self.kings[color as usize]
    }

    /// Moves the piece at `from` to the empty square `to`.
    ///
    /// A piece landing on row 0 or the last row is crowned whatever its
    /// color. Does not check move legality; see [`BoardState::play`].
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        let mut piece = self.piece_at(from).ok_or(BoardError::NoPiece(from))?;
        if self.piece_at(to).is_some() {
            return Err(BoardError::Occupied(to));
        }

        // Promotion is deliberately not gated on color.
        if (to.row() == 0 || to.row() == ROWS - 1) && !piece.king {
            piece.king = true;
            self.kings[piece.color as usize] += 1;
        }

        self.cells[from.row()][from.col()] = None;
        self.cells[to.row()][to.col()] = Some(piece);
        Ok(())
    }

    /// Clears the given squares, decrementing the owners' counters.
    /// Empty squares are skipped.
    pub fn remove(&mut self, squares: &[Square]) {
        for &sq in squares {
            if let Some(piece) = self.cells[sq.row()][sq.col()].take() {
                self.left[piece.color as usize] -= 1;
                if piece.king {
                    self.kings[piece.color as usize] -= 1;
                }
            }
        }
    }

    /// Plays a complete legal move: relocation, promotion and removal of every
    /// captured piece. Returns the captured squares.
    ///
    /// Fails without touching the board when `to` is not among the legal
    /// destinations of the piece at `from`.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Vec<Square>, BoardError> {
        let moves = legal_moves(self, from)?;
        let captured = moves
            .get(&to)
            .cloned()
            .ok_or(BoardError::IllegalMove { from, to })?;
        self.move_piece(from, to)?;
        self.remove(&captured);
        Ok(captured)
    }

    /// The side whose opponent has no pieces left, if any.
    pub fn winner(&self) -> Option<Color> {
        if self.count(Color::Red) == 0 {
            Some(Color::White)
        } else if self.count(Color::White) == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = cell.map(Piece::notation_char).unwrap_or('.');
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
