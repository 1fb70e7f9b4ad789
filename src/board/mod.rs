//! Board representation and game-state types.
//!
//! Contains squares, pieces, and the position (`BoardState`) with its
//! piece and king counters.

pub mod piece;
pub mod square;
pub mod state;

pub use piece::{Color, Piece, ALL_COLORS};
pub use square::{Square, SquareParseError};
pub use state::{BoardError, BoardState};

/// Number of rows on the board.
pub const ROWS: usize = 8;

/// Number of columns on the board.
pub const COLS: usize = 8;

/// Pieces each side starts with.
pub const PIECES_PER_SIDE: u8 = 12;
