//! Board coordinates.
//!
//! A `Square` is always on the board: construction goes through checked
//! constructors, so code holding a `Square` never needs a bounds check.

use std::fmt;
use std::str::FromStr;

use super::{COLS, ROWS};

/// A cell on the 8x8 grid. Row 0 is White's home edge.
///
/// Ordered by row, then column, which is the enumeration order used by move
/// generation and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

/// Errors from parsing `row,col` square text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("expected 'row,col', got '{0}'")]
    Malformed(String),

    #[error("square ({row}, {col}) is off the board")]
    OffBoard { row: i64, col: i64 },
}

impl Square {
    /// Returns the square at `(row, col)`, or `None` if it is off the board.
    pub const fn new(row: usize, col: usize) -> Option<Square> {
        if row < ROWS && col < COLS {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Returns the square displaced by `(dr, dc)`, or `None` past an edge.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize)
    }

    /// Whether this is one of the 32 playable (dark) squares.
    pub const fn is_dark(self) -> bool {
        self.col % 2 == (self.row + 1) % 2
    }

    /// Iterates every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..ROWS).flat_map(|row| {
            (0..COLS).map(move |col| Square {
                row: row as u8,
                col: col as u8,
            })
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SquareParseError::Malformed(s.to_string());
        let (r, c) = s.trim().split_once(',').ok_or_else(malformed)?;
        let row: i64 = r.trim().parse().map_err(|_| malformed())?;
        let col: i64 = c.trim().parse().map_err(|_| malformed())?;
        if row < 0 || col < 0 {
            return Err(SquareParseError::OffBoard { row, col });
        }
        Square::new(row as usize, col as usize).ok_or(SquareParseError::OffBoard { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_off_board() {
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn offset_stops_at_edges() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), None);
        assert_eq!(corner.offset(1, 1), Square::new(1, 1));

        let far = Square::new(7, 7).unwrap();
        assert_eq!(far.offset(1, 1), None);
        assert_eq!(far.offset(-2, -2), Square::new(5, 5));
    }

    #[test]
    fn ordering_is_row_major() {
        let a = Square::new(2, 7).unwrap();
        let b = Square::new(3, 0).unwrap();
        assert!(a < b);
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dark_squares_match_initial_layout() {
        assert!(Square::new(0, 1).unwrap().is_dark());
        assert!(!Square::new(0, 0).unwrap().is_dark());
        assert!(Square::new(5, 0).unwrap().is_dark());
        assert_eq!(Square::all().filter(|s| s.is_dark()).count(), 32);
    }

    #[test]
    fn parse_and_display() {
        let sq: Square = "5,2".parse().unwrap();
        assert_eq!(sq, Square::new(5, 2).unwrap());
        assert_eq!(sq.to_string(), "5,2");
        assert_eq!(" 3 , 4 ".parse::<Square>().unwrap(), Square::new(3, 4).unwrap());
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("52".parse::<Square>(), Err(SquareParseError::Malformed(_))));
        assert!(matches!("a,b".parse::<Square>(), Err(SquareParseError::Malformed(_))));
        assert_eq!(
            "8,0".parse::<Square>(),
            Err(SquareParseError::OffBoard { row: 8, col: 0 })
        );
        assert_eq!(
            "-1,0".parse::<Square>(),
            Err(SquareParseError::OffBoard { row: -1, col: 0 })
        );
    }
}
