//! Board notation.
//!
//! A compact single-line encoding of a position, in the spirit of chess FEN:
//! eight rows separated by `/`, row 0 first, followed by a space and the side
//! to move.
//!
//! Within a row, `r` and `w` are red and white men, `R` and `W` their kings,
//! and a digit 1-8 stands for that many consecutive empty squares. The
//! opening position is
//! `1w1w1w1w/w1w1w1w1/1w1w1w1w/8/8/r1r1r1r1/1r1r1r1r/r1r1r1r1 r`.

use crate::board::{BoardError, BoardState, Color, Piece, Square, COLS, ROWS};

/// Opening position in board notation.
pub const INITIAL_NOTATION: &str = "1w1w1w1w/w1w1w1w1/1w1w1w1w/8/8/r1r1r1r1/1r1r1r1r/r1r1r1r1 r";

/// Errors that can occur while parsing board notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected '<rows> <side>', got '{0}'")]
    MissingSide(String),

    #[error("expected 8 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} covers {width} squares, expected 8")]
    WrongRowWidth { row: usize, width: usize },

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a notation string into a board and the side to move.
pub fn parse_notation(s: &str) -> Result<(BoardState, Color), NotationError> {
    let mut parts = s.split_whitespace();
    let (Some(rows), Some(side), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NotationError::MissingSide(s.trim().to_string()));
    };

    let side = match side {
        "r" => Color::Red,
        "w" => Color::White,
        other => return Err(NotationError::InvalidSide(other.to_string())),
    };

    let rows: Vec<&str> = rows.split('/').collect();
    if rows.len() != ROWS {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut board = BoardState::empty();
    for (r, text) in rows.iter().enumerate() {
        let mut col = 0usize;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10) {
                if run == 0 {
                    return Err(NotationError::InvalidPiece(c));
                }
                col += run as usize;
                continue;
            }
            let piece = Piece::from_notation_char(c).ok_or(NotationError::InvalidPiece(c))?;
            let Some(sq) = Square::new(r, col) else {
                return Err(NotationError::WrongRowWidth {
                    row: r,
                    width: col + 1,
                });
            };
            board.place(sq, piece)?;
            col += 1;
        }
        if col != COLS {
            return Err(NotationError::WrongRowWidth { row: r, width: col });
        }
    }

    Ok((board, side))
}

/// Encodes a board and the side to move.
pub fn encode_notation(board: &BoardState, side: Color) -> String {
    let mut out = String::with_capacity(72);
    for row in 0..ROWS {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..COLS {
            match board.get(row, col).ok().flatten() {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.notation_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out.push(' ');
    out.push(side.notation_char());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn initial_position_encodes() {
        assert_eq!(encode_notation(&BoardState::initial(), Color::Red), INITIAL_NOTATION);
    }

    #[test]
    fn initial_position_parses() {
        let (board, side) = parse_notation(INITIAL_NOTATION).unwrap();
        assert_eq!(board, BoardState::initial());
        assert_eq!(side, Color::Red);
    }

    #[test]
    fn kings_and_counters_survive_parsing() {
        let (board, side) = parse_notation("8/8/8/3R4/4w3/8/8/W7 w").unwrap();
        assert_eq!(side, Color::White);
        assert_eq!(board.piece_at(sq(3, 3)), Some(Piece::king(Color::Red)));
        assert_eq!(board.piece_at(sq(4, 4)), Some(Piece::man(Color::White)));
        assert_eq!(board.piece_at(sq(7, 0)), Some(Piece::king(Color::White)));
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.kings(Color::White), 1);
        assert_eq!(board.kings(Color::Red), 1);
        assert_eq!(encode_notation(&board, side), "8/8/8/3R4/4w3/8/8/W7 w");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            parse_notation("8/8/8/8/8/8/8/8"),
            Err(NotationError::MissingSide(_))
        ));
        assert_eq!(
            parse_notation("8/8/8/8/8/8/8 r"),
            Err(NotationError::WrongRowCount(7))
        );
        assert_eq!(
            parse_notation("8/8/8/8/8/8/8/7 r"),
            Err(NotationError::WrongRowWidth { row: 7, width: 7 })
        );
        assert_eq!(
            parse_notation("8/8/8/8/8/8/8/8r r"),
            Err(NotationError::WrongRowWidth { row: 7, width: 9 })
        );
        assert_eq!(
            parse_notation("8/8/8/8/8/8/8/7x r"),
            Err(NotationError::InvalidPiece('x'))
        );
        assert_eq!(
            parse_notation("8/8/8/8/8/8/8/8 b"),
            Err(NotationError::InvalidSide("b".to_string()))
        );
    }

    #[test]
    fn board_errors_pass_through_unchanged() {
        let err = NotationError::from(BoardError::Occupied(sq(3, 4)));
        assert_eq!(err, NotationError::Board(BoardError::Occupied(sq(3, 4))));
        assert_eq!(err.to_string(), "square 3,4 is occupied");
    }
}
