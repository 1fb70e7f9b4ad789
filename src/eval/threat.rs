//! Capture exposure analysis.
//!
//! Counts, for each side, how many of its pieces the opponent could capture
//! with some legal move on the current board. Recomputed from scratch on
//! every call.

use std::collections::BTreeSet;

use crate::board::{BoardState, Color, Square};
use crate::movegen::legal_moves;

/// Number of pieces of each color currently exposed to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Threats {
    pub red: usize,
    pub white: usize,
}

/// Squares of `victim`'s pieces that appear in any capture list of any
/// legal move of the opposing side. Duplicates are collapsed.
pub fn threatened_squares(board: &BoardState, victim: Color) -> BTreeSet<Square> {
    let mut exposed = BTreeSet::new();
    for (from, _) in board.pieces(victim.opponent()) {
        let Ok(moves) = legal_moves(board, from) else {
            continue;
        };
        for captured in moves.values() {
            exposed.extend(captured.iter().copied());
        }
    }
    exposed
}

/// Recomputes both sides' threat counts.
pub fn threat_counts(board: &BoardState) -> Threats {
    Threats {
        red: threatened_squares(board, Color::Red).len(),
        white: threatened_squares(board, Color::White).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn initial_position_has_no_threats() {
        assert_eq!(threat_counts(&BoardState::initial()), Threats::default());
    }

    #[test]
    fn mutual_threat_is_counted_once_per_piece() {
        let mut board = BoardState::empty();
        board.place(sq(4, 3), Piece::man(Color::Red)).unwrap();
        board.place(sq(3, 4), Piece::man(Color::White)).unwrap();
        let threats = threat_counts(&board);
        assert_eq!(threats.red, 1);
        assert_eq!(threats.white, 1);
    }

    #[test]
    fn piece_threatened_by_two_attackers_counts_once() {
        let mut board = BoardState::empty();
        board.place(sq(3, 2), Piece::man(Color::White)).unwrap();
        board.place(sq(4, 1), Piece::king(Color::Red)).unwrap();
        board.place(sq(4, 3), Piece::king(Color::Red)).unwrap();
        assert_eq!(threatened_squares(&board, Color::White).len(), 1);
        assert_eq!(threat_counts(&board).white, 1);
    }

    #[test]
    fn chain_exposes_every_jumped_piece() {
        let mut board = BoardState::empty();
        board.place(sq(6, 1), Piece::man(Color::Red)).unwrap();
        board.place(sq(5, 2), Piece::man(Color::White)).unwrap();
        board.place(sq(3, 4), Piece::man(Color::White)).unwrap();
        let exposed = threatened_squares(&board, Color::White);
        assert_eq!(exposed.into_iter().collect::<Vec<_>>(), vec![sq(3, 4), sq(5, 2)]);
    }
}
