//! Per-piece destination scan, including multi-jump capture chains.
//!
//! The scan is a depth-first walk over a "jump graph" rooted at the piece's
//! square, driven by an explicit stack of frames. Frames are visited in
//! pre-order, so when two chains reach the same landing square the one
//! discovered later overwrites the earlier entry.

use std::collections::BTreeMap;

use crate::board::{BoardError, BoardState, Color, Piece, Square};

/// Legal destinations of one piece: target square to captured squares.
/// An empty capture list is a plain step.
pub type MoveMap = BTreeMap<Square, Vec<Square>>;

/// Diagonal directions as (row delta, col delta), in scan order:
/// up-left, up-right, down-left, down-right.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// One pending scan: walk from `from` along `dir`, having already captured
/// `captured` earlier in the chain.
struct Frame {
    from: Square,
    dir: (i8, i8),
    captured: Vec<Square>,
}

/// Directions a piece may start a move in.
fn start_directions(piece: Piece) -> &'static [(i8, i8)] {
    if piece.king {
        &DIRECTIONS
    } else {
        match piece.color {
            Color::Red => &DIRECTIONS[..2],
            Color::White => &DIRECTIONS[2..],
        }
    }
}

/// Generates every legal destination for the piece at `from`.
///
/// Plain steps and capture chains are both offered; capturing is not forced.
/// A chain continues from each landing square in all four diagonals and
/// never jumps the same piece twice.
pub fn legal_moves(board: &BoardState, from: Square) -> Result<MoveMap, BoardError> {
    let piece = board.piece_at(from).ok_or(BoardError::NoPiece(from))?;
    let mut moves = MoveMap::new();

    // Reverse pushes so frames pop in direction order.
    let mut stack: Vec<Frame> = start_directions(piece)
        .iter()
        .rev()
        .map(|&dir| Frame {
            from,
            dir,
            captured: Vec::new(),
        })
        .collect();

    while let Some(frame) = stack.pop() {
        let (dr, dc) = frame.dir;
        let Some(next) = frame.from.offset(dr, dc) else {
            continue;
        };

        match board.piece_at(next) {
            None => {
                if frame.captured.is_empty() {
                    moves.insert(next, Vec::new());
                }
            }
            Some(p) if p.color == piece.color => {}
            Some(_) if frame.captured.contains(&next) => {}
            Some(_) => {
                let Some(landing) = next.offset(dr, dc) else {
                    continue;
                };
                if board.piece_at(landing).is_some() {
                    continue;
                }

                let mut captured = frame.captured;
                captured.push(next);
                for &dir in DIRECTIONS.iter().rev() {
                    stack.push(Frame {
                        from: landing,
                        dir,
                        captured: captured.clone(),
                    });
                }
                moves.insert(landing, captured);
            }
        }
    }

    Ok(moves)
}
