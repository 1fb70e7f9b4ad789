//! Turn management for a single game.
//!
//! Wraps a [`BoardState`] with the side to move and the piece a player has
//! picked up. Human input goes through [`Game::select`]; engine moves arrive
//! as complete successor boards through [`Game::commit`].

use crate::board::{BoardError, BoardState, Color, Square};
use crate::movegen::{legal_moves, MoveMap};

/// Errors from playing a move on behalf of the side to move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the piece at {0} does not belong to {1}")]
    NotYourPiece(Square, Color),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A game in progress. Red moves first.
#[derive(Debug, Clone)]
pub struct Game {
    board: BoardState,
    turn: Color,
    selected: Option<Square>,
    valid_moves: MoveMap,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(BoardState::initial(), Color::Red)
    }

    /// Starts from an arbitrary position with `turn` to move.
    pub fn from_position(board: BoardState, turn: Color) -> Self {
        Game {
            board,
            turn,
            selected: None,
            valid_moves: MoveMap::new(),
        }
    }

    /// Back to the opening position, Red to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Destinations of the selected piece, empty when nothing is selected.
    pub fn valid_moves(&self) -> &MoveMap {
        &self.valid_moves
    }

    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    /// Handles a click on `sq`.
    ///
    /// With a piece selected and `sq` among its destinations, plays the move
    /// and passes the turn. Otherwise clears the selection and picks up the
    /// piece on `sq` if it belongs to the side to move. Returns whether
    /// anything happened.
    pub fn select(&mut self, sq: Square) -> Result<bool, BoardError> {
        if let Some(from) = self.selected {
            if self.valid_moves.contains_key(&sq) {
                self.board.play(from, sq)?;
                self.change_turn();
                return Ok(true);
            }
        }

        self.selected = None;
        self.valid_moves.clear();

        match self.board.piece_at(sq) {
            Some(piece) if piece.color == self.turn => {
                self.valid_moves = legal_moves(&self.board, sq)?;
                self.selected = Some(sq);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Plays `from` to `to` for the side to move and passes the turn.
    /// Returns the captured squares. Leaves the game untouched on error.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Vec<Square>, GameError> {
        let piece = self.board.piece_at(from).ok_or(BoardError::NoPiece(from))?;
        if piece.color != self.turn {
            return Err(GameError::NotYourPiece(from, self.turn));
        }
        let captured = self.board.play(from, to)?;
        self.change_turn();
        Ok(captured)
    }

    /// Installs a board chosen by search and passes the turn.
    ///
    /// `None` means the side to move had nothing to play; the position is
    /// left alone and `true` is returned.
    pub fn commit(&mut self, next: Option<BoardState>) -> bool {
        match next {
            Some(board) => {
                self.board = board;
                self.change_turn();
                false
            }
            None => true,
        }
    }

    fn change_turn(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
        self.turn = self.turn.opponent();
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
    fn red_moves_first() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::Red);
        assert_eq!(game.selected(), None);
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn selecting_own_piece_caches_moves() {
        let mut game = Game::new();
        assert_eq!(game.select(sq(5, 0)), Ok(true));
        assert_eq!(game.selected(), Some(sq(5, 0)));
        assert_eq!(game.valid_moves().keys().copied().collect::<Vec<_>>(), vec![sq(4, 1)]);
    }

    #[test]
    fn selecting_opponent_or_empty_does_nothing() {
        let mut game = Game::new();
        assert_eq!(game.select(sq(2, 1)), Ok(false));
        assert_eq!(game.select(sq(4, 1)), Ok(false));
        assert_eq!(game.selected(), None);
        assert_eq!(game.board(), &BoardState::initial());
    }

    #[test]
    fn second_click_plays_and_passes_turn() {
        let mut game = Game::new();
        game.select(sq(5, 0)).unwrap();
        assert_eq!(game.select(sq(4, 1)), Ok(true));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board().piece_at(sq(4, 1)), Some(Piece::man(Color::Red)));
        assert_eq!(game.board().piece_at(sq(5, 0)), None);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn illegal_target_drops_selection_without_moving() {
        let mut game = Game::new();
        game.select(sq(5, 0)).unwrap();
        assert_eq!(game.select(sq(3, 2)), Ok(false));
        assert_eq!(game.selected(), None);
        assert_eq!(game.turn(), Color::Red);
        assert_eq!(game.board(), &BoardState::initial());
    }

    #[test]
    fn clicking_another_own_piece_reselects() {
        let mut game = Game::new();
        game.select(sq(5, 0)).unwrap();
        assert_eq!(game.select(sq(5, 2)), Ok(true));
        assert_eq!(game.selected(), Some(sq(5, 2)));
        assert_eq!(game.valid_moves().len(), 2);
    }

    #[test]
    fn capture_through_select_removes_piece() {
        let mut board = BoardState::empty();
        board.place(sq(4, 3), Piece::man(Color::Red)).unwrap();
        board.place(sq(3, 4), Piece::man(Color::White)).unwrap();
        board.place(sq(0, 1), Piece::man(Color::White)).unwrap();
        let mut game = Game::from_position(board, Color::Red);
        game.select(sq(4, 3)).unwrap();
        game.select(sq(2, 5)).unwrap();
        assert_eq!(game.board().count(Color::White), 1);
        assert_eq!(game.board().piece_at(sq(3, 4)), None);
    }

    #[test]
    fn play_checks_ownership_and_legality() {
        let mut game = Game::new();
        assert_eq!(
            game.play(sq(2, 1), sq(3, 0)),
            Err(GameError::NotYourPiece(sq(2, 1), Color::Red))
        );
        assert_eq!(
            game.play(sq(4, 1), sq(3, 0)),
            Err(GameError::Board(BoardError::NoPiece(sq(4, 1))))
        );
        assert_eq!(
            game.play(sq(5, 0), sq(3, 2)),
            Err(GameError::Board(BoardError::IllegalMove {
                from: sq(5, 0),
                to: sq(3, 2),
            }))
        );
        assert_eq!(game.board(), &BoardState::initial());

        assert_eq!(game.play(sq(5, 0), sq(4, 1)), Ok(vec![]));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn commit_none_reports_no_move() {
        let mut game = Game::new();
        assert!(game.commit(None));
        assert_eq!(game.turn(), Color::Red);

        let mut next = BoardState::initial();
        next.play(sq(5, 0), sq(4, 1)).unwrap();
        assert!(!game.commit(Some(next.clone())));
        assert_eq!(game.board(), &next);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn reset_restores_opening() {
        let mut game = Game::new();
        game.select(sq(5, 0)).unwrap();
        game.select(sq(4, 1)).unwrap();
        game.reset();
        assert_eq!(game.board(), &BoardState::initial());
        assert_eq!(game.turn(), Color::Red);
    }
}
