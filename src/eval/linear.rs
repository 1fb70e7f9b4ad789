//! Linear position evaluation.
//!
//! A position is scored as the dot product of a learned weight vector with a
//! seven-element feature snapshot. Under every weight vector this crate
//! builds, a higher score favors White.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

use super::threat::threat_counts;
use crate::board::{BoardState, Color};

/// Length of the weight and feature vectors.
pub const FEATURE_COUNT: usize = 7;

/// Feature snapshot of a board:
/// `[1, red, white, red kings, white kings, red threatened, white threatened]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features(pub [f64; FEATURE_COUNT]);

impl Features {
    /// Computes the features of `board`, including a full threat scan.
    pub fn extract(board: &BoardState) -> Features {
        let threats = threat_counts(board);
        Features([
            1.0,
            board.count(Color::Red) as f64,
            board.count(Color::White) as f64,
            board.kings(Color::Red) as f64,
            board.kings(Color::White) as f64,
            threats.red as f64,
            threats.white as f64,
        ])
    }
}

/// Learned coefficients aligned with [`Features`]:
/// `[bias, red, white, red kings, white kings, red threatened, white threatened]`.
///
/// Owned by the caller and passed into evaluation and training rather than
/// stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights(pub [f64; FEATURE_COUNT]);

/// Errors from parsing a comma-separated weight vector.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WeightsParseError {
    #[error("expected 7 weights, got {0}")]
    WrongLength(usize),

    #[error("invalid weight '{0}'")]
    InvalidNumber(String),
}

impl Default for Weights {
    fn default() -> Self {
        Self::material()
    }
}

impl Weights {
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Weights(values)
    }

    pub const fn zero() -> Self {
        Weights([0.0; FEATURE_COUNT])
    }

    /// Plain material balance: White's piece count minus Red's.
    pub const fn material() -> Self {
        Weights([0.0, -1.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// Draws every weight from a standard normal distribution.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for v in values.iter_mut() {
            *v = rng.sample(StandardNormal);
        }
        Weights(values)
    }

    /// Overwrites every weight with `other`'s.
    pub fn apply(&mut self, other: &Weights) {
        self.0.copy_from_slice(&other.0);
    }

    /// Dot product with a feature snapshot.
    pub fn dot(&self, features: &Features) -> f64 {
        self.0
            .iter()
            .zip(features.0.iter())
            .map(|(w, f)| w * f)
            .sum()
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{w}")?;
        }
        Ok(())
    }
}

impl FromStr for Weights {
    type Err = WeightsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != FEATURE_COUNT {
            return Err(WeightsParseError::WrongLength(parts.len()));
        }
        let mut values = [0.0; FEATURE_COUNT];
        for (v, part) in values.iter_mut().zip(parts) {
            *v = part
                .parse()
                .map_err(|_| WeightsParseError::InvalidNumber(part.to_string()))?;
        }
        Ok(Weights(values))
    }
}

/// Scores `board` under `weights`. Pure.
pub fn evaluate(board: &BoardState, weights: &Weights) -> f64 {
    weights.dot(&Features::extract(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn initial_features() {
        let f = Features::extract(&BoardState::initial());
        assert_eq!(f.0, [1.0, 12.0, 12.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn initial_board_is_balanced() {
        let weights = Weights::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(evaluate(&BoardState::initial(), &weights), 0.0);
        assert_eq!(evaluate(&BoardState::initial(), &Weights::material()), 0.0);
    }

    #[test]
    fn material_favors_white_lead() {
        let mut board = BoardState::empty();
        board.place(sq(0, 1), Piece::man(Color::White)).unwrap();
        board.place(sq(0, 3), Piece::man(Color::White)).unwrap();
        board.place(sq(7, 0), Piece::man(Color::Red)).unwrap();
        assert_eq!(evaluate(&board, &Weights::material()), 1.0);
    }

    #[test]
    fn every_feature_contributes() {
        let mut board = BoardState::empty();
        board.place(sq(4, 3), Piece::king(Color::Red)).unwrap();
        board.place(sq(3, 4), Piece::man(Color::White)).unwrap();
        board.place(sq(0, 7), Piece::man(Color::White)).unwrap();
        let f = Features::extract(&board);
        assert_eq!(f.0, [1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 1.0]);

        let w = Weights::new([0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(evaluate(&board, &w), 0.5 + 1.0 + 4.0 + 3.0 + 0.0 + 5.0 + 6.0);
    }

    #[test]
    fn evaluate_is_pure() {
        let board = BoardState::initial();
        let before = board.clone();
        let _ = evaluate(&board, &Weights::material());
        assert_eq!(board, before);
    }

    #[test]
    fn random_weights_are_seeded() {
        let a = Weights::random(&mut SmallRng::seed_from_u64(7));
        let b = Weights::random(&mut SmallRng::seed_from_u64(7));
        let c = Weights::random(&mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.0.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn apply_overwrites_all() {
        let mut w = Weights::zero();
        w.apply(&Weights::material());
        assert_eq!(w, Weights::material());
    }

    #[test]
    fn weights_text_roundtrip() {
        let w = Weights::new([0.5, -1.0, 1.0, 0.25, -0.25, 2.0, -2.0]);
        assert_eq!(w.to_string().parse::<Weights>(), Ok(w));
        assert_eq!("1,2,3".parse::<Weights>(), Err(WeightsParseError::WrongLength(3)));
        assert_eq!(
            "1,2,3,4,5,6,x".parse::<Weights>(),
            Err(WeightsParseError::InvalidNumber("x".to_string()))
        );
    }
}
