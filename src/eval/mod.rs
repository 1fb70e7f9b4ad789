//! Position evaluation.
//!
//! Scores a board as a weighted sum of piece counts, king counts and capture
//! exposure. Positive scores favor White.

pub mod linear;
pub mod threat;

pub use linear::{evaluate, Features, Weights, WeightsParseError, FEATURE_COUNT};
pub use threat::{threat_counts, threatened_squares, Threats};
