//! Search.
//!
//! Looks a fixed number of plies ahead and picks the successor board whose
//! minimax value is best for the side to move.

pub mod minimax;

pub use minimax::{minimax, search, SearchError, SearchLimits, SearchResult, DEFAULT_DEPTH};
