//! kingrow checkers engine library.
//!
//! Exposes the board representation, move generation, evaluation, search,
//! weight training and protocol modules for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;
pub mod train;
