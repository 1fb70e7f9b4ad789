//! Text protocol handling.
//!
//! Board notation for exchanging positions, and the line-oriented command
//! parser for the engine main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_notation, parse_notation, NotationError, INITIAL_NOTATION};
pub use parser::{parse_command, Command, GoParams};
