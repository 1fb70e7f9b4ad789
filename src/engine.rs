//! Engine state management.
//!
//! Holds the current game, the evaluation weights and engine options, and
//! runs search for the `go` command. Every handler writes its reply to the
//! supplied output; malformed input is reported on stderr.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Color, Square};
use crate::eval::Weights;
use crate::game::Game;
use crate::movegen::{has_legal_move, legal_moves, Ply};
use crate::protocol::{encode_notation, parse_notation, GoParams};
use crate::search::{search, SearchLimits, DEFAULT_DEPTH};

/// Deepest search the `Depth` option accepts.
const MAX_DEPTH: u32 = 12;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Game,
    pub weights: Weights,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine at the opening position with material weights.
    pub fn new() -> Self {
        Engine {
            game: Game::new(),
            weights: Weights::material(),
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets the game. Weights and options are kept.
    pub fn new_game(&mut self) {
        self.game.reset();
    }

    /// Sets the current position from board notation.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, notation: &str) -> Result<(), String> {
        match parse_notation(notation) {
            Ok((board, side)) => {
                self.game = Game::from_position(board, side);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse position: {}", e)),
        }
    }

    /// Sets an engine option. `Weights` and `Seed` take effect immediately;
    /// the rest are read when a search starts.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), String> {
        let value = value.unwrap_or_default();
        match name.as_str() {
            "Weights" => {
                self.weights = if value.eq_ignore_ascii_case("random") {
                    Weights::random(&mut self.rng)
                } else {
                    value
                        .parse::<Weights>()
                        .map_err(|e| format!("invalid Weights: {}", e))?
                };
            }
            "Seed" => {
                let seed: u64 = value
                    .parse()
                    .map_err(|_| format!("invalid Seed: '{}'", value))?;
                self.rng = if seed == 0 {
                    SmallRng::from_entropy()
                } else {
                    SmallRng::seed_from_u64(seed)
                };
            }
            "Depth" => {
                value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid Depth: '{}'", value))?;
            }
            "AlphaBeta" => {
                parse_bool(&value).ok_or_else(|| format!("invalid AlphaBeta: '{}'", value))?;
            }
            other => return Err(format!("unknown option: '{}'", other)),
        }
        self.options.insert(name, value);
        Ok(())
    }

    /// Returns the configured search depth, clamped to `1..=MAX_DEPTH`.
    fn depth(&self) -> u32 {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DEPTH)
            .clamp(1, MAX_DEPTH)
    }

    fn alpha_beta(&self) -> bool {
        self.options
            .get("AlphaBeta")
            .and_then(|v| parse_bool(v))
            .unwrap_or(true)
    }

    /// Handles the handshake: writes id, options and `kingrowok`.
    pub fn handle_kingrow<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name kingrow")?;
        writeln!(out, "id author kingrow")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_DEPTH
        )?;
        writeln!(out, "option name AlphaBeta type check default true")?;
        writeln!(
            out,
            "option name Weights type string default {}",
            Weights::material()
        )?;
        writeln!(out, "option name Seed type spin default 0")?;
        writeln!(out, "kingrowok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Prints the board followed by its notation.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.game.board())?;
        writeln!(
            out,
            "position {}",
            encode_notation(self.game.board(), self.game.turn())
        )?;
        out.flush()
    }

    /// Lists the destinations of the piece on `square` with their captures.
    pub fn handle_moves<W: Write>(&self, square: Square, out: &mut W) -> io::Result<()> {
        write!(out, "moves {}", square)?;
        match legal_moves(self.game.board(), square) {
            Ok(moves) => {
                for (to, captured) in moves {
                    write!(out, " {}", to)?;
                    for sq in captured {
                        write!(out, "x{}", sq)?;
                    }
                }
            }
            Err(e) => eprintln!("moves: {}", e),
        }
        writeln!(out)?;
        out.flush()
    }

    /// Forwards a click to the game.
    pub fn handle_select<W: Write>(&mut self, square: Square, out: &mut W) -> io::Result<()> {
        let turn = self.game.turn();
        match self.game.select(square) {
            Ok(true) if self.game.turn() != turn => writeln!(out, "moved")?,
            Ok(true) => writeln!(out, "selected {}", square)?,
            Ok(false) => writeln!(out, "none")?,
            Err(e) => {
                eprintln!("select: {}", e);
                writeln!(out, "none")?;
            }
        }
        out.flush()
    }

    /// Plays a move for the side to move.
    pub fn handle_play<W: Write>(&mut self, from: Square, to: Square, out: &mut W) -> io::Result<()> {
        match self.game.play(from, to) {
            Ok(_) => writeln!(out, "ok")?,
            Err(e) => writeln!(out, "illegal {}", e)?,
        }
        out.flush()
    }

    /// Handles `go`: searches for the side to move, commits the chosen board
    /// and reports it as `bestmove`. A side with no legal move gets
    /// `bestmove none` and the position is left unchanged.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) -> io::Result<()> {
        let limits = SearchLimits {
            depth: params.depth.map_or_else(|| self.depth(), |d| d.clamp(1, MAX_DEPTH)),
            alpha_beta: self.alpha_beta(),
            max_nodes: params.nodes,
            movetime: params.movetime.map(Duration::from_millis),
        };

        let to_move = self.game.turn();
        if !has_legal_move(self.game.board(), to_move) {
            eprintln!("go: {} has no legal move", to_move);
            self.game.commit(None);
            writeln!(out, "bestmove none")?;
            return out.flush();
        }

        let best: Option<Ply> =
            match search(self.game.board(), to_move, &self.weights, &limits, out) {
                Ok(result) => {
                    self.game.commit(Some(result.board));
                    result.ply
                }
                Err(e) => {
                    eprintln!("go: {}", e);
                    self.game.commit(None);
                    None
                }
            };

        match best {
            Some(ply) => writeln!(out, "bestmove {}", ply)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }

    /// Reports the winner, if any.
    pub fn handle_winner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let name = self.game.winner().map_or("none", Color::name);
        writeln!(out, "winner {}", name)?;
        out.flush()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}
