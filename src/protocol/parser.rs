//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! engine main loop can dispatch on.

use crate::board::Square;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime: Option<u64>,
    pub nodes: Option<u64>,
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Handshake; the engine identifies itself and lists its options.
    Kingrow,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Back to the opening position with Red to move.
    NewGame,

    /// Set the position from board notation.
    Position { notation: String },

    /// Print the board and its notation.
    Show,

    /// List the destinations of the piece on a square.
    Moves { square: Square },

    /// Click a square: pick up a piece or drop it on a destination.
    Select { square: Square },

    /// Play a complete move for the side to move.
    Play { from: Square, to: Square },

    /// Search and play a move for the side to move.
    Go(GoParams),

    /// Report the winner, if any.
    Winner,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&first, _) = tokens.split_first()?;

    match first {
        "kingrow" => Some(Command::Kingrow),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "show" => Some(Command::Show),
        "winner" => Some(Command::Winner),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "moves" => parse_square_arg(&tokens).map(|square| Command::Moves { square }),
        "select" => parse_square_arg(&tokens).map(|square| Command::Select { square }),
        "play" => parse_play(&tokens),
        "go" => parse_go(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

fn parse_square(token: &str) -> Option<Square> {
    match token.parse::<Square>() {
        Ok(sq) => Some(sq),
        Err(e) => {
            eprintln!("invalid square: {}", e);
            None
        }
    }
}

/// Parses the single `row,col` argument of `moves` and `select`.
fn parse_square_arg(tokens: &[&str]) -> Option<Square> {
    if tokens.len() != 2 {
        eprintln!("malformed {}: expected '{} <row,col>'", tokens[0], tokens[0]);
        return None;
    }
    parse_square(tokens[1])
}

/// Parses `play <row,col> <row,col>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        eprintln!("malformed play: expected 'play <row,col> <row,col>'");
        return None;
    }
    let from = parse_square(tokens[1])?;
    let to = parse_square(tokens[2])?;
    Some(Command::Play { from, to })
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name, value) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value_parts = &tokens[vi + 1..];
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <rows> <side>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <rows> <side>'");
        return None;
    }
    // Notation validity is checked by the engine.
    Some(Command::Position {
        notation: tokens[1..].join(" "),
    })
}

/// Parses `go [depth <n>] [movetime <ms>] [nodes <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        let key = tokens[i];
        let value = tokens.get(i + 1).copied();
        match (key, value) {
            ("depth", Some(v)) => match v.parse::<u32>() {
                Ok(d) => params.depth = Some(d),
                Err(_) => eprintln!("invalid depth value: '{}'", v),
            },
            ("movetime", Some(v)) => match v.parse::<u64>() {
                Ok(ms) => params.movetime = Some(ms),
                Err(_) => eprintln!("invalid movetime value: '{}'", v),
            },
            ("nodes", Some(v)) => match v.parse::<u64>() {
                Ok(n) => params.nodes = Some(n),
                Err(_) => eprintln!("invalid nodes value: '{}'", v),
            },
            ("depth" | "movetime" | "nodes", None) => {
                eprintln!("missing value for go parameter '{}'", key);
            }
            (other, _) => {
                eprintln!("unknown go parameter: '{}'", other);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    Some(Command::Go(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("kingrow"), Some(Command::Kingrow));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("show"), Some(Command::Show));
        assert_eq!(parse_command("winner"), Some(Command::Winner));
        assert_eq!(parse_command("  quit  "), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("castle"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name Weights value 0,-1,1,0,0,0,0"),
            Some(Command::SetOption {
                name: "Weights".to_string(),
                value: Some("0,-1,1,0,0,0,0".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_command("setoption name AlphaBeta"),
            Some(Command::SetOption {
                name: "AlphaBeta".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption Depth 3"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_keeps_side() {
        let notation = "1w1w1w1w/w1w1w1w1/1w1w1w1w/8/8/r1r1r1r1/1r1r1r1r/r1r1r1r1 r";
        assert_eq!(
            parse_command(&format!("position {}", notation)),
            Some(Command::Position {
                notation: notation.to_string(),
            })
        );
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn parse_square_commands() {
        assert_eq!(
            parse_command("moves 5,0"),
            Some(Command::Moves { square: sq(5, 0) })
        );
        assert_eq!(
            parse_command("select 2,1"),
            Some(Command::Select { square: sq(2, 1) })
        );
        assert_eq!(
            parse_command("play 5,0 4,1"),
            Some(Command::Play {
                from: sq(5, 0),
                to: sq(4, 1),
            })
        );
    }

    #[test]
    fn parse_bad_squares_return_none() {
        assert_eq!(parse_command("moves"), None);
        assert_eq!(parse_command("moves 9,0"), None);
        assert_eq!(parse_command("select a1"), None);
        assert_eq!(parse_command("play 5,0"), None);
        assert_eq!(parse_command("play 5,0 -1,1"), None);
    }

    #[test]
    fn parse_go_no_params() {
        assert_eq!(parse_command("go"), Some(Command::Go(GoParams::default())));
    }

    #[test]
    fn parse_go_all_params() {
        assert_eq!(
            parse_command("go depth 5 movetime 200 nodes 10000"),
            Some(Command::Go(GoParams {
                depth: Some(5),
                movetime: Some(200),
                nodes: Some(10000),
            }))
        );
    }

    #[test]
    fn parse_go_skips_bad_values() {
        assert_eq!(
            parse_command("go depth x ponder nodes 7"),
            Some(Command::Go(GoParams {
                depth: None,
                movetime: None,
                nodes: Some(7),
            }))
        );
        assert_eq!(
            parse_command("go depth"),
            Some(Command::Go(GoParams::default()))
        );
    }
}
