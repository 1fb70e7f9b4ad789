//! kingrow -- a checkers engine speaking a line-oriented text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr.

use std::io::{self, BufRead};

use kingrow::engine::Engine;
use kingrow::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::Kingrow => engine.handle_kingrow(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    eprintln!("setoption: {}", e);
                }
                Ok(())
            }
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { notation } => {
                if let Err(e) = engine.set_position(&notation) {
                    eprintln!("{}", e);
                }
                Ok(())
            }
            Command::Show => engine.handle_show(&mut out),
            Command::Moves { square } => engine.handle_moves(square, &mut out),
            Command::Select { square } => engine.handle_select(square, &mut out),
            Command::Play { from, to } => engine.handle_play(from, to, &mut out),
            Command::Go(params) => engine.handle_go(&params, &mut out),
            Command::Winner => engine.handle_winner(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = written {
            eprintln!("output error: {}", e);
            break;
        }
    }
}
