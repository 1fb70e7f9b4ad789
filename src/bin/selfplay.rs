//! Self-play training CLI.
//!
//! Trains the evaluation weights by self-play and writes one JSON line per
//! epoch.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --epochs N       Number of games to play (default: 20)
//!   --depth N        Search depth per move (default: 3)
//!   --lr X           Learning rate (default: 0.1)
//!   --max-plies N    Plies before an undecided game is abandoned (default: 100)
//!   --weights W      Seven comma-separated starting weights (default: random)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use kingrow::selfplay::{self, TrainConfig};

/// Parses the value following `flag`, exiting with status 1 if it is
/// missing or malformed.
fn flag_value<T>(args: &[String], i: usize, flag: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = args.get(i) else {
        eprintln!("missing value for {}", flag);
        print_usage();
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("invalid {} value '{}': {}", flag, raw, e);
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = TrainConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--epochs" => {
                i += 1;
                config.epochs = flag_value(&args, i, "--epochs");
            }
            "--depth" => {
                i += 1;
                config.depth = flag_value(&args, i, "--depth");
            }
            "--lr" => {
                i += 1;
                config.lr = flag_value(&args, i, "--lr");
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = flag_value(&args, i, "--max-plies");
            }
            "--weights" => {
                i += 1;
                config.initial_weights = Some(flag_value(&args, i, "--weights"));
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play training: {} epochs, depth {}, lr {}, max {} plies",
            config.epochs, config.depth, config.lr, config.max_plies
        );
    }

    let start = Instant::now();
    let report = selfplay::run_training(&config);

    if !config.quiet {
        eprintln!(
            "Completed {} epochs in {:.1}s",
            report.epochs.len(),
            start.elapsed().as_secs_f64()
        );
        selfplay::print_summary(&report);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&report.epochs, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&report.epochs, &mut writer)
        }
    };

    match (written, output_path) {
        (Ok(()), Some(path)) if !config.quiet => {
            eprintln!("Wrote {} epochs to {}", report.epochs.len(), path);
        }
        (Ok(()), _) => {}
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --epochs N       Number of games to play (default: 20)");
    eprintln!("  --depth N        Search depth per move (default: 3)");
    eprintln!("  --lr X           Learning rate (default: 0.1)");
    eprintln!("  --max-plies N    Plies before an undecided game is abandoned (default: 100)");
    eprintln!("  --weights W      Seven comma-separated starting weights (default: random)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
