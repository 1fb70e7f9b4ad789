//! Self-play training of the evaluation weights.
//!
//! Both sides are played by the same searcher and share one weight vector.
//! After every White/Red pair of moves the weights take one online step
//! toward agreement between the two search scores; a decisive game adds a
//! final step toward the terminal target. Learned weights carry over from
//! epoch to epoch. Each epoch is summarized as an [`EpochRecord`].

use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Color;
use crate::eval::{evaluate, Features, Weights};
use crate::game::Game;
use crate::protocol::encode_notation;
use crate::search::{search, SearchLimits, DEFAULT_DEPTH};
use crate::train::{criterion, optimize, DEFAULT_LEARNING_RATE, TERMINAL_TARGET};

/// Configuration for a self-play training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of games to play.
    pub epochs: usize,
    /// Search depth for both sides. Values below 1 are treated as 1.
    pub depth: u32,
    /// Learning rate for every update.
    pub lr: f64,
    /// Plies after which an undecided game is abandoned.
    pub max_plies: usize,
    /// Random seed for the initial weights (0 = use entropy).
    pub seed: u64,
    /// Suppress per-epoch progress output.
    pub quiet: bool,
    /// Starting weights. Drawn from a standard normal when `None`.
    pub initial_weights: Option<Weights>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 20,
            depth: DEFAULT_DEPTH,
            lr: DEFAULT_LEARNING_RATE,
            max_plies: 100,
            seed: 0,
            quiet: false,
            initial_weights: None,
        }
    }
}

/// Summary of one self-play game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochRecord {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Moves actually played.
    pub plies: usize,
    pub winner: Option<Color>,
    /// Pair losses in the order they were applied.
    pub losses: Vec<f64>,
    /// Loss of the terminal update, present only for a decided game.
    pub terminal_loss: Option<f64>,
    /// Weights at the end of the epoch.
    pub weights: Weights,
    /// The side to move had nothing to play.
    pub no_legal_move: bool,
    /// Notation of the last position.
    pub final_position: String,
}

/// Outcome of a complete training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub weights: Weights,
    pub epochs: Vec<EpochRecord>,
}

/// Plays one game from `game`, updating `weights` in place.
pub fn play_epoch(
    mut game: Game,
    weights: &mut Weights,
    config: &TrainConfig,
    epoch: usize,
) -> EpochRecord {
    let limits = SearchLimits::with_depth(config.depth.max(1));
    let mut null_out = io::sink();

    let mut plies = 0;
    let mut losses = Vec::new();
    let mut terminal_loss = None;
    let mut no_legal_move = false;
    let mut white_score: Option<f64> = None;
    let mut red_score: Option<f64> = None;

    while plies < config.max_plies {
        let to_move = game.turn();
        let result = match search(game.board(), to_move, weights, &limits, &mut null_out) {
            Ok(r) => r,
            Err(_) => {
                no_legal_move = game.commit(None);
                break;
            }
        };
        game.commit(Some(result.board));
        plies += 1;

        match to_move {
            Color::White => white_score = Some(result.score),
            Color::Red => red_score = Some(result.score),
        }

        let winner = game.winner();
        if winner.is_some() {
            // The loser has no reply; it is scored on the final position.
            let final_score = evaluate(game.board(), weights);
            white_score.get_or_insert(final_score);
            red_score.get_or_insert(final_score);
        }

        if let (Some(white), Some(red)) = (white_score, red_score) {
            white_score = None;
            red_score = None;
            let loss = criterion(white, red);
            optimize(weights, &Features::extract(game.board()), loss, config.lr);
            losses.push(loss);

            if let Some(winner) = winner {
                let loss = match winner {
                    Color::White => criterion(TERMINAL_TARGET, white),
                    Color::Red => criterion(-TERMINAL_TARGET, red),
                };
                optimize(weights, &Features::extract(game.board()), loss, config.lr);
                terminal_loss = Some(loss);
                break;
            }
        }
    }

    EpochRecord {
        epoch,
        plies,
        winner: game.winner(),
        losses,
        terminal_loss,
        weights: *weights,
        no_legal_move,
        final_position: encode_notation(game.board(), game.turn()),
    }
}

/// Runs `config.epochs` self-play games, each from the opening position.
pub fn run_training(config: &TrainConfig) -> TrainingReport {
    run_training_with_callback(config, |_| {})
}

/// Runs training, calling `on_epoch` with each completed epoch record.
pub fn run_training_with_callback<F>(config: &TrainConfig, mut on_epoch: F) -> TrainingReport
where
    F: FnMut(&EpochRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };
    let mut weights = config
        .initial_weights
        .unwrap_or_else(|| Weights::random(&mut rng));

    let mut epochs = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let start = Instant::now();
        let record = play_epoch(Game::new(), &mut weights, config, epoch);
        if !config.quiet {
            let outcome = match (record.winner, record.no_legal_move) {
                (Some(w), _) => format!("{} wins", w),
                (None, true) => "no legal move".to_string(),
                (None, false) => "undecided".to_string(),
            };
            eprintln!(
                "Epoch {}/{}: {} after {} plies ({:.1}s), terminal loss {}",
                epoch + 1,
                config.epochs,
                outcome,
                record.plies,
                start.elapsed().as_secs_f64(),
                record
                    .terminal_loss
                    .map_or("-".to_string(), |l| format!("{:.4}", l)),
            );
        }
        on_epoch(&record);
        epochs.push(record);
    }

    TrainingReport { weights, epochs }
}

/// Writes epoch records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[EpochRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate statistics to stderr.
pub fn print_summary(report: &TrainingReport) {
    let total = report.epochs.len();
    let mut red_wins = 0usize;
    let mut white_wins = 0usize;
    let mut blocked = 0usize;
    let mut total_plies = 0usize;

    for record in &report.epochs {
        total_plies += record.plies;
        match record.winner {
            Some(Color::Red) => red_wins += 1,
            Some(Color::White) => white_wins += 1,
            None if record.no_legal_move => blocked += 1,
            None => {}
        }
    }

    eprintln!("--- Training Summary ---");
    eprintln!("Epochs: {}", total);
    if total == 0 {
        return;
    }
    eprintln!("Red wins: {}", red_wins);
    eprintln!("White wins: {}", white_wins);
    eprintln!("Blocked: {}", blocked);
    eprintln!("Undecided: {}", total - red_wins - white_wins - blocked);
    eprintln!("Avg plies: {:.1}", total_plies as f64 / total as f64);
    eprintln!("Final weights: {}", report.weights);
}
