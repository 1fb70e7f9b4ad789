//! Fixed-depth minimax over successor boards.
//!
//! White is always the maximizing side and Red the minimizing side, matching
//! the sign convention of the evaluator. Successors are visited in the order
//! produced by `legal_plies`, and only a strictly better score replaces the
//! current best, so the first of several equal successors is kept.

use std::io::Write;
use std::time::{Duration, Instant};

use crate::board::{BoardState, Color};
use crate::eval::{evaluate, Weights};
use crate::movegen::{legal_plies, Ply};

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 3;

/// How far and how long to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies to look ahead. Zero only evaluates the root.
    pub depth: u32,
    /// Thread alpha-beta bounds through the recursion. Does not change the
    /// chosen successor or its score.
    pub alpha_beta: bool,
    /// Once this many nodes have been visited, unexpanded nodes are scored
    /// as leaves.
    pub max_nodes: Option<u64>,
    /// Once this much time has passed, unexpanded nodes are scored as leaves.
    pub movetime: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth: DEFAULT_DEPTH,
            alpha_beta: true,
            max_nodes: None,
            movetime: None,
        }
    }
}

impl SearchLimits {
    pub fn with_depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            ..Default::default()
        }
    }
}

/// Outcome of a search with at least one legal move at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    /// The chosen successor, or the root itself for a depth-zero search.
    pub board: BoardState,
    /// The ply leading to `board`; `None` for a depth-zero search.
    pub ply: Option<Ply>,
    pub nodes: u64,
}

/// Conditions that end a search without a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{0} has no legal move")]
    NoLegalMove(Color),
}

#[inline]
fn is_better(score: f64, best: f64, maximizing: bool) -> bool {
    if maximizing {
        score > best
    } else {
        score < best
    }
}

/// Plain minimax without pruning or budgets.
///
/// Returns the best reachable score and the successor board that achieves
/// it. At depth zero, or when `to_move` has no legal move, returns the
/// evaluation of `board` together with `board` itself.
pub fn minimax(
    board: &BoardState,
    depth: u32,
    to_move: Color,
    weights: &Weights,
) -> (f64, BoardState) {
    if depth == 0 {
        return (evaluate(board, weights), board.clone());
    }

    let maximizing = to_move == Color::White;
    let mut best: Option<(f64, BoardState)> = None;
    for ply in legal_plies(board, to_move) {
        let child = ply.apply(board);
        let (score, _) = minimax(&child, depth - 1, to_move.opponent(), weights);
        let replace = match &best {
            Some((best_score, _)) => is_better(score, *best_score, maximizing),
            None => true,
        };
        if replace {
            best = Some((score, child));
        }
    }

    match best {
        Some(found) => found,
        None => (evaluate(board, weights), board.clone()),
    }
}

/// Recursion state shared across one search.
struct Searcher<'a> {
    weights: &'a Weights,
    limits: &'a SearchLimits,
    start: Instant,
    nodes: u64,
    stopped: bool,
}

impl Searcher<'_> {
    /// Latches `stopped` once a node or time budget runs out.
    fn exhausted(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(max) = self.limits.max_nodes {
            if self.nodes >= max {
                self.stopped = true;
            }
        }
        if let Some(limit) = self.limits.movetime {
            // Check the clock every 64 nodes.
            if self.nodes & 63 == 0 && self.start.elapsed() >= limit {
                self.stopped = true;
            }
        }
        self.stopped
    }

    /// Value of `board` with `to_move` to play and `depth` plies left.
    fn value(
        &mut self,
        board: &BoardState,
        depth: u32,
        to_move: Color,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.nodes += 1;
        // Leaves count toward the budgets too.
        if self.exhausted() || depth == 0 {
            return evaluate(board, self.weights);
        }

        let plies = legal_plies(board, to_move);
        if plies.is_empty() {
            return evaluate(board, self.weights);
        }

        let maximizing = to_move == Color::White;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for ply in &plies {
            let child = ply.apply(board);
            let score = self.value(&child, depth - 1, to_move.opponent(), alpha, beta);
            if is_better(score, best, maximizing) {
                best = score;
            }
            if self.stopped {
                break;
            }
            if self.limits.alpha_beta {
                if maximizing {
                    alpha = alpha.max(best);
                } else {
                    beta = beta.min(best);
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        best
    }
}

/// Searches for the best move of `to_move` and reports progress to `out`.
///
/// Never mutates `board`. A depth-zero search returns the evaluation of the
/// root unchanged. With depth above zero and no legal move at the root,
/// returns [`SearchError::NoLegalMove`].
pub fn search<W: Write>(
    board: &BoardState,
    to_move: Color,
    weights: &Weights,
    limits: &SearchLimits,
    out: &mut W,
) -> Result<SearchResult, SearchError> {
    let mut searcher = Searcher {
        weights,
        limits,
        start: Instant::now(),
        nodes: 1,
        stopped: false,
    };

    let result = if limits.depth == 0 {
        SearchResult {
            score: evaluate(board, weights),
            board: board.clone(),
            ply: None,
            nodes: 1,
        }
    } else {
        let plies = legal_plies(board, to_move);
        if plies.is_empty() {
            return Err(SearchError::NoLegalMove(to_move));
        }

        let maximizing = to_move == Color::White;
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(f64, Ply, BoardState)> = None;

        for ply in plies {
            let child = ply.apply(board);
            let score =
                searcher.value(&child, limits.depth - 1, to_move.opponent(), alpha, beta);
            let replace = match &best {
                Some((best_score, _, _)) => is_better(score, *best_score, maximizing),
                None => true,
            };
            if replace {
                if limits.alpha_beta {
                    if maximizing {
                        alpha = score;
                    } else {
                        beta = score;
                    }
                }
                best = Some((score, ply, child));
            }
        }

        match best {
            Some((score, ply, child)) => SearchResult {
                score,
                board: child,
                ply: Some(ply),
                nodes: searcher.nodes,
            },
            None => return Err(SearchError::NoLegalMove(to_move)),
        }
    };

    let _ = writeln!(
        out,
        "info depth {} nodes {} score {:.4} time {}",
        limits.depth,
        result.nodes,
        result.score,
        searcher.start.elapsed().as_millis()
    );

    Ok(result)
}
