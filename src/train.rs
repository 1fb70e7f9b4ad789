//! Online weight updates for the linear evaluator.
//!
//! One sample, one step: every weight moves by `lr * feature * loss`. There is
//! no fixed objective; the loss is whatever scalar the caller derives from
//! its latest search scores.

use crate::eval::{Features, Weights};

/// Target score for a decided game, from White's side of the scale.
/// White wins aim at `+TERMINAL_TARGET`, Red wins at `-TERMINAL_TARGET`.
pub const TERMINAL_TARGET: f64 = 24.0;

/// Default learning rate used by self-play.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Difference between a target value and a predicted one.
pub fn criterion(target: f64, predicted: f64) -> f64 {
    target - predicted
}

/// Applies `weights[i] += lr * features[i] * loss` to every weight.
pub fn optimize(weights: &mut Weights, features: &Features, loss: f64, lr: f64) {
    for (w, f) in weights.0.iter_mut().zip(features.0.iter()) {
        *w += lr * f * loss;
    }
}
