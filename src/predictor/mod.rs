//! Remote predictor integration layer.
//!
//! The predictor is an opaque hosted generative-AI search API; this module
//! wraps it behind the [`Predictor`] trait so the app (and tests) never talk
//! to the wire types directly.

mod client;
mod prompt;
mod wire;

pub use client::ElectionPredictor;
pub use prompt::build_prompt;

use crate::error::Result;
use crate::state::{PredictionSnapshot, SentimentPost};
use async_trait::async_trait;

/// Everything one successful predictor call yields: the snapshot that
/// replaces the current prediction, plus the raw sentiment batch that gets
/// merged into the history archive.
#[derive(Debug, Clone)]
pub struct PredictionBundle {
    pub snapshot: PredictionSnapshot,
    pub feed: Vec<SentimentPost>,
}

/// A service that can produce an election prediction for a date label.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Fetch a prediction. May retry internally a bounded number of times
    /// before surfacing failure upward.
    async fn predict(&self, election_date: &str) -> Result<PredictionBundle>;
}
