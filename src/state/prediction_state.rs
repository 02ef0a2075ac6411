//! Prediction snapshot state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One party's projected share of the vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyShare {
    /// Party name.
    pub party: String,
    /// Projected percentage, as produced by the remote service.
    pub percentage: Decimal,
    /// Party leader name.
    pub leader: String,
    /// Hex color tag used when charting the share.
    pub color_tag: String,
}

/// A web source the remote predictor grounded its answer on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// A complete prediction as returned by the remote predictor.
///
/// Percentages are not locally validated to sum to 100; `shares_total`
/// exposes the raw total so the UI can flag drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSnapshot {
    /// Party shares, in the order the service returned them.
    pub party_shares: Vec<PartyShare>,
    /// Brief analysis of the current digital pulse.
    pub analysis: String,
    /// The person the service projects as the likely leader.
    pub projected_leader: String,
    /// Grounding sources backing the prediction.
    pub sources: Vec<GroundingSource>,
    /// Wall-clock time the snapshot was captured locally.
    pub captured_at: DateTime<Utc>,
}

impl PredictionSnapshot {
    /// Sum of all party percentages as reported by the service.
    pub fn shares_total(&self) -> Decimal {
        self.party_shares.iter().map(|s| s.percentage).sum()
    }

    /// The share with the highest percentage, if any.
    pub fn leading_share(&self) -> Option<&PartyShare> {
        self.party_shares.iter().max_by_key(|s| s.percentage)
    }
}

/// State for the current prediction.
#[derive(Debug, Default)]
pub struct PredictionState {
    /// Latest snapshot, replaced wholesale on each successful sync.
    pub snapshot: Option<PredictionSnapshot>,
    /// Whether a sync is currently in flight.
    pub loading: bool,
    /// Last successful update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}
