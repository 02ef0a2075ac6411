//! Local-only thumbs-up/down feedback on feed posts.
//!
//! Votes are annotations keyed by a post's identity key. They are persisted
//! in their own storage slot and never sent anywhere.

use super::SentimentPost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
}

/// A recorded user vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackVote {
    pub id: Uuid,
    pub author: String,
    pub posted_at_label: String,
    pub verdict: Verdict,
    pub recorded_at: DateTime<Utc>,
}

/// State for user feedback votes.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FeedbackState {
    votes: Vec<FeedbackVote>,
}

impl FeedbackState {
    pub fn from_votes(votes: Vec<FeedbackVote>) -> Self {
        Self { votes }
    }

    pub fn votes(&self) -> &[FeedbackVote] {
        &self.votes
    }

    /// Record a vote for a post. A later vote on the same post replaces the
    /// earlier verdict.
    pub fn record(&mut self, post: &SentimentPost, verdict: Verdict) {
        let key = post.identity_key();
        self.votes
            .retain(|v| (v.author.as_str(), v.posted_at_label.as_str()) != key);
        self.votes.push(FeedbackVote {
            id: Uuid::new_v4(),
            author: post.author.clone(),
            posted_at_label: post.posted_at_label.clone(),
            verdict,
            recorded_at: Utc::now(),
        });
    }

    /// The current verdict for a post, if any.
    pub fn verdict_for(&self, post: &SentimentPost) -> Option<Verdict> {
        let key = post.identity_key();
        self.votes
            .iter()
            .find(|v| (v.author.as_str(), v.posted_at_label.as_str()) == key)
            .map(|v| v.verdict)
    }

    /// Counts of (positive, negative) votes.
    pub fn tally(&self) -> (usize, usize) {
        let mut counts: HashMap<Verdict, usize> = HashMap::new();
        for vote in &self.votes {
            *counts.entry(vote.verdict).or_default() += 1;
        }
        (
            counts.get(&Verdict::Positive).copied().unwrap_or(0),
            counts.get(&Verdict::Negative).copied().unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Platform, Sentiment};
    use pretty_assertions::assert_eq;

    fn post(author: &str) -> SentimentPost {
        SentimentPost {
            platform: Platform::YouTube,
            author: author.to_string(),
            content: "a comment".to_string(),
            sentiment: Sentiment::Neutral,
            posted_at_label: "Just now".to_string(),
        }
    }

    #[test]
    fn revoting_replaces_the_previous_verdict() {
        let mut feedback = FeedbackState::default();
        let p = post("a");

        feedback.record(&p, Verdict::Positive);
        feedback.record(&p, Verdict::Negative);

        assert_eq!(feedback.verdict_for(&p), Some(Verdict::Negative));
        assert_eq!(feedback.votes().len(), 1);
    }

    #[test]
    fn tally_counts_by_verdict() {
        let mut feedback = FeedbackState::default();
        feedback.record(&post("a"), Verdict::Positive);
        feedback.record(&post("b"), Verdict::Positive);
        feedback.record(&post("c"), Verdict::Negative);

        assert_eq!(feedback.tally(), (2, 1));
    }
}
