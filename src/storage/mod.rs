//! Durable local storage.
//!
//! Two JSON slot files in the data directory: one for the bounded sentiment
//! history, one for feedback votes. Slots are read once at startup and
//! rewritten on every mutation. A missing or corrupt slot is never fatal;
//! it just yields an empty value.

use crate::error::{Error, Result};
use crate::state::{FeedbackState, HistoryLog, SentimentPost};
use std::path::{Path, PathBuf};

const HISTORY_SLOT: &str = "sentiment_history.json";
const FEEDBACK_SLOT: &str = "feedback_votes.json";

/// Handle to the storage slots.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage rooted at the platform data directory.
    pub fn open() -> Result<Self> {
        Self::at(crate::config::data_dir()?)
    }

    /// Storage rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_SLOT)
    }

    fn feedback_path(&self) -> PathBuf {
        self.dir.join(FEEDBACK_SLOT)
    }

    /// Load the history archive, re-applying the configured capacity.
    pub fn load_history(&self, capacity: usize) -> HistoryLog {
        let posts: Vec<SentimentPost> = read_slot(&self.history_path()).unwrap_or_default();
        HistoryLog::from_posts(posts, capacity)
    }

    /// Persist the history archive.
    pub fn save_history(&self, history: &HistoryLog) -> Result<()> {
        write_slot(&self.history_path(), &history.posts())
    }

    /// Load feedback votes.
    pub fn load_feedback(&self) -> FeedbackState {
        read_slot(&self.feedback_path()).unwrap_or_default()
    }

    /// Persist feedback votes.
    pub fn save_feedback(&self, feedback: &FeedbackState) -> Result<()> {
        write_slot(&self.feedback_path(), feedback)
    }
}

fn read_slot<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read storage slot");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt storage slot, starting empty");
            None
        }
    }
}

fn write_slot<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(|e| Error::storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Platform, Sentiment, Verdict};
    use pretty_assertions::assert_eq;

    fn temp_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("votesphere-test-{}", uuid::Uuid::new_v4()));
        Storage::at(dir).unwrap()
    }

    fn post(author: &str) -> SentimentPost {
        SentimentPost {
            platform: Platform::Facebook,
            author: author.to_string(),
            content: format!("{author} says hello"),
            sentiment: Sentiment::Neutral,
            posted_at_label: "Just now".to_string(),
        }
    }

    #[test]
    fn history_roundtrips_through_the_slot() {
        let storage = temp_storage();
        let mut history = HistoryLog::new(50);
        history.merge(&[post("a"), post("b")]);

        storage.save_history(&history).unwrap();
        let loaded = storage.load_history(50);

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.posts()[0].author, history.posts()[0].author);
    }

    #[test]
    fn loading_reapplies_a_smaller_capacity() {
        let storage = temp_storage();
        let mut history = HistoryLog::new(50);
        let batch: Vec<_> = (0..30).map(|i| post(&format!("u{i}"))).collect();
        history.merge(&batch);
        storage.save_history(&history).unwrap();

        let loaded = storage.load_history(20);
        assert_eq!(loaded.len(), 20);
    }

    #[test]
    fn missing_slot_yields_an_empty_history() {
        let storage = temp_storage();
        assert!(storage.load_history(50).is_empty());
    }

    #[test]
    fn corrupt_slot_yields_an_empty_history() {
        let storage = temp_storage();
        std::fs::write(storage.history_path(), "not json at all").unwrap();
        assert!(storage.load_history(50).is_empty());
    }

    #[test]
    fn feedback_roundtrips_through_its_own_slot() {
        let storage = temp_storage();
        let mut feedback = FeedbackState::default();
        feedback.record(&post("a"), Verdict::Positive);

        storage.save_feedback(&feedback).unwrap();
        let loaded = storage.load_feedback();

        assert_eq!(loaded.votes().len(), 1);
        assert_eq!(loaded.verdict_for(&post("a")), Some(Verdict::Positive));
    }
}
