//! Sentiment feed and bounded history archive.

use serde::{Deserialize, Serialize};

/// Platform a sentiment post was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    YouTube,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Facebook => write!(f, "facebook"),
            Self::YouTube => write!(f, "youtube"),
        }
    }
}

/// Sentiment classification of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "pro-al")]
    ProAl,
    #[serde(rename = "pro-bnp")]
    ProBnp,
    #[serde(rename = "pro-jam")]
    ProJam,
    #[serde(rename = "neutral")]
    Neutral,
}

impl Sentiment {
    /// Short label for display (the leaning without the "pro-" prefix).
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProAl => "al",
            Self::ProBnp => "bnp",
            Self::ProJam => "jam",
            Self::Neutral => "neutral",
        }
    }
}

/// A single scanned social-media post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentPost {
    pub platform: Platform,
    pub author: String,
    pub content: String,
    pub sentiment: Sentiment,
    /// Human-readable label such as "Just now"; not a parseable timestamp.
    pub posted_at_label: String,
}

impl SentimentPost {
    /// Identity key: (author, timestamp label). Not globally unique; only
    /// used locally for de-duplication and feedback-vote keying.
    pub fn identity_key(&self) -> (&str, &str) {
        (&self.author, &self.posted_at_label)
    }

    /// Whether two posts count as the same entry for merge purposes.
    /// Matching content alone also qualifies, since the remote service
    /// re-emits identical comments under fresh labels.
    pub fn duplicates(&self, other: &Self) -> bool {
        self.content == other.content || self.identity_key() == other.identity_key()
    }
}

/// Bounded, most-recent-first archive of sentiment posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLog {
    posts: Vec<SentimentPost>,
    capacity: usize,
}

impl HistoryLog {
    /// Create an empty log with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            posts: Vec::new(),
            capacity,
        }
    }

    /// Rebuild a log from previously persisted posts, re-applying the cap.
    pub fn from_posts(posts: Vec<SentimentPost>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        log.posts = posts;
        log.posts.truncate(capacity);
        log
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts, most recent first.
    pub fn posts(&self) -> &[SentimentPost] {
        &self.posts
    }

    /// Merge a freshly fetched batch into the log.
    ///
    /// Unseen posts are prepended in batch order; the combined list is
    /// truncated to capacity by dropping the oldest entries. Returns the
    /// number of posts actually added.
    pub fn merge(&mut self, batch: &[SentimentPost]) -> usize {
        let mut fresh: Vec<SentimentPost> = Vec::new();
        for post in batch {
            let seen = self.posts.iter().chain(fresh.iter()).any(|p| p.duplicates(post));
            if !seen {
                fresh.push(post.clone());
            }
        }

        let added = fresh.len();
        fresh.append(&mut self.posts);
        self.posts = fresh;
        self.posts.truncate(self.capacity);
        added
    }
}

/// State for the live sentiment feed (the current batch).
#[derive(Debug, Default)]
pub struct FeedState {
    /// Posts from the most recent successful sync.
    pub posts: Vec<SentimentPost>,
    /// Currently selected post index.
    pub selected_index: Option<usize>,
}

impl FeedState {
    /// The currently selected post.
    pub fn selected_post(&self) -> Option<&SentimentPost> {
        self.selected_index.and_then(|i| self.posts.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(author: &str, content: &str, label: &str) -> SentimentPost {
        SentimentPost {
            platform: Platform::Facebook,
            author: author.to_string(),
            content: content.to_string(),
            sentiment: Sentiment::Neutral,
            posted_at_label: label.to_string(),
        }
    }

    #[test]
    fn merge_prepends_new_posts() {
        let mut log = HistoryLog::new(50);
        log.merge(&[post("a", "old news", "1h")]);
        let added = log.merge(&[post("b", "fresh take", "Just now")]);

        assert_eq!(added, 1);
        assert_eq!(log.posts()[0].author, "b");
        assert_eq!(log.posts()[1].author, "a");
    }

    #[test]
    fn merge_skips_posts_with_matching_content() {
        let mut log = HistoryLog::new(50);
        log.merge(&[post("a", "same words", "1h")]);
        // Same content under a different author/label is still a duplicate.
        let added = log.merge(&[post("b", "same words", "Just now")]);

        assert_eq!(added, 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn merge_skips_posts_with_matching_identity_key() {
        let mut log = HistoryLog::new(50);
        log.merge(&[post("a", "first wording", "Just now")]);
        let added = log.merge(&[post("a", "second wording", "Just now")]);

        assert_eq!(added, 0);
    }

    #[test]
    fn merge_dedupes_within_the_incoming_batch() {
        let mut log = HistoryLog::new(50);
        let added = log.merge(&[
            post("a", "echo", "Just now"),
            post("a", "echo", "Just now"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn no_two_entries_share_an_identity_key_after_merges() {
        let mut log = HistoryLog::new(50);
        for round in 0..5 {
            let batch: Vec<_> = (0..4)
                .map(|i| post(&format!("user{}", i % 3), &format!("c{round}-{i}"), "Just now"))
                .collect();
            log.merge(&batch);
        }

        let mut keys: Vec<_> = log
            .posts()
            .iter()
            .map(|p| (p.author.clone(), p.posted_at_label.clone()))
            .collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut log = HistoryLog::new(20);
        for round in 0..30 {
            let batch: Vec<_> = (0..4)
                .map(|i| post(&format!("u{round}-{i}"), &format!("c{round}-{i}"), "Just now"))
                .collect();
            log.merge(&batch);
            assert!(log.len() <= log.capacity());
        }
        assert_eq!(log.len(), 20);
    }

    #[test]
    fn capacity_drops_oldest_entries() {
        let mut log = HistoryLog::new(20);
        log.merge(&[post("first", "the very first post", "1h")]);
        for round in 0..10 {
            let batch: Vec<_> = (0..4)
                .map(|i| post(&format!("u{round}-{i}"), &format!("c{round}-{i}"), "Just now"))
                .collect();
            log.merge(&batch);
        }

        assert!(log.posts().iter().all(|p| p.author != "first"));
    }
}
