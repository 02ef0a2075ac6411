//! State management for VoteSphere.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod feed_state;
mod feedback_state;
mod prediction_state;

pub use app_state::{AppState, SyncError, View};
pub use feed_state::{FeedState, HistoryLog, Platform, Sentiment, SentimentPost};
pub use feedback_state::{FeedbackState, FeedbackVote, Verdict};
pub use prediction_state::{GroundingSource, PartyShare, PredictionSnapshot, PredictionState};

use crate::error::Result;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    ScrollUp,
    ScrollDown,
    ToggleHelp,

    // Sync lifecycle
    RequestSync { manual: bool },
    SyncStarted,
    PredictionLoaded {
        snapshot: PredictionSnapshot,
        feed: Vec<SentimentPost>,
    },
    PollStateChanged {
        next_sync_secs: u64,
        backoff_active: bool,
    },
    /// A sync attempt failed. `error` is present only when the failure
    /// should be surfaced to the user; silent automatic rate-limit failures
    /// carry `None`.
    SyncFailed { error: Option<SyncError> },

    // Feedback
    VoteUp,
    VoteDown,

    // Rally mode (media toggle)
    ToggleRallyMode,

    // UI
    ShowNotification(Notification),
    DismissNotification,

    // Error handling
    ClearError,

    // Connection status
    SetConnected(bool),

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Current prediction.
    pub prediction: PredictionState,
    /// Live sentiment feed.
    pub feed: FeedState,
    /// Bounded history archive.
    pub history: HistoryLog,
    /// Local feedback votes.
    pub feedback: FeedbackState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender and history capacity.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, history_capacity: usize) -> Self {
        Self {
            app: AppState::new(),
            prediction: PredictionState::default(),
            feed: FeedState::default(),
            history: HistoryLog::new(history_capacity),
            feedback: FeedbackState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => {
                self.app.current_view = view;
            }
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,

            // Sync lifecycle
            Action::RequestSync { .. } => {
                // Side-effecting; executed by the app, not the reducer.
            }
            Action::SyncStarted => {
                self.app.loading = true;
                self.prediction.loading = true;
            }
            Action::PredictionLoaded { snapshot, feed } => {
                self.history.merge(&feed);
                self.feed.posts = feed;
                self.feed.selected_index = if self.feed.posts.is_empty() {
                    None
                } else {
                    // Keep the cursor in range when the new batch is smaller.
                    Some(
                        self.feed
                            .selected_index
                            .unwrap_or(0)
                            .min(self.feed.posts.len() - 1),
                    )
                };
                self.prediction.snapshot = Some(snapshot);
                self.prediction.last_updated = Some(chrono::Utc::now());
                self.prediction.loading = false;
                self.app.loading = false;
            }
            Action::PollStateChanged {
                next_sync_secs,
                backoff_active,
            } => {
                self.app.next_sync_secs = next_sync_secs;
                self.app.backoff_active = backoff_active;
            }

            // Feedback
            Action::VoteUp => self.vote(Verdict::Positive),
            Action::VoteDown => self.vote(Verdict::Negative),

            // Rally mode
            Action::ToggleRallyMode => {
                self.app.rally_mode = !self.app.rally_mode;
            }

            // UI
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            Action::SyncFailed { error } => {
                self.app.loading = false;
                self.prediction.loading = false;
                if let Some(error) = error {
                    self.app.error = Some(error);
                }
            }

            // Error handling
            Action::ClearError => {
                self.app.error = None;
            }

            // Connection status
            Action::SetConnected(connected) => {
                self.app.connected = connected;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn vote(&mut self, verdict: Verdict) {
        if self.app.current_view != View::Feed {
            return;
        }
        if let Some(post) = self.feed.selected_post() {
            let post = post.clone();
            self.feedback.record(&post, verdict);
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Feed => {
                let len = self.feed.posts.len();
                if len == 0 {
                    return;
                }
                let current = self.feed.selected_index.unwrap_or(0) as i32;
                let new_index = (current + delta).max(0) as usize;
                self.feed.selected_index = Some(new_index.min(len - 1));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, 50)
    }

    fn sample_feed(n: usize) -> Vec<SentimentPost> {
        (0..n)
            .map(|i| SentimentPost {
                platform: Platform::Facebook,
                author: format!("user{i}"),
                content: format!("comment {i}"),
                sentiment: Sentiment::Neutral,
                posted_at_label: "Just now".to_string(),
            })
            .collect()
    }

    fn sample_snapshot() -> PredictionSnapshot {
        PredictionSnapshot {
            party_shares: vec![PartyShare {
                party: "Awami League".to_string(),
                percentage: dec!(42),
                leader: "Sheikh Hasina".to_string(),
                color_tag: "#006a4e".to_string(),
            }],
            analysis: "digital pulse".to_string(),
            projected_leader: "Sheikh Hasina".to_string(),
            sources: Vec::new(),
            captured_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn prediction_loaded_replaces_snapshot_and_merges_history() {
        let mut store = store();

        store.reduce(Action::PredictionLoaded {
            snapshot: sample_snapshot(),
            feed: sample_feed(4),
        });

        assert!(store.prediction.snapshot.is_some());
        assert_eq!(store.feed.posts.len(), 4);
        assert_eq!(store.history.len(), 4);
        assert!(!store.app.loading);
    }

    #[test]
    fn repeated_loads_do_not_duplicate_history() {
        let mut store = store();

        store.reduce(Action::PredictionLoaded {
            snapshot: sample_snapshot(),
            feed: sample_feed(4),
        });
        store.reduce(Action::PredictionLoaded {
            snapshot: sample_snapshot(),
            feed: sample_feed(4),
        });

        assert_eq!(store.history.len(), 4);
    }

    #[test]
    fn voting_targets_the_selected_feed_post() {
        let mut store = store();
        store.reduce(Action::PredictionLoaded {
            snapshot: sample_snapshot(),
            feed: sample_feed(3),
        });
        store.reduce(Action::SetView(View::Feed));
        store.reduce(Action::ScrollDown);
        store.reduce(Action::VoteUp);

        let post = store.feed.posts[1].clone();
        assert_eq!(store.feedback.verdict_for(&post), Some(Verdict::Positive));
    }

    #[test]
    fn voting_outside_the_feed_view_is_ignored() {
        let mut store = store();
        store.reduce(Action::PredictionLoaded {
            snapshot: sample_snapshot(),
            feed: sample_feed(3),
        });
        store.reduce(Action::VoteUp);

        assert!(store.feedback.votes().is_empty());
    }
}
