//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Feed,
    History,
    Sources,
}

/// A user-visible sync error with its retry affordance.
#[derive(Debug, Clone)]
pub struct SyncError {
    /// Message shown in the error banner.
    pub message: String,
    /// Short classification shown alongside (e.g. "Rate Limit (429)").
    pub kind_label: String,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current user-visible sync error.
    pub error: Option<SyncError>,
    /// Whether the app is loading data.
    pub loading: bool,
    /// Whether the last round-trip to the predictor succeeded.
    pub connected: bool,
    /// Whether rally mode (background audio) is on.
    pub rally_mode: bool,
    /// Seconds until the next automatic sync, for the status bar.
    pub next_sync_secs: u64,
    /// Whether the poll controller is in backoff.
    pub backoff_active: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self {
            current_view: View::Dashboard,
            connected: false,
            ..Default::default()
        }
    }
}
