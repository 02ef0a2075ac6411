//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{FeedList, HelpPanel, HistoryList, ShareChart, SourcesPanel, StatusBar, TabBar};

use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        // Render status bar
        StatusBar::render(frame, layout.status_area, store);

        // Render tab bar
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current view
        match store.app.current_view {
            crate::state::View::Dashboard => {
                ShareChart::render(frame, layout.main_area, store);
            }
            crate::state::View::Feed => {
                FeedList::render(frame, layout.main_area, store);
            }
            crate::state::View::History => {
                HistoryList::render(frame, layout.main_area, store);
            }
            crate::state::View::Sources => {
                SourcesPanel::render(frame, layout.main_area, store);
            }
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }

        // Render error banner if present
        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        }
    }
}
