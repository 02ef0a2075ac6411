//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let connection_status = if store.app.connected {
            Span::styled("● Live", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Offline", Style::default().fg(Color::Red))
        };

        let sync_label = if store.app.backoff_active {
            Span::styled(
                format!(" Next Sync: {}s (backoff) ", store.app.next_sync_secs),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled(
                format!(" Next Sync: {}s ", store.app.next_sync_secs),
                Style::default().fg(Color::Gray),
            )
        };

        let rally = if store.app.rally_mode {
            Span::styled(" Rally Mode ON ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" Rally Mode OFF ", Style::default().fg(Color::DarkGray))
        };

        let logged = Span::styled(
            format!(" {} events logged ", store.history.len()),
            Style::default().fg(Color::Gray),
        );

        let loading = if store.app.loading {
            Span::styled(
                " Scanning trends... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::DarkGray));

        let left_content = vec![
            Span::styled(
                " 🗳 VoteSphere ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("|"),
            connection_status,
            Span::raw("|"),
            sync_label,
            Span::raw("|"),
            rally,
            Span::raw("|"),
            logged,
            loading,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint
        let left_len: usize = status_line.spans.iter().map(|s| s.content.len()).sum();
        let right_len = help_hint.content.len();
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
