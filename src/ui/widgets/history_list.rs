//! Sentiment history archive widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use super::{sentiment_color, truncate_string};
use crate::state::Store;

/// History archive widget.
pub struct HistoryList;

impl HistoryList {
    /// Render the archive, most recent first.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let header_cells = ["Author", "Leaning", "When", "Content"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.history.posts().iter().map(|post| {
            let cells = vec![
                Cell::from(post.author.clone()),
                Cell::from(post.sentiment.label())
                    .style(Style::default().fg(sentiment_color(post.sentiment))),
                Cell::from(post.posted_at_label.clone())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate_string(&post.content, 70)),
            ];
            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Min(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Sentiment History Archive ({}/{}) ",
                    store.history.len(),
                    store.history.capacity()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, area);
    }
}
