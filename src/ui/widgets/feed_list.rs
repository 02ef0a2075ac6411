//! Live sentiment feed widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use super::{sentiment_color, truncate_string};
use crate::state::{Store, Verdict};

/// Sentiment feed widget.
pub struct FeedList;

impl FeedList {
    /// Render the live feed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let header_cells = ["", "Platform", "Author", "Leaning", "Content"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.feed.posts.iter().map(|post| {
            let marker = match store.feedback.verdict_for(post) {
                Some(Verdict::Positive) => Cell::from("▲").style(Style::default().fg(Color::Green)),
                Some(Verdict::Negative) => Cell::from("▼").style(Style::default().fg(Color::Red)),
                None => Cell::from(" "),
            };

            let cells = vec![
                marker,
                Cell::from(post.platform.to_string()),
                Cell::from(post.author.clone()),
                Cell::from(post.sentiment.label())
                    .style(Style::default().fg(sentiment_color(post.sentiment))),
                Cell::from(truncate_string(&post.content, 60)),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(9),
                Constraint::Min(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Live Sentiment Feed ({}) ", store.feed.posts.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.feed.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }
}
