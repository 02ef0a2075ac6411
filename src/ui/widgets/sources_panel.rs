//! Grounding sources widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::Store;

/// Panel listing the web sources the prediction was grounded on.
pub struct SourcesPanel;

impl SourcesPanel {
    /// Render the sources list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let sources = store
            .prediction
            .snapshot
            .as_ref()
            .map(|s| s.sources.as_slice())
            .unwrap_or_default();

        let items: Vec<ListItem> = sources
            .iter()
            .map(|source| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        source.title.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", source.uri),
                        Style::default().fg(Color::Blue),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!(" Grounding Sources ({}) ", sources.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(list, area);
    }
}
