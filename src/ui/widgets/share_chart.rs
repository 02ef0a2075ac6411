//! Party share chart for the dashboard view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use rust_decimal::prelude::ToPrimitive;

use super::hex_color;
use crate::state::Store;

/// Dashboard widget: party shares, projected leader and analysis.
pub struct ShareChart;

impl ShareChart {
    /// Render the dashboard.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(snapshot) = &store.prediction.snapshot else {
            render_waiting(frame, area, store.app.loading);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(snapshot.party_shares.len() as u16 * 2 + 2),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(area);

        // Share gauges
        let total = snapshot.shares_total();
        let mut title = format!(" Election Pulse ({} parties) ", snapshot.party_shares.len());
        if total != rust_decimal::Decimal::ONE_HUNDRED {
            // The remote service owns the numbers; drift is surfaced, not fixed.
            title = format!(" Election Pulse (shares total {total}%) ");
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                snapshot
                    .party_shares
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (share, row) in snapshot.party_shares.iter().zip(rows.iter()) {
            let pct = share.percentage.to_f64().unwrap_or(0.0).clamp(0.0, 100.0);
            let gauge = Gauge::default()
                .label(format!(
                    "{} ({}): {}%",
                    share.party, share.leader, share.percentage
                ))
                .ratio(pct / 100.0)
                .gauge_style(Style::default().fg(hex_color(&share.color_tag)));
            frame.render_widget(gauge, *row);
        }

        // Projected leader
        let leader = Paragraph::new(Line::from(vec![
            Span::styled(
                " Likely Prime Minister: ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                &snapshot.projected_leader,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   captured {}", snapshot.captured_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(leader, chunks[1]);

        // Analysis
        let analysis = Paragraph::new(snapshot.analysis.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Digital Pulse Analysis ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(analysis, chunks[2]);
    }
}

fn render_waiting(frame: &mut Frame, area: Rect, loading: bool) {
    let message = if loading {
        "Connecting to Digital Bangladesh..."
    } else {
        "No prediction yet. Press r to sync."
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )))
    .block(
        Block::default()
            .title(" Election Pulse ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}
