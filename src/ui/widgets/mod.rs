//! TUI widgets.

mod feed_list;
mod help;
mod history_list;
mod notifications;
mod share_chart;
mod sources_panel;
mod status_bar;
mod tab_bar;

pub use feed_list::FeedList;
pub use help::HelpPanel;
pub use history_list::HistoryList;
pub use notifications::{render_error, render_notification};
pub use share_chart::ShareChart;
pub use sources_panel::SourcesPanel;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

use ratatui::style::Color;

/// Parse a `#rrggbb` color tag, falling back to white.
pub(crate) fn hex_color(tag: &str) -> Color {
    let hex = tag.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::White;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Sentiment tag color.
pub(crate) fn sentiment_color(sentiment: crate::state::Sentiment) -> Color {
    match sentiment {
        crate::state::Sentiment::ProAl => Color::Green,
        crate::state::Sentiment::ProBnp => Color::Yellow,
        crate::state::Sentiment::ProJam => Color::Cyan,
        crate::state::Sentiment::Neutral => Color::Gray,
    }
}

pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_party_color_tags() {
        assert_eq!(hex_color("#006a4e"), Color::Rgb(0, 0x6a, 0x4e));
        assert_eq!(hex_color("#ffcd00"), Color::Rgb(0xff, 0xcd, 0x00));
    }

    #[test]
    fn bad_color_tags_fall_back_to_white() {
        assert_eq!(hex_color("green"), Color::White);
        assert_eq!(hex_color("#zzzzzz"), Color::White);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer sentence", 10), "a longe...");
    }
}
