// Bench widget: substitutes in bench order, one per row.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use lineup_core::formation::lineup::PlayerToken;

use crate::tui::layout::contains_cell;
use crate::tui::ViewState;

/// Name of the bench token on screen row `row` of the list area `inner`.
pub fn token_at<'a>(inner: Rect, bench: &'a [PlayerToken], col: u16, row: u16) -> Option<&'a str> {
    if !contains_cell(inner, col, row) {
        return None;
    }
    bench
        .get(usize::from(row - inner.y))
        .map(|t| t.name.as_str())
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = format!("Bench ({})", state.lineup.bench.len());
    let border_style = if state.dragged.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if state.lineup.bench.is_empty() {
        let paragraph = Paragraph::new("  Everyone is on the pitch.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .lineup
        .bench
        .iter()
        .map(|t| {
            let style = if state.dragged.as_deref() == Some(t.name.as_str()) {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!(" {}", t.name), style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
