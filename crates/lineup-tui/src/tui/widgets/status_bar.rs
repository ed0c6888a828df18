// Status bar: pitch count, goalkeeper, drag state and last save time.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lineup_core::formation::lineup::PITCH_CAPACITY;

use crate::tui::ViewState;

pub fn status_text(state: &ViewState) -> String {
    let gk = state
        .lineup
        .goalkeeper()
        .map(|t| t.name.as_str())
        .unwrap_or("--");
    let mut text = format!(
        " Lineup | On pitch {}/{} | GK: {}",
        state.lineup.pitch_count(),
        PITCH_CAPACITY,
        gk
    );
    if let Some(ref name) = state.dragged {
        text.push_str(&format!(" | Dragging {name}"));
    }
    if let Some(at) = state.last_saved {
        text.push_str(&format!(" | Saved {}", at.format("%H:%M:%S")));
    }
    text
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        status_text(state),
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
