// Alert overlay: a message the user dismisses with any key or click.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;

const MIN_WIDTH: u16 = 24;
const MAX_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.chars().count() as u16)
        .saturating_add(6)
        .clamp(MIN_WIDTH, MAX_WIDTH);
    let dialog_area = centered_rect(width, DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Notice ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let text = vec![
        Line::raw(format!(" {message}")),
        Line::raw(""),
        Line::styled(
            " press any key",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}
