// Yes/no confirmation overlay, used before reset and quit.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::tui::ConfirmKind;

const DIALOG_HEIGHT: u16 = 5;

impl ConfirmKind {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmKind::Reset => " Reset? ",
            ConfirmKind::Quit => " Quit? ",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            ConfirmKind::Reset => "Reset formation?",
            ConfirmKind::Quit => "Really quit?",
        }
    }
}

/// Render the confirmation dialog centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, kind: ConfirmKind) {
    let question = kind.question();
    // "  <question> (y/n)  " plus borders
    let width = question.len() as u16 + 12;
    let dialog_area = centered_rect(width, DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            kind.title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let text = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(format!("  {question} (")),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}
