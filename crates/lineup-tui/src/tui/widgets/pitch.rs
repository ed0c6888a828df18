// Pitch widget: the playing surface, the goalkeeper zone and placed tokens.
//
// Token labels are centred on the cell holding the token's position and
// shifted inward when they would overflow the surface. The same label
// geometry is used for hit-testing mouse presses.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use lineup_core::formation::lineup::{PlayerToken, PITCH_CAPACITY};

use crate::tui::layout::{contains_cell, AppLayout, PitchView};
use crate::tui::ViewState;

const GRASS: Color = Color::Green;
const LINE: Color = Color::White;
const MAX_LABEL: usize = 10;

/// Text drawn for a token.
pub fn token_label(token: &PlayerToken) -> String {
    let name: String = token.name.chars().take(MAX_LABEL).collect();
    if token.is_goalkeeper() {
        format!("GK {name}")
    } else {
        name
    }
}

/// Cells covered by a token's label on the surface `view.area`.
pub fn label_rect(view: &PitchView, token: &PlayerToken) -> Option<Rect> {
    let position = token.position?;
    if view.area.width == 0 || view.area.height == 0 {
        return None;
    }
    let (col, row) = view.to_cell(position);
    let len = (token_label(token).chars().count() as u16).min(view.area.width);
    let right_limit = view.area.x + view.area.width - len;
    let start = col.saturating_sub(len / 2).clamp(view.area.x, right_limit);
    Some(Rect::new(start, row, len, 1))
}

/// Name of the pitch token drawn at `(col, row)`, topmost first.
pub fn token_at<'a>(view: &PitchView, pitch: &'a [PlayerToken], col: u16, row: u16) -> Option<&'a str> {
    pitch
        .iter()
        .rev()
        .find(|t| label_rect(view, t).is_some_and(|r| contains_cell(r, col, row)))
        .map(|t| t.name.as_str())
}

pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let title = format!(
        "Pitch ({}/{})",
        state.lineup.pitch_count(),
        PITCH_CAPACITY
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(block, layout.pitch);

    let view = PitchView::new(layout.pitch_inner(), state.geometry.pitch);
    draw_surface(frame.buffer_mut(), &view, state);
}

fn draw_surface(buf: &mut Buffer, view: &PitchView, state: &ViewState) {
    let area = view.area;
    if area.width == 0 || area.height == 0 {
        return;
    }

    buf.set_style(area, Style::default().bg(GRASS));

    // Halfway line.
    let mid = area.y + area.height / 2;
    buf.set_string(
        area.x,
        mid,
        "─".repeat(area.width as usize),
        Style::default().fg(LINE).bg(GRASS),
    );

    // Goalkeeper zone, highlighted while a token hovers over it.
    let gk = state.geometry.gk_zone;
    let zone = view.to_cell_rect(gk.left, gk.top, gk.width, gk.height);
    let zone_style = if state.over_gk_zone {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    } else {
        Style::default().bg(Color::LightGreen).fg(Color::Black)
    };
    buf.set_style(zone, zone_style);
    buf.set_stringn(
        zone.x,
        zone.y,
        "GK",
        zone.width as usize,
        zone_style.add_modifier(Modifier::DIM),
    );

    for token in &state.lineup.pitch {
        let Some(rect) = label_rect(view, token) else {
            continue;
        };
        let mut style = if token.is_goalkeeper() {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().bg(Color::White).fg(Color::Black)
        };
        if state.dragged.as_deref() == Some(token.name.as_str()) {
            style = style.add_modifier(Modifier::DIM | Modifier::ITALIC);
        }
        buf.set_stringn(rect.x, rect.y, token_label(token), rect.width as usize, style);
    }

    // Ghost of the held token under the pointer.
    if let (Some(name), Some((col, row))) = (state.dragged.as_deref(), state.drag_cursor) {
        if contains_cell(area, col, row) {
            let len = (name.chars().count() as u16).min(area.x + area.width - col);
            buf.set_stringn(
                col,
                row,
                name,
                len as usize,
                Style::default()
                    .bg(Color::Magenta)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
