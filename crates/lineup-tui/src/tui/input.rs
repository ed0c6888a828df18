// Keyboard and mouse input handling.
//
// Translates crossterm events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (dialogs, drag cursor).

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::protocol::{DropTarget, UserCommand};

use super::layout::{contains_cell, PitchView};
use super::widgets::{bench, pitch};
use super::{ConfirmKind, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it only changed `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Release events on some platforms; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.alert.is_some() {
        view_state.alert = None;
        return None;
    }

    if let Some(kind) = view_state.confirm {
        return handle_confirm(key_event, view_state, kind);
    }

    match key_event.code {
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UserCommand::Save),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            view_state.confirm = Some(ConfirmKind::Reset);
            None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            view_state.confirm = Some(ConfirmKind::Quit);
            None
        }
        KeyCode::Esc if view_state.dragged.is_some() || view_state.drag_cursor.is_some() => {
            view_state.drag_cursor = None;
            Some(UserCommand::EndDrag)
        }
        _ => None,
    }
}

/// Keys while a yes/no dialog is open: y confirms, n/Esc cancels, everything
/// else is blocked.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    kind: ConfirmKind,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.confirm = None;
            match kind {
                ConfirmKind::Reset => Some(UserCommand::Reset),
                ConfirmKind::Quit => Some(UserCommand::Quit),
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

/// Handle a mouse event.
///
/// A left press on a token starts a drag, movement reports the pointer in
/// pitch pixels, and the release drops onto the pitch or the bench. A
/// release anywhere else ends the drag without moving the token.
pub fn handle_mouse(mouse_event: MouseEvent, view_state: &mut ViewState) -> Vec<UserCommand> {
    if view_state.confirm.is_some() {
        return Vec::new();
    }

    let (col, row) = (mouse_event.column, mouse_event.row);

    if view_state.alert.is_some() {
        if let MouseEventKind::Down(_) = mouse_event.kind {
            view_state.alert = None;
        }
        return Vec::new();
    }

    let layout = view_state.layout();
    let surface = layout.pitch_inner();
    let view = PitchView::new(surface, view_state.geometry.pitch);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let name = if contains_cell(surface, col, row) {
                pitch::token_at(&view, &view_state.lineup.pitch, col, row)
            } else {
                bench::token_at(layout.bench_inner(), &view_state.lineup.bench, col, row)
            };
            match name {
                Some(name) => {
                    view_state.drag_cursor = Some((col, row));
                    vec![UserCommand::StartDrag(name.to_string())]
                }
                None => Vec::new(),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if view_state.drag_cursor.is_none() {
                return Vec::new();
            }
            view_state.drag_cursor = Some((col, row));
            vec![UserCommand::DragOver(view.to_pixels(col, row))]
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if view_state.drag_cursor.take().is_none() {
                return Vec::new();
            }
            let target = if let Some(point) = view.to_pixels(col, row) {
                Some(DropTarget::Pitch(point))
            } else if contains_cell(layout.bench, col, row) {
                Some(DropTarget::Bench)
            } else {
                None
            };
            let mut commands: Vec<UserCommand> =
                target.map(UserCommand::Drop).into_iter().collect();
            commands.push(UserCommand::EndDrag);
            commands
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
