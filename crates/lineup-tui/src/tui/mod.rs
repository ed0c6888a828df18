// TUI board: layout, mouse and keyboard input, widget rendering.
//
// The TUI owns a `ViewState` that mirrors the board pushed by the app
// orchestrator. `UiUpdate` messages arrive over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use lineup_core::formation::lineup::{Lineup, PitchGeometry};

use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

/// Which yes/no question is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Reset,
    Quit,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the board for rendering.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub lineup: Lineup,
    /// Token currently held, as reported by the app.
    pub dragged: Option<String>,
    /// Held token is over the goalkeeper zone.
    pub over_gk_zone: bool,
    pub geometry: PitchGeometry,
    /// Open alert; blocks other input until dismissed.
    pub alert: Option<String>,
    /// Open confirmation; blocks other input until answered.
    pub confirm: Option<ConfirmKind>,
    pub last_saved: Option<DateTime<Local>>,
    /// Screen cell under the pointer while dragging.
    pub drag_cursor: Option<(u16, u16)>,
    /// Terminal area of the last drawn frame, used for hit-testing.
    pub screen: Rect,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(PitchGeometry::default())
    }
}

impl ViewState {
    pub fn new(geometry: PitchGeometry) -> Self {
        ViewState {
            lineup: Lineup::default(),
            dragged: None,
            over_gk_zone: false,
            geometry,
            alert: None,
            confirm: None,
            last_saved: None,
            drag_cursor: None,
            screen: Rect::default(),
        }
    }

    pub fn layout(&self) -> AppLayout {
        build_layout(self.screen)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Board(board) => {
            let board = *board;
            state.lineup = board.lineup;
            state.over_gk_zone = board.over_gk_zone;
            if board.dragged.is_none() {
                state.drag_cursor = None;
            }
            state.dragged = board.dragged;
        }
        UiUpdate::Alert(message) => {
            state.alert = Some(message);
        }
        UiUpdate::Saved { at } => {
            state.last_saved = Some(at);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete board. Overlays go last so they sit on top.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::pitch::render(frame, &layout, state);
    widgets::bench::render(frame, layout.bench, state);
    render_help_bar(frame, &layout);

    if let Some(kind) = state.confirm {
        widgets::confirm::render(frame, frame.area(), kind);
    }
    if let Some(ref message) = state.alert {
        widgets::alert::render(frame, frame.area(), message);
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " drag:Move | s:Save | r:Reset | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Enters the alternate screen with mouse capture, then selects over UI
/// updates, terminal events and render ticks until the user quits or the
/// app closes the update channel. The terminal is restored on exit and
/// on panic.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    geometry: PitchGeometry,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(geometry);
    view_state.screen = terminal.get_frame().area();

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                let commands: Vec<UserCommand> = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        input::handle_key(key_event, &mut view_state).into_iter().collect()
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        input::handle_mouse(mouse_event, &mut view_state)
                    }
                    Some(Ok(_)) => Vec::new(),
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                };

                let mut quit = false;
                for cmd in commands {
                    quit |= cmd == UserCommand::Quit;
                    if cmd_tx.send(cmd).await.is_err() {
                        quit = true;
                        break;
                    }
                }
                if quit {
                    break;
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| {
                    view_state.screen = frame.area();
                    render_frame(frame, &view_state);
                })?;
            }
        }
    }

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
