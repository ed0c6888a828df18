// Messages exchanged between the app orchestrator and the TUI.

use chrono::{DateTime, Local};
use lineup_core::formation::geometry::Point;
use lineup_core::formation::lineup::Lineup;

/// Where a dragged token was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropTarget {
    Bench,
    /// Pitch-local pixel coordinates of the release point.
    Pitch(Point),
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    StartDrag(String),
    /// Pointer moved while dragging; `None` when it is off the pitch.
    DragOver(Option<Point>),
    Drop(DropTarget),
    EndDrag,
    Save,
    /// Already confirmed by the user.
    Reset,
    Quit,
}

/// Everything the TUI needs to draw the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub lineup: Lineup,
    pub dragged: Option<String>,
    pub over_gk_zone: bool,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Board(Box<BoardSnapshot>),
    /// Blocking message the user has to dismiss.
    Alert(String),
    Saved { at: DateTime<Local> },
}
