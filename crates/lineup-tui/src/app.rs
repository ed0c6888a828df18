// Application state and orchestration logic.
//
// The app task owns the lineup, the drag controller and the store. It
// receives `UserCommand`s from the TUI, applies the placement rules, persists
// the result and pushes `UiUpdate`s back for rendering.

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use lineup_core::config::Config;
use lineup_core::db::KeyValueStore;
use lineup_core::formation::drag::DragState;
use lineup_core::formation::lineup::Lineup;
use lineup_core::persistence::{load_formation, reset_formation, save_formation};

use crate::protocol::{BoardSnapshot, DropTarget, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub lineup: Lineup,
    pub drag: DragState,
    pub store: Box<dyn KeyValueStore + Send>,
}

impl AppState {
    /// Create an AppState with a fresh roster from `config`. Call
    /// `restore_from_store` afterwards to re-apply a saved formation.
    pub fn new(config: Config, store: Box<dyn KeyValueStore + Send>) -> Self {
        let lineup = Lineup::from_names(&config.roster);
        AppState {
            config,
            lineup,
            drag: DragState::new(),
            store,
        }
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            lineup: self.lineup.clone(),
            dragged: self.drag.dragged().map(str::to_string),
            over_gk_zone: self.drag.over_gk_zone(),
        }
    }

    fn board_update(&self) -> UiUpdate {
        UiUpdate::Board(Box::new(self.board_snapshot()))
    }

    /// Persist after a drop. Failures become an alert rather than an error
    /// so the session carries on.
    fn autosave(&self, updates: &mut Vec<UiUpdate>) {
        if let Err(e) = save_formation(&*self.store, &self.lineup) {
            warn!("Auto-save failed: {:#}", e);
            updates.push(UiUpdate::Alert(format!("Could not save formation: {e}")));
        }
    }

    fn handle_drop(&mut self, target: DropTarget) -> Vec<UiUpdate> {
        let Some(name) = self.drag.dragged().map(str::to_string) else {
            debug!("Drop with nothing dragged ignored");
            return Vec::new();
        };

        let result = match target {
            DropTarget::Bench => self.lineup.drop_on_bench(&name),
            DropTarget::Pitch(point) => self
                .lineup
                .drop_on_pitch(&name, point, &self.config.geometry)
                .map(|outcome| {
                    if let Some(ref demoted) = outcome.demoted {
                        info!("{} replaces {} in goal", name, demoted);
                    }
                    outcome.lineup
                }),
        };

        match result {
            Ok(lineup) => {
                self.lineup = lineup;
                let mut updates = vec![self.board_update()];
                self.autosave(&mut updates);
                updates
            }
            Err(e) => {
                info!("Drop of {} rejected: {}", name, e);
                vec![UiUpdate::Alert(e.to_string())]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Apply one user command and return the updates to push to the TUI.
///
/// `Quit` is handled by the event loop and produces no updates here.
pub fn apply_command(state: &mut AppState, cmd: UserCommand) -> Vec<UiUpdate> {
    match cmd {
        UserCommand::StartDrag(name) => {
            if state.drag.start(&name, &state.lineup) {
                vec![state.board_update()]
            } else {
                warn!("Drag of unknown player {:?} ignored", name);
                Vec::new()
            }
        }
        UserCommand::DragOver(point) => {
            if state.drag.dragged().is_none() {
                return Vec::new();
            }
            let over = point.is_some_and(|p| state.config.geometry.in_gk_zone(p));
            if over == state.drag.over_gk_zone() {
                return Vec::new();
            }
            if over {
                state.drag.enter_gk_zone();
            } else {
                state.drag.leave_gk_zone();
            }
            vec![state.board_update()]
        }
        UserCommand::Drop(target) => state.handle_drop(target),
        UserCommand::EndDrag => {
            state.drag.end();
            vec![state.board_update()]
        }
        UserCommand::Save => match save_formation(&*state.store, &state.lineup) {
            Ok(()) => vec![
                UiUpdate::Saved { at: Local::now() },
                UiUpdate::Alert("Saved".to_string()),
            ],
            Err(e) => {
                warn!("Save failed: {:#}", e);
                vec![UiUpdate::Alert(format!("Could not save formation: {e}"))]
            }
        },
        UserCommand::Reset => {
            state.drag.end();
            match reset_formation(&*state.store, &state.lineup) {
                Ok(lineup) => {
                    state.lineup = lineup;
                    vec![state.board_update()]
                }
                Err(e) => {
                    warn!("Reset failed: {:#}", e);
                    state.lineup = state.lineup.reset();
                    vec![
                        state.board_update(),
                        UiUpdate::Alert(format!("Could not clear saved formation: {e}")),
                    ]
                }
            }
        }
        UserCommand::Quit => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` arrives or the command
/// channel closes. Sends the initial board before waiting for commands.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx.send(state.board_update()).await;

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            break;
        }
        for update in apply_command(&mut state, cmd) {
            if ui_tx.send(update).await.is_err() {
                info!("UI channel closed, shutting down");
                return Ok(());
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Re-apply the stored formation, if there is one.
///
/// Returns `Ok(true)` when a formation was restored and `Ok(false)` when the
/// session starts from a fresh roster (nothing stored, or unreadable data).
pub fn restore_from_store(state: &mut AppState) -> anyhow::Result<bool> {
    match load_formation(&*state.store, &state.config.roster)? {
        Some(lineup) => {
            state.lineup = lineup;
            Ok(true)
        }
        None => {
            state.lineup = Lineup::from_names(&state.config.roster);
            Ok(false)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
