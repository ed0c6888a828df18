// Drag controller: which token is being dragged and the hover state of the
// goalkeeper zone.

use tracing::debug;

use super::lineup::Lineup;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<String>,
    over_gk_zone: bool,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `name`. Names not in the lineup are ignored and any
    /// drag already in progress is kept.
    pub fn start(&mut self, name: &str, lineup: &Lineup) -> bool {
        if !lineup.contains(name) {
            return false;
        }
        debug!("Drag start: {}", name);
        self.dragged = Some(name.to_string());
        true
    }

    /// Finish the drag, whether or not it ended in a drop.
    pub fn end(&mut self) {
        if let Some(name) = self.dragged.take() {
            debug!("Drag end: {}", name);
        }
        self.over_gk_zone = false;
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn is_dragging(&self, name: &str) -> bool {
        self.dragged.as_deref() == Some(name)
    }

    pub fn enter_gk_zone(&mut self) {
        self.over_gk_zone = true;
    }

    pub fn leave_gk_zone(&mut self) {
        self.over_gk_zone = false;
    }

    pub fn over_gk_zone(&self) -> bool {
        self.over_gk_zone
    }
}
