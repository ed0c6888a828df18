// Save, load and reset of the formation against a key-value store.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::db::KeyValueStore;
use crate::formation::lineup::Lineup;
use crate::formation::snapshot::FormationSnapshot;

/// Storage key the formation snapshot lives under.
pub const FORMATION_KEY: &str = "formation";

/// Write the current arrangement, replacing whatever was stored before.
pub fn save_formation(store: &dyn KeyValueStore, lineup: &Lineup) -> Result<()> {
    let snapshot = FormationSnapshot::from_lineup(lineup);
    let json = snapshot
        .to_json()
        .context("failed to serialize formation")?;
    store
        .set(FORMATION_KEY, &json)
        .context("failed to store formation")?;
    info!(
        "Formation saved: {} placed, {} subs",
        snapshot.placed.len(),
        snapshot.subs.len()
    );
    Ok(())
}

/// Rebuild the lineup from `roster` plus the stored formation.
///
/// Returns `Ok(None)` when nothing is stored or the stored value is
/// malformed; the caller then keeps a fresh roster. Store failures are
/// returned as errors.
pub fn load_formation<S: AsRef<str>>(
    store: &dyn KeyValueStore,
    roster: &[S],
) -> Result<Option<Lineup>> {
    let Some(raw) = store
        .get(FORMATION_KEY)
        .context("failed to read stored formation")?
    else {
        info!("No stored formation, starting with a fresh roster");
        return Ok(None);
    };

    if raw.trim().is_empty() {
        warn!("Stored formation is empty, starting with a fresh roster");
        return Ok(None);
    }

    let Some(snapshot) = FormationSnapshot::from_json(&raw) else {
        return Ok(None);
    };

    let lineup = snapshot.apply_to_roster(roster);
    info!(
        "Formation restored: {} on pitch, {} on bench",
        lineup.pitch.len(),
        lineup.bench.len()
    );
    Ok(Some(lineup))
}

/// Send every pitch token back to the bench and forget the stored formation.
pub fn reset_formation(store: &dyn KeyValueStore, lineup: &Lineup) -> Result<Lineup> {
    let reset = lineup.reset();
    store
        .remove(FORMATION_KEY)
        .context("failed to clear stored formation")?;
    info!("Formation reset");
    Ok(reset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
