// Formation snapshot: the JSON shape persisted under the `formation` key,
// and its conversion to and from a `Lineup`.
//
//   {"placed":[{"name":"Max M","left":"80px","top":"120px","role":null}],
//    "subs":["Alex","Toby"]}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::geometry::{format_px, parse_px, Point};
use super::lineup::{Lineup, PlayerToken, Role, PITCH_CAPACITY};

/// One token on the pitch as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntry {
    pub name: String,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormationSnapshot {
    #[serde(default, deserialize_with = "lenient_list")]
    pub placed: Vec<PlacedEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub subs: Vec<String>,
}

/// A list field that tolerates a non-array value (read as empty) and
/// skips elements that do not parse, keeping the rest.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            warn!("Expected a list in stored formation, found {}", other);
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping unreadable stored entry {}: {}", item, e);
                None
            }
        })
        .collect())
}

impl FormationSnapshot {
    /// Capture the current arrangement. Pitch tokens keep pitch order,
    /// substitutes keep bench order.
    pub fn from_lineup(lineup: &Lineup) -> Self {
        let placed = lineup
            .pitch
            .iter()
            .map(|t| PlacedEntry {
                name: t.name.clone(),
                left: t.position.map(|p| format_px(p.x)),
                top: t.position.map(|p| format_px(p.y)),
                role: t.role.map(|r| r.as_str().to_string()),
            })
            .collect();
        let subs = lineup.bench.iter().map(|t| t.name.clone()).collect();
        FormationSnapshot { placed, subs }
    }

    /// Parse stored JSON. Malformed input yields `None`, which callers treat
    /// the same as "nothing stored".
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<FormationSnapshot>(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Ignoring malformed stored formation: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Rebuild a lineup from `roster` and re-apply this snapshot on top.
    ///
    /// Placed entries are applied first, then every listed substitute is
    /// moved to the end of the bench. Roster names the snapshot does not
    /// mention stay on the bench in roster order. Snapshot names missing
    /// from the roster are skipped. Entries that would break the pitch
    /// invariants (unparseable position, more than `PITCH_CAPACITY` on the
    /// pitch, a second goalkeeper) are degraded instead of applied.
    pub fn apply_to_roster<S: AsRef<str>>(&self, roster: &[S]) -> Lineup {
        let mut lineup = Lineup::from_names(roster);

        for entry in &self.placed {
            let Some(idx) = lineup.bench.iter().position(|t| t.name == entry.name) else {
                if lineup.pitch.iter().any(|t| t.name == entry.name) {
                    warn!("Duplicate placed entry for {:?} ignored", entry.name);
                } else {
                    warn!("Stored player {:?} is not in the roster", entry.name);
                }
                continue;
            };

            if lineup.pitch.len() >= PITCH_CAPACITY {
                warn!(
                    "Stored formation exceeds {} players; {:?} left on bench",
                    PITCH_CAPACITY, entry.name
                );
                continue;
            }

            let position = match (
                entry.left.as_deref().and_then(parse_px),
                entry.top.as_deref().and_then(parse_px),
            ) {
                (Some(x), Some(y)) => Point::new(x, y),
                _ => {
                    warn!(
                        "Stored position for {:?} is unreadable ({:?}, {:?}); left on bench",
                        entry.name, entry.left, entry.top
                    );
                    continue;
                }
            };

            let mut role = entry.role.as_deref().and_then(|r| r.parse::<Role>().ok());
            if role == Some(Role::Goalkeeper) && lineup.goalkeeper().is_some() {
                warn!("Second stored goalkeeper {:?} demoted to outfield", entry.name);
                role = None;
            }

            let mut token: PlayerToken = lineup.bench.remove(idx);
            token.position = Some(position);
            token.role = role;
            lineup.pitch.push(token);
        }

        for name in &self.subs {
            if let Some(idx) = lineup.pitch.iter().position(|t| &t.name == name) {
                let mut token = lineup.pitch.remove(idx);
                token.position = None;
                token.role = None;
                lineup.bench.push(token);
            } else if let Some(idx) = lineup.bench.iter().position(|t| &t.name == name) {
                let token = lineup.bench.remove(idx);
                lineup.bench.push(token);
            }
        }

        lineup
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
