// Lineup construction and drop placement rules.
//
// A `Lineup` holds every token in exactly one of two ordered lists: the
// bench (substitutes) and the pitch. The drop rules are pure: they take the
// current lineup and return a new one, leaving the caller to persist and
// render it.

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use super::geometry::{clamp_to_pitch, snap_point, Point, Rect, Size};

/// Maximum number of tokens allowed on the pitch (10 outfield + 1 GK).
pub const PITCH_CAPACITY: usize = 11;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("Only {capacity} players allowed on the pitch (10 outfield + 1 GK).")]
    PitchFull { capacity: usize },

    #[error("no player named `{0}` in the roster")]
    UnknownPlayer(String),

    #[error("unknown role `{0}`")]
    UnknownRole(String),
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Goalkeeper,
}

impl Role {
    /// Wire form used in stored snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "gk",
        }
    }
}

impl FromStr for Role {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gk" => Ok(Role::Goalkeeper),
            other => Err(PlacementError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Bench,
    Pitch,
}

/// One draggable player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerToken {
    pub name: String,
    /// Centre of the token in pitch-local pixels. Always `None` on the bench.
    pub position: Option<Point>,
    pub role: Option<Role>,
}

impl PlayerToken {
    pub fn new(name: impl Into<String>) -> Self {
        PlayerToken {
            name: name.into(),
            position: None,
            role: None,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.role == Some(Role::Goalkeeper)
    }

    fn benched(mut self) -> Self {
        self.position = None;
        self.role = None;
        self
    }
}

// ---------------------------------------------------------------------------
// Pitch geometry
// ---------------------------------------------------------------------------

/// Fixed dimensions the placement rules work against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchGeometry {
    pub pitch: Size,
    /// Goalkeeper zone in pitch-local pixels.
    pub gk_zone: Rect,
    /// Rendered size of one token. Fixed rather than measured.
    pub token: Size,
}

impl PitchGeometry {
    pub fn pitch_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.pitch.width, self.pitch.height)
    }

    pub fn in_gk_zone(&self, p: Point) -> bool {
        self.gk_zone.contains(p)
    }
}

impl Default for PitchGeometry {
    fn default() -> Self {
        PitchGeometry {
            pitch: Size::new(640.0, 920.0),
            gk_zone: Rect::new(240.0, 800.0, 160.0, 80.0),
            token: Size::new(48.0, 48.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Drop outcome
// ---------------------------------------------------------------------------

/// Result of a successful drop on the pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub lineup: Lineup,
    /// Final snapped and clamped position of the dropped token.
    pub position: Point,
    pub role: Option<Role>,
    /// Previous goalkeeper sent back to the bench, if any.
    pub demoted: Option<String>,
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lineup {
    pub bench: Vec<PlayerToken>,
    pub pitch: Vec<PlayerToken>,
}

impl Lineup {
    /// Build a fresh lineup with every name on the bench, in list order.
    ///
    /// Names must be unique; repeated names after the first are dropped.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut bench: Vec<PlayerToken> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if bench.iter().any(|t| t.name == name) {
                warn!("Duplicate roster name {:?} ignored", name);
                continue;
            }
            bench.push(PlayerToken::new(name));
        }
        Lineup {
            bench,
            pitch: Vec::new(),
        }
    }

    pub fn pitch_count(&self) -> usize {
        self.pitch.len()
    }

    pub fn location(&self, name: &str) -> Option<Location> {
        if self.pitch.iter().any(|t| t.name == name) {
            Some(Location::Pitch)
        } else if self.bench.iter().any(|t| t.name == name) {
            Some(Location::Bench)
        } else {
            None
        }
    }

    pub fn token(&self, name: &str) -> Option<&PlayerToken> {
        self.pitch
            .iter()
            .chain(self.bench.iter())
            .find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.location(name).is_some()
    }

    pub fn goalkeeper(&self) -> Option<&PlayerToken> {
        self.pitch.iter().find(|t| t.is_goalkeeper())
    }

    /// All token names, pitch first then bench.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pitch
            .iter()
            .chain(self.bench.iter())
            .map(|t| t.name.as_str())
    }

    /// Detach a token from whichever list holds it.
    fn take(&mut self, name: &str) -> Option<PlayerToken> {
        if let Some(idx) = self.pitch.iter().position(|t| t.name == name) {
            return Some(self.pitch.remove(idx));
        }
        if let Some(idx) = self.bench.iter().position(|t| t.name == name) {
            return Some(self.bench.remove(idx));
        }
        None
    }

    /// Move a token to the end of the bench, clearing position and role.
    pub fn drop_on_bench(&self, name: &str) -> Result<Lineup, PlacementError> {
        let mut next = self.clone();
        let token = next
            .take(name)
            .ok_or_else(|| PlacementError::UnknownPlayer(name.to_string()))?;
        next.bench.push(token.benched());
        debug!("Benched {}", name);
        Ok(next)
    }

    /// Drop a token on the pitch at `point` (pitch-local pixels).
    ///
    /// Rejects the drop when it would put more than `PITCH_CAPACITY` tokens
    /// on the pitch; a token already on the pitch is not counted twice. The
    /// capacity check runs before any goalkeeper demotion. A drop inside the
    /// GK zone makes the token the only goalkeeper and centres it in the
    /// zone. The final position is snapped to the grid, then clamped inside
    /// the pitch.
    pub fn drop_on_pitch(
        &self,
        name: &str,
        point: Point,
        geometry: &PitchGeometry,
    ) -> Result<DropOutcome, PlacementError> {
        let already_on_pitch = match self.location(name) {
            Some(Location::Pitch) => true,
            Some(Location::Bench) => false,
            None => return Err(PlacementError::UnknownPlayer(name.to_string())),
        };

        let total_if_placed = self.pitch.len() + usize::from(!already_on_pitch);
        if total_if_placed > PITCH_CAPACITY {
            return Err(PlacementError::PitchFull {
                capacity: PITCH_CAPACITY,
            });
        }

        let mut next = self.clone();
        let in_gk = geometry.in_gk_zone(point);

        let mut demoted = None;
        if in_gk {
            if let Some(idx) = next
                .pitch
                .iter()
                .position(|t| t.is_goalkeeper() && t.name != name)
            {
                let previous = next.pitch.remove(idx).benched();
                debug!("Demoted goalkeeper {} to bench", previous.name);
                demoted = Some(previous.name.clone());
                next.bench.push(previous);
            }
        }

        let target = if in_gk {
            geometry.gk_zone.center()
        } else {
            point
        };
        let position = clamp_to_pitch(snap_point(target), geometry.pitch, geometry.token);
        let role = in_gk.then_some(Role::Goalkeeper);

        // `take` cannot miss: the name was located above.
        let mut token = next
            .take(name)
            .ok_or_else(|| PlacementError::UnknownPlayer(name.to_string()))?;
        token.position = Some(position);
        token.role = role;
        next.pitch.push(token);

        debug!(
            "Placed {} at ({}, {}) role={:?}",
            name, position.x, position.y, role
        );

        Ok(DropOutcome {
            lineup: next,
            position,
            role,
            demoted,
        })
    }

    /// Send every pitch token back to the bench, in pitch order.
    pub fn reset(&self) -> Lineup {
        let mut next = self.clone();
        let pitch = std::mem::take(&mut next.pitch);
        next.bench.extend(pitch.into_iter().map(PlayerToken::benched));
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::proptest_gen::{apply_step, drop_sequence_strategy, roster, ROSTER_SIZE};
    use proptest::prelude::*;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Player {i}")).collect()
    }

    fn geometry() -> PitchGeometry {
        PitchGeometry::default()
    }

    /// Place the first `n` players at distinct outfield points.
    fn with_on_pitch(lineup: Lineup, n: usize) -> Lineup {
        let geo = geometry();
        let mut lineup = lineup;
        for i in 0..n {
            let name = format!("Player {}", i + 1);
            let point = Point::new(40.0 + 40.0 * (i % 10) as f64, 80.0 + 80.0 * (i / 10) as f64);
            lineup = lineup.drop_on_pitch(&name, point, &geo).unwrap().lineup;
        }
        lineup
    }

    #[test]
    fn from_names_puts_everyone_on_bench() {
        let lineup = Lineup::from_names(&names(16));
        assert_eq!(lineup.bench.len(), 16);
        assert!(lineup.pitch.is_empty());
        assert_eq!(lineup.bench[0].name, "Player 1");
        assert_eq!(lineup.bench[15].name, "Player 16");
        assert!(lineup.bench.iter().all(|t| t.position.is_none() && t.role.is_none()));
    }

    #[test]
    fn role_parses_wire_form() {
        assert_eq!("gk".parse::<Role>(), Ok(Role::Goalkeeper));
        assert_eq!(Role::Goalkeeper.as_str().parse::<Role>(), Ok(Role::Goalkeeper));
        assert_eq!(
            "striker".parse::<Role>(),
            Err(PlacementError::UnknownRole("striker".into()))
        );
    }

    #[test]
    fn from_names_drops_duplicates() {
        let lineup = Lineup::from_names(&["Alex", "Toby", "Alex"]);
        assert_eq!(lineup.bench.len(), 2);
    }

    #[test]
    fn drop_on_pitch_snaps_and_records_position() {
        let lineup = Lineup::from_names(&["Max M", "Alex"]);
        let out = lineup
            .drop_on_pitch("Max M", Point::new(83.0, 121.0), &geometry())
            .unwrap();
        assert_eq!(out.position, Point::new(80.0, 120.0));
        assert_eq!(out.role, None);
        assert!(out.demoted.is_none());
        assert_eq!(out.lineup.location("Max M"), Some(Location::Pitch));
        assert_eq!(
            out.lineup.token("Max M").unwrap().position,
            Some(Point::new(80.0, 120.0))
        );
        // Source lineup is untouched.
        assert_eq!(lineup.location("Max M"), Some(Location::Bench));
    }

    #[test]
    fn drop_near_edge_is_clamped() {
        let lineup = Lineup::from_names(&["Alex"]);
        let out = lineup
            .drop_on_pitch("Alex", Point::new(5.0, 915.0), &geometry())
            .unwrap();
        // Snaps to (0, 920), then clamps by half the 48px token.
        assert_eq!(out.position, Point::new(24.0, 896.0));
    }

    #[test]
    fn twelfth_player_is_rejected() {
        let lineup = with_on_pitch(Lineup::from_names(&names(16)), 11);
        assert_eq!(lineup.pitch_count(), 11);

        let err = lineup
            .drop_on_pitch("Player 12", Point::new(300.0, 300.0), &geometry())
            .unwrap_err();
        assert_eq!(err, PlacementError::PitchFull { capacity: 11 });
        assert_eq!(
            err.to_string(),
            "Only 11 players allowed on the pitch (10 outfield + 1 GK)."
        );
    }

    #[test]
    fn moving_a_pitch_token_does_not_count_twice() {
        let lineup = with_on_pitch(Lineup::from_names(&names(16)), 11);
        let out = lineup
            .drop_on_pitch("Player 3", Point::new(300.0, 500.0), &geometry())
            .unwrap();
        assert_eq!(out.lineup.pitch_count(), 11);
        assert_eq!(out.position, Point::new(320.0, 520.0));
        // Moved token goes to the end of the pitch list.
        assert_eq!(out.lineup.pitch.last().unwrap().name, "Player 3");
    }

    #[test]
    fn gk_zone_drop_assigns_role_and_centres() {
        let lineup = Lineup::from_names(&["Benji P", "Alex"]);
        let out = lineup
            .drop_on_pitch("Benji P", Point::new(250.0, 810.0), &geometry())
            .unwrap();
        assert_eq!(out.role, Some(Role::Goalkeeper));
        assert_eq!(out.position, Point::new(320.0, 840.0));
        assert_eq!(out.lineup.goalkeeper().unwrap().name, "Benji P");
    }

    #[test]
    fn second_goalkeeper_demotes_first() {
        let geo = geometry();
        let lineup = Lineup::from_names(&["Benji P", "Alex", "Toby"]);
        let lineup = lineup
            .drop_on_pitch("Benji P", Point::new(320.0, 840.0), &geo)
            .unwrap()
            .lineup;
        let out = lineup
            .drop_on_pitch("Alex", Point::new(300.0, 830.0), &geo)
            .unwrap();

        assert_eq!(out.demoted.as_deref(), Some("Benji P"));
        let benji = out.lineup.token("Benji P").unwrap();
        assert_eq!(out.lineup.location("Benji P"), Some(Location::Bench));
        assert!(benji.position.is_none());
        assert!(benji.role.is_none());
        assert_eq!(out.lineup.bench.last().unwrap().name, "Benji P");
        assert_eq!(out.lineup.goalkeeper().unwrap().name, "Alex");
        assert_eq!(out.lineup.pitch.iter().filter(|t| t.is_goalkeeper()).count(), 1);
    }

    #[test]
    fn redropping_goalkeeper_in_zone_keeps_role() {
        let geo = geometry();
        let lineup = Lineup::from_names(&["Benji P"]);
        let lineup = lineup
            .drop_on_pitch("Benji P", Point::new(320.0, 840.0), &geo)
            .unwrap()
            .lineup;
        let out = lineup
            .drop_on_pitch("Benji P", Point::new(260.0, 860.0), &geo)
            .unwrap();
        assert!(out.demoted.is_none());
        assert_eq!(out.role, Some(Role::Goalkeeper));
        assert_eq!(out.lineup.pitch_count(), 1);
    }

    #[test]
    fn goalkeeper_moved_out_of_zone_loses_role() {
        let geo = geometry();
        let lineup = Lineup::from_names(&["Benji P"]);
        let lineup = lineup
            .drop_on_pitch("Benji P", Point::new(320.0, 840.0), &geo)
            .unwrap()
            .lineup;
        let out = lineup
            .drop_on_pitch("Benji P", Point::new(320.0, 400.0), &geo)
            .unwrap();
        assert_eq!(out.role, None);
        assert!(out.lineup.goalkeeper().is_none());
    }

    #[test]
    fn full_pitch_rejects_new_goalkeeper_before_demotion() {
        let geo = geometry();
        let lineup = with_on_pitch(Lineup::from_names(&names(16)), 10);
        let lineup = lineup
            .drop_on_pitch("Player 11", Point::new(320.0, 840.0), &geo)
            .unwrap()
            .lineup;
        assert_eq!(lineup.pitch_count(), 11);

        let err = lineup
            .drop_on_pitch("Player 12", Point::new(320.0, 840.0), &geo)
            .unwrap_err();
        assert!(matches!(err, PlacementError::PitchFull { .. }));
        assert_eq!(lineup.goalkeeper().unwrap().name, "Player 11");
    }

    #[test]
    fn drop_on_bench_clears_and_appends() {
        let geo = geometry();
        let lineup = Lineup::from_names(&["A", "B", "C"]);
        let lineup = lineup
            .drop_on_pitch("A", Point::new(320.0, 840.0), &geo)
            .unwrap()
            .lineup;
        let lineup = lineup.drop_on_bench("A").unwrap();
        assert_eq!(lineup.pitch_count(), 0);
        let bench: Vec<&str> = lineup.bench.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(bench, vec!["B", "C", "A"]);
        assert!(lineup.token("A").unwrap().role.is_none());

        // Re-benching a bench token moves it to the end.
        let lineup = lineup.drop_on_bench("B").unwrap();
        let bench: Vec<&str> = lineup.bench.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(bench, vec!["C", "A", "B"]);
    }

    #[test]
    fn unknown_player_is_an_error() {
        let lineup = Lineup::from_names(&["A"]);
        assert_eq!(
            lineup.drop_on_bench("Z").unwrap_err(),
            PlacementError::UnknownPlayer("Z".into())
        );
        assert!(matches!(
            lineup.drop_on_pitch("Z", Point::new(0.0, 0.0), &geometry()),
            Err(PlacementError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn reset_benches_everyone_in_pitch_order() {
        let geo = geometry();
        let lineup = Lineup::from_names(&["A", "B", "C", "D"]);
        let lineup = lineup.drop_on_pitch("C", Point::new(100.0, 100.0), &geo).unwrap().lineup;
        let lineup = lineup.drop_on_pitch("A", Point::new(320.0, 840.0), &geo).unwrap().lineup;

        let reset = lineup.reset();
        assert!(reset.pitch.is_empty());
        let bench: Vec<&str> = reset.bench.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(bench, vec!["B", "D", "C", "A"]);
        assert!(reset.bench.iter().all(|t| t.position.is_none() && t.role.is_none()));
    }

    proptest! {
        #[test]
        fn invariants_hold_across_drop_sequences(steps in drop_sequence_strategy()) {
            let geo = geometry();
            let mut lineup = Lineup::from_names(&roster());
            for step in &steps {
                lineup = apply_step(&lineup, step, &geo);

                prop_assert!(lineup.pitch_count() <= PITCH_CAPACITY);
                prop_assert!(lineup.pitch.iter().filter(|t| t.is_goalkeeper()).count() <= 1);
                prop_assert!(lineup.bench.iter().all(|t| t.position.is_none() && t.role.is_none()));
                prop_assert!(lineup.pitch.iter().all(|t| t.position.is_some()));
                let mut all: Vec<&str> = lineup.names().collect();
                all.sort_unstable();
                all.dedup();
                prop_assert_eq!(all.len(), ROSTER_SIZE);
                prop_assert_eq!(lineup.pitch.len() + lineup.bench.len(), ROSTER_SIZE);
            }
        }

        #[test]
        fn moving_a_placed_token_keeps_the_count(
            steps in drop_sequence_strategy(),
            x in 0.0f64..=640.0,
            y in 0.0f64..=700.0,
        ) {
            let geo = geometry();
            let mut lineup = Lineup::from_names(&roster());
            for step in &steps {
                lineup = apply_step(&lineup, step, &geo);
            }
            if let Some(name) = lineup.pitch.first().map(|t| t.name.clone()) {
                let before = lineup.pitch_count();
                let moved = lineup.drop_on_pitch(&name, Point::new(x, y), &geo);
                prop_assert!(moved.is_ok());
                prop_assert_eq!(moved.unwrap().lineup.pitch_count(), before);
            }
        }
    }
}
