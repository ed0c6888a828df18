// Property-test generators for drop sequences.

use proptest::prelude::*;

use super::geometry::Point;
use super::lineup::{Lineup, PitchGeometry};

/// Size of the generated roster.
pub const ROSTER_SIZE: usize = 16;

pub fn roster() -> Vec<String> {
    (1..=ROSTER_SIZE).map(|i| format!("Player {i}")).collect()
}

/// One user gesture: drag `player` and release it on the bench or the pitch.
#[derive(Debug, Clone)]
pub struct DropStep {
    pub player: usize,
    pub to_bench: bool,
    pub x: f64,
    pub y: f64,
    /// Release inside the goalkeeper zone instead of at `(x, y)`.
    pub gk_hit: bool,
}

pub fn drop_step_strategy() -> impl Strategy<Value = DropStep> {
    (
        0..ROSTER_SIZE,
        prop::bool::weighted(0.2),
        -50.0f64..=700.0,
        -50.0f64..=980.0,
        prop::bool::weighted(0.25),
    )
        .prop_map(|(player, to_bench, x, y, gk_hit)| DropStep {
            player,
            to_bench,
            x,
            y,
            gk_hit,
        })
}

pub fn drop_sequence_strategy() -> impl Strategy<Value = Vec<DropStep>> {
    prop::collection::vec(drop_step_strategy(), 0..120)
}

/// Apply one step; refused drops leave the lineup as it was.
pub fn apply_step(lineup: &Lineup, step: &DropStep, geometry: &PitchGeometry) -> Lineup {
    let name = format!("Player {}", step.player + 1);
    if step.to_bench {
        return lineup.drop_on_bench(&name).unwrap_or_else(|_| lineup.clone());
    }
    let point = if step.gk_hit {
        let zone = geometry.gk_zone;
        Point::new(zone.left + zone.width * 0.4, zone.top + zone.height * 0.6)
    } else {
        Point::new(step.x, step.y)
    };
    match lineup.drop_on_pitch(&name, point, geometry) {
        Ok(outcome) => outcome.lineup,
        Err(_) => lineup.clone(),
    }
}
