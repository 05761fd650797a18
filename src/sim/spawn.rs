//! Wave spawn director
//!
//! Ticked on its own fixed period, independent of frame rate. Each tick is a
//! best-effort admission: half of them are skipped outright.

use glam::Vec2;
use rand::Rng;

use super::enemy::EnemyKind;
use super::state::GameState;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Point on this edge at fraction `t` along it
    pub fn position(self, arena: Vec2, t: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(0.0, t * arena.y),
            Edge::Right => Vec2::new(arena.x, t * arena.y),
            Edge::Top => Vec2::new(t * arena.x, 0.0),
            Edge::Bottom => Vec2::new(t * arena.x, arena.y),
        }
    }
}

/// Pick an archetype from a uniform roll in [0, 1).
///
/// Higher tiers claim the top of the roll range once their wave gate opens;
/// checks run from rarest to most common.
pub fn choose_kind(wave: u32, roll: f32) -> EnemyKind {
    if wave > 5 && roll > 0.94 {
        EnemyKind::Bomber
    } else if wave > 4 && roll > 0.88 {
        EnemyKind::Tank
    } else if wave > 3 && roll > 0.75 {
        EnemyKind::Fast
    } else if wave > 2 && roll > 0.65 {
        EnemyKind::Splitter
    } else {
        EnemyKind::Normal
    }
}

/// One spawn tick. Returns the new enemy's ID when one was admitted.
pub fn spawn_tick(state: &mut GameState) -> Option<u32> {
    if state.is_over() || state.is_paused() {
        return None;
    }
    let skip_chance = state.tuning.spawn_skip_chance;
    let rng = state.rng();
    if rng.random::<f32>() < skip_chance {
        return None;
    }

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let t = rng.random::<f32>();
    let roll = rng.random::<f32>();

    let pos = edge.position(state.arena, t);
    let kind = choose_kind(state.wave, roll);
    let id = state.spawn_enemy(kind, pos);
    log::debug!(
        "Spawned {} #{id} on {edge:?} edge at wave {}",
        kind.as_str(),
        state.wave
    );
    Some(id)
}
