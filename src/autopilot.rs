//! Autopilot input source for demo and headless runs
//!
//! Keeps away from the nearest enemy, swings when something is in reach and
//! drinks potions when hurt. Deliberately simple; it only needs to keep a
//! run going long enough to exercise the simulation.

use glam::Vec2;

use crate::consts::SWORD_HIT_ALLOWANCE;
use crate::sim::{GameState, PowerupKind, TickInput};

/// Distance at which the autopilot starts backing away
const FLEE_DISTANCE: f32 = 140.0;
/// Health fraction below which a potion is used
const POTION_THRESHOLD: f32 = 0.4;

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        let player = &state.player;

        if player.health_fraction() < POTION_THRESHOLD {
            input.use_slot = state.inventory.find(PowerupKind::HealthPotion);
        }
        if input.use_slot.is_none() && state.enemies.len() > 8 {
            input.use_slot = state.inventory.find(PowerupKind::TimeFreeze);
        }

        let Some(nearest) = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            })
        else {
            // Drift back to the middle when the arena is empty
            input.movement = axis_intent(state.arena * 0.5 - player.pos, 10.0);
            return input;
        };

        let dist = nearest.pos.distance(player.pos);
        input.aim = Some(nearest.pos);
        input.attack = dist < player.sword_length + nearest.size + SWORD_HIT_ALLOWANCE;
        if dist < FLEE_DISTANCE {
            input.movement = axis_intent(player.pos - nearest.pos, 1.0);
        }
        input
    }
}

/// Quantize a direction to the 8-way movement keys
fn axis_intent(dir: Vec2, dead_zone: f32) -> Vec2 {
    let axis = |v: f32| {
        if v > dead_zone {
            1.0
        } else if v < -dead_zone {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(axis(dir.x), axis(dir.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyKind;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(1, Vec2::new(800.0, 600.0), Tuning::default(), 0)
    }

    #[test]
    fn test_attacks_enemy_in_reach_and_backs_off() {
        let mut s = state();
        let pos = s.player.pos + Vec2::new(60.0, 0.0);
        s.spawn_enemy(EnemyKind::Normal, pos);
        let input = Autopilot::new().next_input(&s);
        assert!(input.attack);
        assert_eq!(input.aim, Some(pos));
        assert_eq!(input.movement, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_drinks_potion_when_low() {
        let mut s = state();
        s.player.health = 20.0;
        s.inventory.add(PowerupKind::Armor);
        s.inventory.add(PowerupKind::HealthPotion);
        let input = Autopilot::new().next_input(&s);
        assert_eq!(input.use_slot, Some(1));
    }
}
