//! Per-frame simulation update
//!
//! Free-running: one call per rendered frame, with the host clock passed in.
//! Effect expiries resolve before the pause and game-over gates, so a paused
//! run still lets a pending armor window close.

use glam::Vec2;
use rand::Rng;

use super::collision::{check_sword_hits, update_enemies};
use super::effects::{self, TimerKind};
use super::inventory;
use super::state::{GameEvent, GamePhase, GameState};
use crate::angle_between;
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent; each axis in {-1, 0, 1}
    pub movement: Vec2,
    /// Attack held
    pub attack: bool,
    /// Pointer position in arena coordinates
    pub aim: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Inventory toggle (opening pauses)
    pub toggle_inventory: bool,
    /// Use the item in this inventory slot
    pub use_slot: Option<usize>,
}

/// Advance the game state by one frame at host time `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    state.now_ms = now;
    effects::resolve_timers(state, now);

    if !state.is_over() {
        if input.pause {
            toggle_pause(state);
        }
        if input.toggle_inventory {
            toggle_inventory(state);
        }
        // Items can be used from the open inventory while paused
        if let Some(slot) = input.use_slot {
            inventory::use_slot(state, slot);
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    update(state, input, now);
}

/// Flip between playing and paused; always closes the inventory
pub fn toggle_pause(state: &mut GameState) {
    state.inventory_open = false;
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        GamePhase::GameOver => GamePhase::GameOver,
    };
    log::debug!("Pause toggled: {:?}", state.phase);
}

/// Open or close the inventory; the game is paused exactly while it is open
pub fn toggle_inventory(state: &mut GameState) {
    if state.is_over() {
        return;
    }
    state.inventory_open = !state.inventory_open;
    state.phase = if state.inventory_open {
        GamePhase::Paused
    } else {
        GamePhase::Playing
    };
}

fn update(state: &mut GameState, input: &TickInput, now: u64) {
    state.frame += 1;

    let arena = state.arena;
    state.player.move_by(input.movement, arena);

    update_enemies(state);
    if state.is_over() {
        return;
    }

    state.particles.advance();

    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    state.stamina.regenerate(now);

    if state.player.swinging {
        state.player.sword_angle += state.player.swing_dir * state.tuning.swing_step;
        check_sword_hits(state);
    } else if input.attack {
        start_swing(state, input.aim, now);
    } else if let Some(aim) = input.aim {
        state.player.sword_angle = angle_between(state.player.pos, aim);
    }
}

/// Begin a swing if stamina and the attack cooldown allow it
pub fn start_swing(state: &mut GameState, aim: Option<Vec2>, now: u64) -> bool {
    if !state.stamina.try_attack(now) {
        return false;
    }
    let dir = if state.rng().random_bool(0.5) { 1.0 } else { -1.0 };
    let player = &mut state.player;
    player.swinging = true;
    player.swing_dir = dir;
    if let Some(aim) = aim {
        player.sword_angle = angle_between(player.pos, aim);
    }
    let at = now + state.tuning.attack_delay_ms;
    state.timers.schedule(TimerKind::SwingEnd, at);
    state.emit(GameEvent::Swing);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyKind, PowerupKind};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(12345, Vec2::new(800.0, 600.0), Tuning::default(), 0)
    }

    #[test]
    fn test_tick_pause() {
        let mut s = state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &pause, 16);
        assert_eq!(s.phase, GamePhase::Paused);

        // Paused frames do not move the player
        let walk = TickInput {
            movement: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        let before = s.player.pos;
        tick(&mut s, &walk, 32);
        assert_eq!(s.player.pos, before);
        assert_eq!(s.frame, 0);

        tick(&mut s, &pause, 48);
        assert_eq!(s.phase, GamePhase::Playing);
        tick(&mut s, &walk, 64);
        assert!(s.player.pos.x > before.x);
    }

    #[test]
    fn test_inventory_toggle_pauses_and_allows_use() {
        let mut s = state();
        s.player.health = 40.0;
        s.inventory.add(PowerupKind::HealthPotion);

        let open = TickInput {
            toggle_inventory: true,
            ..Default::default()
        };
        tick(&mut s, &open, 16);
        assert!(s.inventory_open);
        assert!(s.is_paused());

        let use_first = TickInput {
            use_slot: Some(0),
            ..Default::default()
        };
        tick(&mut s, &use_first, 32);
        assert_eq!(s.player.health, 70.0);
        assert!(s.is_paused());

        tick(&mut s, &open, 48);
        assert!(!s.inventory_open);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paused_game_still_expires_armor() {
        let mut s = state();
        effects::apply_armor(&mut s);
        s.phase = GamePhase::Paused;
        tick(&mut s, &TickInput::default(), 7000);
        assert_eq!(s.player.damage_reduction, 1.0);
        assert!(s.is_paused());
    }

    #[test]
    fn test_swing_lifecycle() {
        let mut s = state();
        let attack = TickInput {
            attack: true,
            aim: Some(s.player.pos + Vec2::new(100.0, 0.0)),
            ..Default::default()
        };
        tick(&mut s, &attack, 1000);
        assert!(s.player.swinging);
        assert_eq!(s.stamina.current, 98.0);
        assert!(s.drain_events().contains(&GameEvent::Swing));

        // Swinging advances the angle by one step per frame
        let angle = s.player.sword_angle;
        tick(&mut s, &attack, 1016);
        let step = (s.player.sword_angle - angle).abs();
        assert!((step - 0.2).abs() < 1e-5);

        // Swing ends after the attack delay
        tick(&mut s, &TickInput::default(), 1300);
        assert!(!s.player.swinging);
    }

    #[test]
    fn test_idle_sword_tracks_aim() {
        let mut s = state();
        let aim = TickInput {
            aim: Some(s.player.pos + Vec2::new(0.0, 50.0)),
            ..Default::default()
        };
        tick(&mut s, &aim, 16);
        assert!((s.player.sword_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_adjacent_normal_enemy_hurts_then_dies() {
        let mut s = state();
        let pos = s.player.pos + Vec2::new(30.0, 0.0);
        s.enemies.push(Enemy::spawn(900, EnemyKind::Normal, pos, 1));

        tick(&mut s, &TickInput::default(), 16);
        let lost = 100.0 - s.player.health;
        assert!((3.0..=5.0).contains(&lost), "lost {lost}");
        assert_eq!(lost.fract(), 0.0);
        assert!(s.screen_shake > 0.0);

        let active_before = s.particles.active_count();
        let target = s.enemies[0].pos;
        let attack = TickInput {
            attack: true,
            aim: Some(target),
            ..Default::default()
        };
        tick(&mut s, &attack, 32);
        tick(&mut s, &attack, 48);
        assert!(s.enemies.is_empty());
        assert_eq!(s.score, 1);
        assert!(s.particles.active_count() > active_before);
        assert_eq!(s.particles.text_count(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = state();
        let mut s2 = state();
        for i in 0..50u64 {
            let input = TickInput {
                movement: Vec2::new(((i % 3) as f32) - 1.0, 0.0),
                attack: i % 7 == 0,
                aim: Some(Vec2::new(100.0, 100.0)),
                ..Default::default()
            };
            if i % 10 == 0 {
                crate::sim::spawn_tick(&mut s1);
                crate::sim::spawn_tick(&mut s2);
            }
            tick(&mut s1, &input, i * 16);
            tick(&mut s2, &input, i * 16);
        }
        assert_eq!(s1.player.pos, s2.player.pos);
        assert_eq!(s1.enemies.len(), s2.enemies.len());
        assert_eq!(s1.player.health, s2.player.health);
        assert!((s1.player.sword_angle - s2.player.sword_angle).abs() < 1e-6);
    }
}
