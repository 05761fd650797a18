//! Timed status effects
//!
//! Every temporary effect (swing, invulnerability, armor, sword upgrade,
//! freeze) owns one keyed deadline. Scheduling a kind that is already pending
//! replaces its deadline, which cancels the old expiry. Deadlines are resolved
//! at the start of every frame, including paused and game-over frames.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Effect kinds with a pending expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    SwingEnd,
    Invulnerability,
    Armor,
    SwordUpgrade,
    Freeze,
}

impl TimerKind {
    pub const ALL: [TimerKind; 5] = [
        TimerKind::SwingEnd,
        TimerKind::Invulnerability,
        TimerKind::Armor,
        TimerKind::SwordUpgrade,
        TimerKind::Freeze,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One cancellable deadline per effect kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers {
    due: [Option<u64>; TimerKind::ALL.len()],
}

impl Timers {
    /// Set the deadline for `kind`; returns the replaced deadline, if any
    pub fn schedule(&mut self, kind: TimerKind, at: u64) -> Option<u64> {
        self.due[kind.index()].replace(at)
    }

    pub fn cancel(&mut self, kind: TimerKind) -> Option<u64> {
        self.due[kind.index()].take()
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.due[kind.index()]
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.due[kind.index()].is_some()
    }

    /// Remove and return every kind whose deadline is at or before `now`,
    /// earliest first
    pub fn take_due(&mut self, now: u64) -> Vec<TimerKind> {
        let mut fired: Vec<(u64, TimerKind)> = TimerKind::ALL
            .iter()
            .filter_map(|&kind| match self.due[kind.index()] {
                Some(at) if at <= now => Some((at, kind)),
                _ => None,
            })
            .collect();
        fired.sort_by_key(|&(at, kind)| (at, kind.index()));
        for &(_, kind) in &fired {
            self.due[kind.index()] = None;
        }
        fired.into_iter().map(|(_, kind)| kind).collect()
    }
}

/// Particle colors for effect feedback
pub const ARMOR_COLOR: u32 = 0x00FFFF;
pub const SWORD_COLOR: u32 = 0xFFD700;
pub const FREEZE_COLOR: u32 = 0xADD8E6;

/// Fire every expiry that is due at `now`
pub fn resolve_timers(state: &mut GameState, now: u64) {
    for kind in state.timers.take_due(now) {
        expire(state, kind, now);
    }
}

fn expire(state: &mut GameState, kind: TimerKind, now: u64) {
    log::debug!("{kind:?} expired at {now}");
    match kind {
        TimerKind::SwingEnd => {
            state.player.swinging = false;
        }
        TimerKind::Invulnerability => {
            state.player.invulnerable = false;
        }
        TimerKind::Armor => {
            state.player.damage_reduction = 1.0;
            let pos = state.player.pos;
            state.particles.spawn(pos, ARMOR_COLOR, 10);
        }
        TimerKind::SwordUpgrade => {
            state.player.sword_length = state.tuning.sword_length;
            let pos = state.player.pos;
            state.particles.spawn(pos, SWORD_COLOR, 15);
        }
        TimerKind::Freeze => {
            let freeze_ms = state.tuning.freeze_ms;
            for enemy in state.enemies.iter_mut().filter(|e| e.frozen) {
                let since = enemy.frozen_since.unwrap_or(0);
                if now.saturating_sub(since) >= freeze_ms {
                    enemy.thaw();
                }
            }
        }
    }
    state.emit(GameEvent::EffectExpired { timer: kind });
}

/// Start or restart the post-hit invulnerability window
pub fn grant_invulnerability(state: &mut GameState) {
    state.player.invulnerable = true;
    let at = state.now_ms + state.tuning.invulnerability_ms;
    state.timers.schedule(TimerKind::Invulnerability, at);
}

/// Reduce incoming damage for the armor window; reapplying restarts it
pub fn apply_armor(state: &mut GameState) {
    state.player.damage_reduction = state.tuning.armor_reduction;
    let at = state.now_ms + state.tuning.armor_ms;
    if state.timers.schedule(TimerKind::Armor, at).is_some() {
        log::debug!("Armor refreshed, now expires at {at}");
    }
    let pos = state.player.pos;
    state.particles.spawn(pos, ARMOR_COLOR, 25);
}

/// Lengthen the sword for the upgrade window; reapplying restarts it
pub fn apply_sword_upgrade(state: &mut GameState) {
    state.player.sword_length = state.tuning.sword_upgrade_length;
    let at = state.now_ms + state.tuning.sword_upgrade_ms;
    state.timers.schedule(TimerKind::SwordUpgrade, at);
    let pos = state.player.pos;
    state.particles.spawn(pos, SWORD_COLOR, 30);
}

/// Stop every live enemy for the freeze window
pub fn apply_freeze(state: &mut GameState) {
    let now = state.now_ms;
    for enemy in &mut state.enemies {
        enemy.freeze(now);
    }
    state.timers.schedule(TimerKind::Freeze, now + state.tuning.freeze_ms);
    let pos = state.player.pos;
    state.particles.spawn(pos, FREEZE_COLOR, 40);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyKind;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(1, Vec2::new(800.0, 600.0), Tuning::default(), 0)
    }

    fn advance_to(state: &mut GameState, now: u64) {
        state.now_ms = now;
        resolve_timers(state, now);
    }

    #[test]
    fn test_schedule_replaces_deadline() {
        let mut timers = Timers::default();
        assert_eq!(timers.schedule(TimerKind::Armor, 7000), None);
        assert_eq!(timers.schedule(TimerKind::Armor, 12000), Some(7000));
        assert!(timers.take_due(7000).is_empty());
        assert_eq!(timers.take_due(12000), vec![TimerKind::Armor]);
        assert!(!timers.is_pending(TimerKind::Armor));
    }

    #[test]
    fn test_take_due_orders_by_deadline() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::Freeze, 50);
        timers.schedule(TimerKind::SwingEnd, 80);
        timers.schedule(TimerKind::Armor, 10);
        timers.schedule(TimerKind::SwordUpgrade, 500);
        assert_eq!(
            timers.take_due(100),
            vec![TimerKind::Armor, TimerKind::Freeze, TimerKind::SwingEnd]
        );
        assert_eq!(timers.cancel(TimerKind::SwordUpgrade), Some(500));
    }

    #[test]
    fn test_armor_reapply_restarts_window() {
        let mut s = state();
        apply_armor(&mut s);
        assert_eq!(s.player.damage_reduction, 0.4);

        advance_to(&mut s, 5000);
        apply_armor(&mut s);

        advance_to(&mut s, 7000);
        assert_eq!(s.player.damage_reduction, 0.4);
        advance_to(&mut s, 10000);
        assert_eq!(s.player.damage_reduction, 0.4);
        assert_eq!(s.armor_expires_at(), Some(12000));

        advance_to(&mut s, 12000);
        assert_eq!(s.player.damage_reduction, 1.0);
        assert_eq!(s.armor_expires_at(), None);
    }

    #[test]
    fn test_sword_upgrade_reverts_to_base() {
        let mut s = state();
        apply_sword_upgrade(&mut s);
        advance_to(&mut s, 4000);
        apply_sword_upgrade(&mut s);
        assert_eq!(s.player.sword_length, 90.0);
        advance_to(&mut s, 13999);
        assert_eq!(s.player.sword_length, 90.0);
        advance_to(&mut s, 14000);
        assert_eq!(s.player.sword_length, 65.0);
    }

    #[test]
    fn test_freeze_stops_and_restores() {
        let mut s = state();
        s.spawn_enemy(EnemyKind::Normal, Vec2::new(10.0, 10.0));
        s.spawn_enemy(EnemyKind::Bomber, Vec2::new(20.0, 10.0));
        let speeds: Vec<f32> = s.enemies.iter().map(|e| e.speed).collect();

        advance_to(&mut s, 1000);
        apply_freeze(&mut s);
        assert!(s.enemies.iter().all(|e| e.frozen && e.speed == 0.0));

        advance_to(&mut s, 3999);
        assert!(s.enemies.iter().all(|e| e.frozen));

        advance_to(&mut s, 4000);
        for (e, speed) in s.enemies.iter().zip(speeds) {
            assert!(!e.frozen);
            assert_eq!(e.speed, speed);
            assert_eq!(e.color, e.kind.archetype().color);
        }
    }
}
