//! Property tests for simulation invariants

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use sword_arena::consts::SWORD_HIT_ALLOWANCE;
use sword_arena::sim::{
    Enemy, EnemyKind, GameEvent, GameState, ParticleSystem, TickInput, sword_reaches, tick,
};
use sword_arena::Tuning;

fn fresh(seed: u64) -> GameState {
    GameState::new(seed, Vec2::new(800.0, 600.0), Tuning::default(), 0)
}

proptest! {
    #[test]
    fn health_stays_in_bounds(ops in prop::collection::vec((any::<bool>(), 0.0f32..80.0), 1..60)) {
        let mut s = fresh(1);
        for (hurt, amount) in ops {
            if hurt {
                s.damage_player(amount);
            } else {
                s.player.heal(amount);
            }
            prop_assert!(s.player.health >= 0.0);
            prop_assert!(s.player.health <= s.player.max_health);
        }
        let overs = s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        prop_assert_eq!(overs, usize::from(s.is_over()));
    }

    #[test]
    fn sword_hit_boundary(
        start_x in -200.0f32..200.0,
        start_y in -200.0f32..200.0,
        len in 10.0f32..120.0,
        along in 0.0f32..1.0,
        size in 5.0f32..40.0,
        above in any::<bool>(),
    ) {
        let start = Vec2::new(start_x, start_y);
        let end = start + Vec2::new(len, 0.0);
        let sign = if above { 1.0 } else { -1.0 };
        let reach = size + SWORD_HIT_ALLOWANCE;
        let eps = 0.01;
        let x = start.x + along * len;

        let inside = Vec2::new(x, start.y + sign * (reach - eps));
        let outside = Vec2::new(x, start.y + sign * (reach + eps));
        prop_assert!(sword_reaches(inside, size, start, end));
        prop_assert!(!sword_reaches(outside, size, start, end));
    }

    #[test]
    fn spawned_stats_follow_wave_scaling(wave in 1u32..40) {
        for kind in EnemyKind::ALL {
            let e = Enemy::spawn(1, kind, Vec2::ZERO, wave);
            let a = kind.archetype();
            if a.fixed_stats {
                prop_assert_eq!(e.hp, a.base_hp);
                prop_assert_eq!(e.speed, a.base_speed);
                continue;
            }
            let speed = (a.base_speed + wave as f32 * a.speed_per_wave) * (1.0 + wave as f32 * 0.03);
            prop_assert!((e.speed - speed).abs() < 1e-4);
            prop_assert!(e.hp >= a.base_hp);
            prop_assert_eq!(e.hp % (1 + (wave / 4) as i32), 0);
        }
    }

    #[test]
    fn frames_never_break_health_bounds(seed in any::<u64>(), moves in prop::collection::vec(0u8..9, 50..200)) {
        let mut s = fresh(seed);
        for (i, m) in moves.into_iter().enumerate() {
            let now = i as u64 * 16;
            if i % 60 == 0 {
                sword_arena::sim::spawn_tick(&mut s);
            }
            let input = TickInput {
                movement: Vec2::new((m % 3) as f32 - 1.0, (m / 3) as f32 - 1.0),
                attack: m % 2 == 0,
                aim: Some(Vec2::new(400.0, 0.0)),
                ..Default::default()
            };
            tick(&mut s, &input, now);
            prop_assert!(s.player.health >= 0.0 && s.player.health <= s.player.max_health);
            prop_assert!(s.particles.active_count() <= s.tuning.max_particles);
            prop_assert!(s.enemies.iter().all(|e| e.hp > 0));
        }
    }
}

#[test]
fn particle_pool_never_exceeds_cap_or_duplicates() {
    let mut ps = ParticleSystem::new(200, 99);
    for i in 0..500 {
        ps.spawn(Vec2::new(i as f32, 0.0), 0xFFFFFF, 1);
        // Expire a burst now and then so slots cycle through the pool
        let steps = if i % 7 == 0 { 60 } else { 1 };
        for _ in 0..steps {
            ps.advance();
        }

        assert!(ps.active_count() <= 200);
        assert!(ps.allocated() <= 200);
        let active: HashSet<usize> = ps.active_slots().iter().copied().collect();
        let free: HashSet<usize> = ps.free_slots().iter().copied().collect();
        assert_eq!(active.len(), ps.active_slots().len(), "duplicate active slot");
        assert_eq!(free.len(), ps.free_slots().len(), "duplicate free slot");
        assert!(active.is_disjoint(&free));
    }
}

#[test]
fn particle_spawn_drops_silently_at_cap() {
    let mut ps = ParticleSystem::new(200, 1);
    for _ in 0..500 {
        ps.spawn(Vec2::ZERO, 0xFF0000, 1);
    }
    assert_eq!(ps.active_count(), 200);
    // Score text is outside the cap
    ps.spawn_score_text(Vec2::ZERO, 5);
    assert_eq!(ps.active_count(), 200);
    assert_eq!(ps.text_count(), 1);
}
