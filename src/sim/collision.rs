//! Combat and collision resolution
//!
//! Sword hits are a point-to-segment test against the blade. Enemy bodies are
//! circles that chase the player and deal contact damage on overlap. Bombers
//! explode, on death within a radius or on contact.

use glam::Vec2;

use super::effects;
use super::enemy::{Enemy, EnemyKind};
use super::inventory;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{direction_to, point_segment_distance};

/// Color of explosion particles
pub const EXPLOSION_COLOR: u32 = 0xFF8C00;
/// Color of contact sparks
pub const SPARK_COLOR: u32 = 0xFFFFFF;
/// Number of minis a splitter breaks into
pub const SPLITTER_CHILDREN: usize = 3;

/// Whether a blade from `start` to `end` reaches an enemy body
#[inline]
pub fn sword_reaches(enemy_pos: Vec2, enemy_size: f32, start: Vec2, end: Vec2) -> bool {
    point_segment_distance(enemy_pos, start, end) < enemy_size + SWORD_HIT_ALLOWANCE
}

/// Contact damage after proximity scaling and armor.
///
/// Deeper overlap deals up to the full base amount; a grazing touch deals
/// 70%. Armor reduces the result but never below 1.
pub fn contact_damage(base: f32, dist: f32, reach: f32, damage_reduction: f32) -> f32 {
    let proximity = 1.0 - (dist / reach).min(1.0);
    let damage = (base * (0.7 + proximity * 0.3)).floor();
    armor_scaled(damage, damage_reduction)
}

/// Apply armor to an already-rounded damage value
#[inline]
fn armor_scaled(damage: f32, damage_reduction: f32) -> f32 {
    if damage_reduction < 1.0 {
        (damage * damage_reduction).floor().max(1.0)
    } else {
        damage
    }
}

/// Test every enemy against the blade; hits cost 1 hp each.
///
/// Dead enemies are removed in the same pass and their death effects
/// resolved in spawn order.
pub fn check_sword_hits(state: &mut GameState) {
    if !state.player.swinging {
        return;
    }
    let (start, end) = state.player.sword_segment();
    let now = state.now_ms;

    let mut hit_ids = Vec::new();
    for enemy in &mut state.enemies {
        if sword_reaches(enemy.pos, enemy.size, start, end) {
            enemy.hp -= 1;
            enemy.last_hit = Some(now);
            hit_ids.push(enemy.id);
        }
    }
    if hit_ids.is_empty() {
        return;
    }
    for id in hit_ids {
        state.emit(GameEvent::EnemyHit { id });
    }

    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut state.enemies).into_iter().partition(Enemy::is_dead);
    state.enemies = alive;
    for enemy in dead {
        kill_enemy(state, enemy);
    }
}

/// Resolve a death: explosion, score, splitting, particles and drops.
///
/// Nothing changes once the run is over, including when the enemy's own
/// explosion ends it.
pub fn kill_enemy(state: &mut GameState, enemy: Enemy) {
    if state.is_over() {
        return;
    }
    if enemy.explode {
        let damage = state.tuning.explosion_damage;
        explode(state, enemy.pos, damage);
        if state.is_over() {
            return;
        }
    }

    state.add_score(enemy.points);
    state.particles.spawn_score_text(enemy.pos, enemy.points);

    if enemy.kind == EnemyKind::Splitter {
        spawn_minis(state, enemy.pos);
    }

    state.particles.spawn(enemy.pos, enemy.color, 15);
    state.emit(GameEvent::EnemyKilled {
        id: enemy.id,
        kind: enemy.kind,
        points: enemy.points,
        pos: enemy.pos,
    });

    inventory::roll_drop(state);
}

/// Splitter offspring appear exactly where the parent died
pub fn spawn_minis(state: &mut GameState, pos: Vec2) {
    for _ in 0..SPLITTER_CHILDREN {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::mini(id, pos));
        state.emit(GameEvent::EnemySpawned {
            id,
            kind: EnemyKind::Mini,
        });
    }
}

/// Bomber death blast. The player takes armor-scaled damage when inside the
/// radius. Returns the damage dealt.
pub fn explode(state: &mut GameState, pos: Vec2, base_damage: f32) -> f32 {
    state.particles.spawn(pos, EXPLOSION_COLOR, 30);

    let mut dealt = 0.0;
    if state.player.pos.distance(pos) < state.tuning.explosion_radius {
        dealt = base_damage * state.player.damage_reduction;
        state.screen_shake = EXPLOSION_SHAKE;
        state.damage_player(dealt);
    }
    log::debug!("Explosion at ({:.0}, {:.0}) dealt {dealt}", pos.x, pos.y);
    state.emit(GameEvent::Explosion {
        pos,
        player_damage: dealt,
    });
    dealt
}

/// Move every unfrozen enemy toward the player and resolve body contact
pub fn update_enemies(state: &mut GameState) {
    let mut i = 0;
    while i < state.enemies.len() {
        if state.is_over() {
            return;
        }
        let target = state.player.pos;
        let enemy = &mut state.enemies[i];
        if enemy.frozen {
            i += 1;
            continue;
        }
        // Exact overlap has no direction; the enemy holds still
        enemy.pos += direction_to(enemy.pos, target) * enemy.speed;

        if !resolve_contact(state, i) {
            i += 1;
        }
    }
}

/// Contact between enemy `index` and the player. Returns true if the enemy
/// was consumed (bomber detonation).
fn resolve_contact(state: &mut GameState, index: usize) -> bool {
    let enemy = &state.enemies[index];
    let dist = state.player.pos.distance(enemy.pos);
    let reach = state.player.radius + enemy.size;
    if dist >= reach {
        return false;
    }

    let base = enemy.kind.archetype().contact_damage;
    let detonates = enemy.explode;
    let pos = enemy.pos;
    let reduction = state.player.damage_reduction;

    let damage = if detonates {
        // Full base damage regardless of overlap depth
        let damage = armor_scaled(base, reduction);
        state.enemies.remove(index);
        state.particles.spawn(pos, EXPLOSION_COLOR, 30);
        state.screen_shake = EXPLOSION_SHAKE;
        state.emit(GameEvent::Explosion {
            pos,
            player_damage: damage,
        });
        damage
    } else {
        if state.player.invulnerable {
            return false;
        }
        let damage = contact_damage(base, dist, reach, reduction);
        state.screen_shake = 8.0 + damage * 2.0;
        damage
    };

    state.damage_player(damage);
    if !state.player.is_armored() {
        effects::grant_invulnerability(state);
    }
    state
        .particles
        .spawn(pos, SPARK_COLOR, 10 + (damage as usize) * 2);

    detonates
}
