//! Drawable state captured from the simulation

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{EnemyKind, GameState, SCORE_TEXT_LIFE};

/// Alpha divisor for regular particles
const PARTICLE_FADE_LIFE: f32 = 50.0;
/// Invulnerable player blinks with this period (ms)
const BLINK_PERIOD_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Fades from 0 (oldest) toward 1 (newest)
    pub alpha: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    /// False during the off phase of the invulnerability blink
    pub visible: bool,
    pub armored: bool,
    pub invulnerable: bool,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwordView {
    pub start: Vec2,
    pub tip: Vec2,
    pub swinging: bool,
    /// Not enough stamina for another swing
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: EnemyKind,
    pub color: u32,
    /// Bomber core
    pub inner_color: Option<u32>,
    pub frozen: bool,
    pub hit_flash: bool,
    /// Tank health bar
    pub hp_bar: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
    pub text: Option<String>,
}

/// Everything the render sink paints for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub arena: Vec2,
    /// Applied to the render origin
    pub shake_offset: Vec2,
    pub trail: Vec<TrailPoint>,
    pub player: PlayerView,
    pub sword: SwordView,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
}

impl RenderFrame {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let now = state.now_ms;
        let player = &state.player;

        // Apply settings to visual effects
        let shake_offset = if settings.effective_screen_shake() {
            shake_offset(state.screen_shake, state.frame)
        } else {
            Vec2::ZERO
        };
        let hit_flash_enabled = settings.effective_hit_flash();

        let len = player.trail.len().max(1) as f32;
        let trail = player
            .trail
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let alpha = i as f32 / len;
                TrailPoint {
                    pos,
                    alpha,
                    radius: player.radius * alpha,
                }
            })
            .collect();

        let visible = !player.invulnerable || (now / BLINK_PERIOD_MS) % 2 == 0;
        let player_view = PlayerView {
            pos: player.pos,
            radius: player.radius,
            visible,
            armored: player.is_armored(),
            invulnerable: player.invulnerable,
            health_fraction: player.health_fraction(),
        };

        let (start, tip) = player.sword_segment();
        let sword = SwordView {
            start,
            tip,
            swinging: player.swinging,
            exhausted: state.stamina.is_exhausted(),
        };

        let enemies = state
            .enemies
            .iter()
            .map(|e| {
                let archetype = e.kind.archetype();
                let recently_hit = e.last_hit.is_some_and(|t| now.saturating_sub(t) < HIT_FLASH_MS);
                EnemyView {
                    pos: e.pos,
                    size: e.size,
                    kind: e.kind,
                    color: e.color,
                    inner_color: archetype.inner_color,
                    frozen: e.frozen,
                    hit_flash: hit_flash_enabled && recently_hit && !e.explode,
                    hp_bar: (e.kind == EnemyKind::Tank).then(|| e.hp_fraction()),
                }
            })
            .collect();

        let particles = if settings.particles {
            state
                .particles
                .iter()
                .map(|p| {
                    let fade = if p.is_text() {
                        SCORE_TEXT_LIFE
                    } else {
                        PARTICLE_FADE_LIFE
                    };
                    ParticleView {
                        pos: p.pos,
                        size: p.size,
                        color: p.color,
                        alpha: (p.life / fade).clamp(0.0, 1.0),
                        text: p.text.clone(),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            arena: state.arena,
            shake_offset,
            trail,
            player: player_view,
            sword,
            enemies,
            particles,
        }
    }
}

/// Jitter within ±intensity/2 on each axis, stable for a given frame
fn shake_offset(intensity: f32, frame: u64) -> Vec2 {
    if intensity <= 0.0 {
        return Vec2::ZERO;
    }
    let mut rng = Pcg32::seed_from_u64(frame);
    Vec2::new(
        (rng.random::<f32>() - 0.5) * intensity,
        (rng.random::<f32>() - 0.5) * intensity,
    )
}
