//! Game state and core simulation types
//!
//! One `GameState` owns everything a run needs. It is rebuilt from scratch on
//! restart; nothing is shared between runs.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{TimerKind, Timers};
use super::enemy::{Enemy, EnemyKind};
use super::inventory::{Inventory, PowerupKind};
use super::particles::ParticleSystem;
use super::stamina::Stamina;
use crate::angle_to_dir;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen (pause menu or inventory open)
    Paused,
    /// Run ended; state is kept for inspection until restart
    GameOver,
}

/// Discrete things that happened during a tick, drained by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Swing,
    EnemySpawned { id: u32, kind: EnemyKind },
    EnemyHit { id: u32 },
    EnemyKilled { id: u32, kind: EnemyKind, points: u64, pos: Vec2 },
    Explosion { pos: Vec2, player_damage: f32 },
    PlayerDamaged { amount: f32, health: f32 },
    PowerupDropped { kind: PowerupKind, slot: usize },
    PowerupUsed { kind: PowerupKind },
    EffectExpired { timer: TimerKind },
    WaveAdvanced { wave: u32 },
    GameOver { score: u64, wave: u32 },
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Damage multiplier, 1.0 = unarmored
    pub damage_reduction: f32,
    pub invulnerable: bool,
    /// Recent positions, newest last
    pub trail: VecDeque<Vec2>,
    pub sword_angle: f32,
    pub swinging: bool,
    /// +1 or -1
    pub swing_dir: f32,
    pub sword_length: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            health: tuning.max_health,
            max_health: tuning.max_health,
            damage_reduction: 1.0,
            invulnerable: false,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            sword_angle: 0.0,
            swinging: false,
            swing_dir: 1.0,
            sword_length: tuning.sword_length,
        }
    }

    /// Move by a raw intent vector, keeping the body inside the arena
    pub fn move_by(&mut self, intent: Vec2, arena: Vec2) {
        let mut step = intent;
        if step.x != 0.0 && step.y != 0.0 {
            step *= DIAGONAL_SCALE;
        }
        self.pos += step * self.speed;
        self.pos = self.pos.clamp(
            Vec2::splat(self.radius),
            (arena - Vec2::splat(self.radius)).max(Vec2::splat(self.radius)),
        );

        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_armored(&self) -> bool {
        self.damage_reduction < 1.0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Sword as a segment from the player center to the tip
    pub fn sword_segment(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + angle_to_dir(self.sword_angle) * self.sword_length)
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Arena size (width, height)
    pub arena: Vec2,
    pub phase: GamePhase,
    pub inventory_open: bool,
    /// Latest timestamp seen (ms)
    pub now_ms: u64,
    /// Updates run so far
    pub frame: u64,
    pub score: u64,
    /// Current wave (starts at 1)
    pub wave: u32,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub particles: ParticleSystem,
    pub stamina: Stamina,
    pub inventory: Inventory,
    /// Pending one-shot effect expiries
    pub timers: Timers,
    pub screen_shake: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_wave_score: u64,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the player at the arena center
    pub fn new(seed: u64, arena: Vec2, tuning: Tuning, now: u64) -> Self {
        let player = Player::new(arena * 0.5, &tuning);
        Self {
            seed,
            arena,
            phase: GamePhase::Playing,
            inventory_open: false,
            now_ms: now,
            frame: 0,
            score: 0,
            wave: 1,
            player,
            enemies: Vec::new(),
            // Separate stream so effects never perturb gameplay rolls
            particles: ParticleSystem::new(tuning.max_particles, seed ^ 0x9E37_79B9_7F4A_7C15),
            stamina: Stamina::new(&tuning),
            inventory: Inventory::new(),
            timers: Timers::default(),
            screen_shake: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_wave_score: POINTS_PER_WAVE,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Gameplay RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add an enemy at `pos` with stats for the current wave
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::spawn(id, kind, pos, self.wave));
        self.emit(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Award points, advancing the wave for every threshold crossed
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        while self.score >= self.next_wave_score {
            self.next_wave_score += POINTS_PER_WAVE;
            self.wave += 1;
            log::info!("Wave {} reached (score {})", self.wave, self.score);
            self.emit(GameEvent::WaveAdvanced { wave: self.wave });
        }
    }

    /// Subtract health, clamped at zero; ends the run when it reaches zero
    pub fn damage_player(&mut self, amount: f32) {
        if self.is_over() {
            return;
        }
        let player = &mut self.player;
        player.health = (player.health - amount).clamp(0.0, player.max_health);
        let health = player.health;
        self.emit(GameEvent::PlayerDamaged { amount, health });
        if health <= 0.0 {
            self.end_game();
        }
    }

    /// Enter the terminal state. Returns false if the run had already ended.
    pub fn end_game(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.inventory_open = false;
        self.screen_shake = GAME_OVER_SHAKE;
        log::info!("Game over: score {} at wave {}", self.score, self.wave);
        self.emit(GameEvent::GameOver {
            score: self.score,
            wave: self.wave,
        });
        true
    }

    /// When the current armor window closes, if any
    pub fn armor_expires_at(&self) -> Option<u64> {
        self.timers.deadline(TimerKind::Armor)
    }
}
