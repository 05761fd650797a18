//! Deterministic simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches rendering,
//! audio or storage:
//! - Host time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod effects;
pub mod enemy;
pub mod inventory;
pub mod particles;
pub mod spawn;
pub mod stamina;
pub mod state;
pub mod tick;

pub use collision::{check_sword_hits, contact_damage, explode, kill_enemy, sword_reaches, update_enemies};
pub use effects::{TimerKind, Timers, resolve_timers};
pub use enemy::{Archetype, Enemy, EnemyKind, FROZEN_COLOR};
pub use inventory::{Inventory, PowerupKind, apply_effect, roll_drop, use_slot};
pub use particles::{Particle, ParticleSystem, SCORE_TEXT_LIFE};
pub use spawn::{Edge, choose_kind, spawn_tick};
pub use stamina::Stamina;
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, start_swing, tick, toggle_inventory, toggle_pause};
