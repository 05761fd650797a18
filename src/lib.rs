//! Sword Arena - a single-screen arcade survival game core
//!
//! Core modules:
//! - `sim`: Simulation (player, enemies, combat, waves, stamina, powerups)
//! - `renderer`: Per-frame drawable snapshot handed to the render sink
//! - `platform`: Collaborator traits (render, audio, HUD, high-score storage)
//! - `game`: Frame orchestrator driving the simulation and the timers
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod perf;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameConfig};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena size (pixels)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Performance sampling period (ms)
    pub const PERF_PERIOD_MS: u64 = 1000;

    /// Maximum trail points kept behind the player
    pub const TRAIL_LENGTH: usize = 10;
    /// Diagonal movement scale (1/sqrt(2))
    pub const DIAGONAL_SCALE: f32 = 0.7071;

    /// Extra reach added to an enemy's size for sword hits
    pub const SWORD_HIT_ALLOWANCE: f32 = 15.0;

    /// Inventory slot count
    pub const INVENTORY_SLOTS: usize = 6;

    /// Score needed per wave
    pub const POINTS_PER_WAVE: u64 = 10;

    /// Window during which a struck enemy flashes white (ms)
    pub const HIT_FLASH_MS: u64 = 200;

    /// Screen shake decay per update
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Shake applied on game over
    pub const GAME_OVER_SHAKE: f32 = 20.0;
    /// Shake applied by explosions
    pub const EXPLOSION_SHAKE: f32 = 15.0;
}

/// Euclidean distance from `point` to the segment `start..end`.
///
/// The projection parameter is clamped to [0, 1], so points beyond either
/// end measure to that endpoint. A zero-length segment measures to `start`.
#[inline]
pub fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    let t = if len_sq > 0.0 {
        ((point - start).dot(seg) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    point.distance(start + seg * t)
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle in radians
#[inline]
pub fn angle_to_dir(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Initialise logging for the current platform.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();
    }
}
