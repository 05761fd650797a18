//! Render snapshot
//!
//! Each frame the orchestrator captures a `RenderFrame`: everything a render
//! sink needs to paint, already resolved against the visual settings. The
//! sink never reads `GameState` directly.

pub mod frame;

pub use frame::{EnemyView, ParticleView, PlayerView, RenderFrame, SwordView, TrailPoint};
