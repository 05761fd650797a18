//! Pooled visual particles
//!
//! Regular particles live in a fixed-capacity arena with a free list, so
//! spawning reuses dead slots instead of allocating. Floating score text is
//! kept in a separate list and never counts against the cap.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Remaining updates
    pub life: f32,
    pub color: u32,
    /// Floating text (score numbers); text does not shrink
    pub text: Option<String>,
}

impl Particle {
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// Advance one update; returns false once expired
    fn step(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= 1.0;
        if !self.is_text() {
            self.size *= 0.98;
        }
        self.life > 0.0
    }
}

/// Color of floating score text
pub const SCORE_TEXT_COLOR: u32 = 0xFFD700;
/// Lifetime of floating score text (updates)
pub const SCORE_TEXT_LIFE: f32 = 60.0;

/// Fixed-capacity particle arena
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    /// Arena storage; never grows past `capacity`
    slots: Vec<Particle>,
    /// Slot indices available for reuse
    free: Vec<usize>,
    /// Live slot indices in spawn order
    active: Vec<usize>,
    /// Score text, outside the cap
    texts: Vec<Particle>,
    capacity: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            texts: Vec::new(),
            capacity,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn up to `count` burst particles at `pos`.
    ///
    /// Pooled slots are reused first; new slots are only allocated below the
    /// cap. Once both run out the remaining requests are dropped. Returns
    /// how many particles were actually spawned.
    pub fn spawn(&mut self, pos: Vec2, color: u32, count: usize) -> usize {
        for spawned in 0..count {
            let particle = Particle {
                pos,
                vel: Vec2::new(
                    (self.rng.random::<f32>() - 0.5) * 6.0,
                    (self.rng.random::<f32>() - 0.5) * 6.0,
                ),
                size: self.rng.random::<f32>() * 3.0 + 2.0,
                life: 30.0 + self.rng.random::<f32>() * 20.0,
                color,
                text: None,
            };

            if let Some(i) = self.free.pop() {
                self.slots[i] = particle;
                self.active.push(i);
            } else if self.slots.len() < self.capacity {
                self.slots.push(particle);
                self.active.push(self.slots.len() - 1);
            } else {
                return spawned;
            }
        }
        count
    }

    /// Spawn a floating "+N" above a kill
    pub fn spawn_score_text(&mut self, pos: Vec2, points: u64) {
        self.texts.push(Particle {
            pos,
            vel: Vec2::new(0.0, -1.0),
            size: 20.0,
            life: SCORE_TEXT_LIFE,
            color: SCORE_TEXT_COLOR,
            text: Some(format!("+{points}")),
        });
    }

    /// Move, age and shrink every particle; expired slots return to the pool
    pub fn advance(&mut self) {
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.active.retain(|&i| {
            if slots[i].step() {
                true
            } else {
                free.push(i);
                false
            }
        });
        self.texts.retain_mut(|p| p.step());
    }

    /// Live pooled particles (excludes text)
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Live score text particles
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// All live particles
    pub fn len(&self) -> usize {
        self.active.len() + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dead slots waiting for reuse
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }

    /// Slots ever allocated
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live slot indices (pool bookkeeping)
    pub fn active_slots(&self) -> &[usize] {
        &self.active
    }

    /// Free slot indices (pool bookkeeping)
    pub fn free_slots(&self) -> &[usize] {
        &self.free
    }

    /// Iterate live particles: bursts first, then text
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.active.iter().map(|&i| &self.slots[i]).chain(self.texts.iter())
    }

    /// Drop everything, keeping allocated slots pooled
    pub fn clear(&mut self) {
        self.free.extend(self.active.drain(..));
        self.texts.clear();
    }
}
