//! Stamina: gates how often the player can swing

use crate::tuning::Tuning;

/// Stamina pool and attack cooldown
#[derive(Debug, Clone, PartialEq)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub drain: f32,
    pub regen: f32,
    pub regen_delay_ms: u64,
    pub attack_delay_ms: u64,
    /// When stamina was last spent (ms)
    pub last_use: Option<u64>,
    /// When the last swing started (ms)
    pub last_attack: Option<u64>,
}

impl Stamina {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            current: tuning.max_stamina,
            max: tuning.max_stamina,
            drain: tuning.stamina_drain,
            regen: tuning.stamina_regen,
            regen_delay_ms: tuning.stamina_regen_delay_ms,
            attack_delay_ms: tuning.attack_delay_ms,
            last_use: None,
            last_attack: None,
        }
    }

    /// Whether a swing is allowed at `now`
    pub fn can_attack(&self, now: u64) -> bool {
        let cooled = self
            .last_attack
            .is_none_or(|t| now.saturating_sub(t) >= self.attack_delay_ms);
        cooled && self.current >= self.drain
    }

    /// Spend stamina for a swing; returns false (and changes nothing) when
    /// the cooldown has not elapsed or stamina is short
    pub fn try_attack(&mut self, now: u64) -> bool {
        if !self.can_attack(now) {
            return false;
        }
        self.current = (self.current - self.drain).max(0.0);
        self.last_use = Some(now);
        self.last_attack = Some(now);
        true
    }

    /// Per-update regeneration, only after the quiet period
    pub fn regenerate(&mut self, now: u64) {
        if self.current >= self.max {
            return;
        }
        let rested = self
            .last_use
            .is_none_or(|t| now.saturating_sub(t) > self.regen_delay_ms);
        if rested {
            self.current = (self.current + self.regen).min(self.max);
        }
    }

    /// Too tired to swing
    pub fn is_exhausted(&self) -> bool {
        self.current < self.drain
    }

    pub fn fraction(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }
}
