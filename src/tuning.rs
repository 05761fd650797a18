//! Data-driven game balance
//!
//! Every knob the simulation reads at runtime lives here. `Default` is the
//! shipped balance; a JSON document may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced while loading a tuning document
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// The document is not valid JSON for this schema
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "tuning parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Movement per update (pixels)
    pub player_speed: f32,
    pub player_radius: f32,
    pub max_health: f32,

    // === Sword ===
    pub sword_length: f32,
    /// Sword length while the upgrade is active
    pub sword_upgrade_length: f32,
    /// Angle advanced per update while swinging (radians)
    pub swing_step: f32,
    /// Minimum time between swings, also the swing duration (ms)
    pub attack_delay_ms: u64,

    // === Stamina ===
    pub max_stamina: f32,
    /// Stamina spent per swing
    pub stamina_drain: f32,
    /// Stamina regained per update once regeneration is allowed
    pub stamina_regen: f32,
    /// Quiet time after a swing before regeneration starts (ms)
    pub stamina_regen_delay_ms: u64,

    // === Status effects ===
    pub invulnerability_ms: u64,
    pub armor_ms: u64,
    /// Damage multiplier while armored (0, 1]
    pub armor_reduction: f32,
    pub sword_upgrade_ms: u64,
    pub freeze_ms: u64,
    pub potion_heal: f32,

    // === Combat ===
    /// Chance a kill drops a powerup into the inventory
    pub drop_chance: f32,
    /// Radius of a bomber's death explosion
    pub explosion_radius: f32,
    /// Base damage of a bomber's death explosion
    pub explosion_damage: f32,

    // === Effects ===
    pub max_particles: usize,

    // === Spawning ===
    /// Period of the spawn ticker (ms)
    pub spawn_period_ms: u64,
    /// Chance a spawn tick is skipped outright
    pub spawn_skip_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.5,
            player_radius: 20.0,
            max_health: 100.0,

            sword_length: 65.0,
            sword_upgrade_length: 90.0,
            swing_step: 0.2,
            attack_delay_ms: 300,

            max_stamina: 100.0,
            stamina_drain: 2.0,
            stamina_regen: 0.5,
            stamina_regen_delay_ms: 1000,

            invulnerability_ms: 800,
            armor_ms: 7000,
            armor_reduction: 0.4,
            sword_upgrade_ms: 10_000,
            freeze_ms: 3000,
            potion_heal: 30.0,

            drop_chance: 0.3,
            explosion_radius: 100.0,
            explosion_damage: 12.0,

            max_particles: 200,

            spawn_period_ms: 1000,
            spawn_skip_chance: 0.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field is in a range the simulation can run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be a positive number" })
            }
        }
        fn chance(field: &'static str, v: f32) -> Result<(), TuningError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be within [0, 1]" })
            }
        }

        positive("player_speed", self.player_speed)?;
        positive("player_radius", self.player_radius)?;
        positive("max_health", self.max_health)?;
        positive("sword_length", self.sword_length)?;
        positive("sword_upgrade_length", self.sword_upgrade_length)?;
        positive("max_stamina", self.max_stamina)?;
        positive("stamina_drain", self.stamina_drain)?;
        positive("potion_heal", self.potion_heal)?;

        if !(self.armor_reduction > 0.0 && self.armor_reduction <= 1.0) {
            return Err(TuningError::Invalid {
                field: "armor_reduction",
                reason: "must be within (0, 1]",
            });
        }
        chance("drop_chance", self.drop_chance)?;
        chance("spawn_skip_chance", self.spawn_skip_chance)?;

        for (field, ms) in [
            ("attack_delay_ms", self.attack_delay_ms),
            ("invulnerability_ms", self.invulnerability_ms),
            ("armor_ms", self.armor_ms),
            ("sword_upgrade_ms", self.sword_upgrade_ms),
            ("freeze_ms", self.freeze_ms),
            ("spawn_period_ms", self.spawn_period_ms),
        ] {
            if ms == 0 {
                return Err(TuningError::Invalid { field, reason: "duration must be non-zero" });
            }
        }

        if self.max_particles == 0 {
            return Err(TuningError::Invalid { field: "max_particles", reason: "must be non-zero" });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "armor_ms": 5000, "drop_chance": 1.0 }"#).unwrap();
        assert_eq!(tuning.armor_ms, 5000);
        assert_eq!(tuning.drop_chance, 1.0);
        assert_eq!(tuning.max_particles, 200);
        assert_eq!(tuning.sword_length, 65.0);
    }

    #[test]
    fn test_rejects_bad_reduction() {
        let err = Tuning::from_json(r#"{ "armor_reduction": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "armor_reduction", .. }));
    }

    #[test]
    fn test_rejects_zero_spawn_period() {
        assert_eq!(Tuning::default().spawn_period_ms, 1000);
        let err = Tuning::from_json(r#"{ "spawn_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_period_ms", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }
}
