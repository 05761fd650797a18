//! Enemy archetypes and per-wave stat scaling

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    /// Breaks into three minis on death
    Splitter,
    /// Explodes on death or contact
    Bomber,
    /// Splitter offspring, fixed stats
    Mini,
}

/// Static per-type parameters
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub size: f32,
    /// Speed before the wave multiplier
    pub base_speed: f32,
    /// Added to `base_speed` per wave before the multiplier
    pub speed_per_wave: f32,
    pub base_hp: i32,
    /// Added to `base_hp` for every four waves (tank only)
    pub hp_per_four_waves: i32,
    pub color: u32,
    /// Bomber core color
    pub inner_color: Option<u32>,
    pub points: u64,
    /// Contact damage before proximity and armor scaling
    pub contact_damage: f32,
    pub explode: bool,
    /// Ignores wave scaling entirely
    pub fixed_stats: bool,
}

static ARCHETYPES: [Archetype; 6] = [
    // Normal
    Archetype {
        size: 20.0,
        base_speed: 1.2,
        speed_per_wave: 0.08,
        base_hp: 1,
        hp_per_four_waves: 0,
        color: 0xFF0000,
        inner_color: None,
        points: 1,
        contact_damage: 5.0,
        explode: false,
        fixed_stats: false,
    },
    // Fast
    Archetype {
        size: 15.0,
        base_speed: 2.8,
        speed_per_wave: 0.12,
        base_hp: 1,
        hp_per_four_waves: 0,
        color: 0xFF00FF,
        inner_color: None,
        points: 2,
        contact_damage: 4.0,
        explode: false,
        fixed_stats: false,
    },
    // Tank
    Archetype {
        size: 30.0,
        base_speed: 0.7,
        speed_per_wave: 0.04,
        base_hp: 2,
        hp_per_four_waves: 1,
        color: 0x880000,
        inner_color: None,
        points: 5,
        contact_damage: 6.0,
        explode: false,
        fixed_stats: false,
    },
    // Splitter
    Archetype {
        size: 18.0,
        base_speed: 1.8,
        speed_per_wave: 0.0,
        base_hp: 1,
        hp_per_four_waves: 0,
        color: 0x00FF00,
        inner_color: None,
        points: 3,
        contact_damage: 3.0,
        explode: false,
        fixed_stats: false,
    },
    // Bomber
    Archetype {
        size: 22.0,
        base_speed: 1.6,
        speed_per_wave: 0.0,
        base_hp: 2,
        hp_per_four_waves: 0,
        color: 0x000000,
        inner_color: Some(0xFF8C00),
        points: 4,
        contact_damage: 10.0,
        explode: true,
        fixed_stats: false,
    },
    // Mini
    Archetype {
        size: 12.0,
        base_speed: 2.5,
        speed_per_wave: 0.0,
        base_hp: 1,
        hp_per_four_waves: 0,
        color: 0x00AA00,
        inner_color: None,
        points: 0,
        contact_damage: 2.0,
        explode: false,
        fixed_stats: true,
    },
];

/// Tint applied to frozen enemies
pub const FROZEN_COLOR: u32 = 0x8888FF;

/// Global speed multiplier for a wave
#[inline]
pub fn speed_multiplier(wave: u32) -> f32 {
    1.0 + wave as f32 * 0.03
}

/// Global hp multiplier for a wave
#[inline]
pub fn hp_multiplier(wave: u32) -> i32 {
    1 + (wave / 4) as i32
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Splitter,
        EnemyKind::Bomber,
        EnemyKind::Mini,
    ];

    pub fn archetype(self) -> &'static Archetype {
        &ARCHETYPES[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Splitter => "splitter",
            EnemyKind::Bomber => "bomber",
            EnemyKind::Mini => "mini",
        }
    }

    /// Movement speed of a fresh enemy of this kind at `wave`
    pub fn speed_at_wave(self, wave: u32) -> f32 {
        let a = self.archetype();
        if a.fixed_stats {
            return a.base_speed;
        }
        (a.base_speed + wave as f32 * a.speed_per_wave) * speed_multiplier(wave)
    }

    /// Hit points of a fresh enemy of this kind at `wave`
    pub fn hp_at_wave(self, wave: u32) -> i32 {
        let a = self.archetype();
        if a.fixed_stats {
            return a.base_hp;
        }
        (a.base_hp + (wave / 4) as i32 * a.hp_per_four_waves) * hp_multiplier(wave)
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: f32,
    /// Current speed (0 while frozen)
    pub speed: f32,
    /// Speed to restore when a freeze ends
    pub original_speed: f32,
    pub hp: i32,
    /// Hit points at spawn (for health bars)
    pub max_hp: i32,
    pub color: u32,
    pub points: u64,
    pub frozen: bool,
    pub frozen_since: Option<u64>,
    /// Time of the most recent sword hit (ms)
    pub last_hit: Option<u64>,
    pub explode: bool,
}

impl Enemy {
    /// Create an enemy of `kind` with stats scaled for `wave`
    pub fn spawn(id: u32, kind: EnemyKind, pos: Vec2, wave: u32) -> Self {
        let a = kind.archetype();
        let speed = kind.speed_at_wave(wave);
        let hp = kind.hp_at_wave(wave);
        Self {
            id,
            kind,
            pos,
            size: a.size,
            speed,
            original_speed: speed,
            hp,
            max_hp: hp,
            color: a.color,
            points: a.points,
            frozen: false,
            frozen_since: None,
            last_hit: None,
            explode: a.explode,
        }
    }

    /// Splitter offspring
    pub fn mini(id: u32, pos: Vec2) -> Self {
        Self::spawn(id, EnemyKind::Mini, pos, 0)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Stop the enemy in place
    pub fn freeze(&mut self, now: u64) {
        // A second freeze must not overwrite the saved speed with zero
        if !self.frozen {
            self.original_speed = self.speed;
        }
        self.frozen = true;
        self.frozen_since = Some(now);
        self.speed = 0.0;
        self.color = FROZEN_COLOR;
    }

    /// Restore pre-freeze speed and color
    pub fn thaw(&mut self) {
        self.frozen = false;
        self.frozen_since = None;
        self.speed = self.original_speed;
        self.color = self.kind.archetype().color;
    }

    /// Health fraction for bars
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_five_normal_speed() {
        let expected = (1.2 + 5.0 * 0.08) * (1.0 + 5.0 * 0.03);
        assert!((EnemyKind::Normal.speed_at_wave(5) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_hp_scaling() {
        assert_eq!(EnemyKind::Normal.hp_at_wave(1), 1);
        assert_eq!(EnemyKind::Normal.hp_at_wave(4), 2);
        assert_eq!(EnemyKind::Bomber.hp_at_wave(8), 6);
        // Tank base hp grows with the wave as well
        assert_eq!(EnemyKind::Tank.hp_at_wave(3), 2);
        assert_eq!(EnemyKind::Tank.hp_at_wave(8), (2 + 2) * 3);
    }

    #[test]
    fn test_mini_stats_are_fixed() {
        for wave in [0, 1, 7, 40] {
            let m = Enemy::spawn(1, EnemyKind::Mini, Vec2::ZERO, wave);
            assert_eq!(m.speed, 2.5);
            assert_eq!(m.hp, 1);
            assert_eq!(m.size, 12.0);
            assert_eq!(m.points, 0);
        }
    }

    #[test]
    fn test_freeze_twice_keeps_original_speed() {
        let mut e = Enemy::spawn(1, EnemyKind::Fast, Vec2::ZERO, 3);
        let speed = e.speed;
        e.freeze(100);
        e.freeze(200);
        assert_eq!(e.speed, 0.0);
        assert_eq!(e.frozen_since, Some(200));
        e.thaw();
        assert_eq!(e.speed, speed);
        assert_eq!(e.color, 0xFF00FF);
    }
}
