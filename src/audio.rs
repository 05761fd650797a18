//! Audio cue mixing
//!
//! The core never plays sound itself; it hands cues with a final volume to
//! the platform's audio sink.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Sword swing started
    Swing,
    /// Sword killed an enemy
    Hit,
    /// Bomber detonated
    Explosion,
    /// Powerup used
    Powerup,
    /// Run ended
    GameOver,
}

impl AudioCue {
    /// Per-cue base volume
    pub fn base_volume(self) -> f32 {
        match self {
            AudioCue::Swing => 0.3,
            AudioCue::Hit => 0.2,
            AudioCue::Explosion => 0.3,
            AudioCue::Powerup => 0.4,
            AudioCue::GameOver => 0.5,
        }
    }

    /// Cue triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Swing => Some(AudioCue::Swing),
            GameEvent::EnemyKilled { .. } => Some(AudioCue::Hit),
            GameEvent::Explosion { .. } => Some(AudioCue::Explosion),
            GameEvent::PowerupUsed { .. } => Some(AudioCue::Powerup),
            GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
            _ => None,
        }
    }
}

/// Applies master/sfx volume and mute to cues
#[derive(Debug, Clone)]
pub struct AudioMixer {
    volume: f32,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioMixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
        }
    }

    /// Final volume for a cue; `None` when it would be silent
    pub fn volume_for(&self, cue: AudioCue) -> Option<f32> {
        let vol = self.volume * cue.base_volume();
        (vol > 0.0).then_some(vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_scaling() {
        let mixer = AudioMixer::from_settings(&Settings {
            master_volume: 0.5,
            sfx_volume: 1.0,
            ..Default::default()
        });
        let vol = mixer.volume_for(AudioCue::GameOver).unwrap();
        assert!((vol - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_muted_is_silent() {
        let mixer = AudioMixer::from_settings(&Settings {
            muted: true,
            ..Default::default()
        });
        assert_eq!(mixer.volume_for(AudioCue::Swing), None);
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(AudioCue::for_event(&GameEvent::Swing), Some(AudioCue::Swing));
        // Blade overlap repeats every frame of a swing; only the kill is voiced
        assert_eq!(AudioCue::for_event(&GameEvent::EnemyHit { id: 1 }), None);
        let kill = GameEvent::EnemyKilled {
            id: 1,
            kind: crate::sim::EnemyKind::Normal,
            points: 1,
            pos: glam::Vec2::ZERO,
        };
        assert_eq!(AudioCue::for_event(&kill), Some(AudioCue::Hit));
        assert_eq!(
            AudioCue::for_event(&GameEvent::WaveAdvanced { wave: 2 }),
            None
        );
    }
}
