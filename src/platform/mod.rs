//! Platform abstraction layer
//!
//! The core talks to the host through these collaborators:
//! - Render sink (one `RenderFrame` per frame)
//! - Audio sink (fire-and-forget cues)
//! - HUD sink (pushed when values change)
//! - High-score storage (a single number)

use serde::Serialize;

use crate::audio::AudioCue;
use crate::renderer::RenderFrame;

pub trait RenderSink {
    fn draw(&mut self, frame: &RenderFrame);
}

pub trait AudioSink {
    /// `volume` is final: master, sfx and mute are already applied
    fn play(&mut self, cue: AudioCue, volume: f32);
}

pub trait HudSink {
    fn update(&mut self, hud: &HudState);
}

pub trait HighScoreStore {
    fn get_high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);
}

/// Values shown on the HUD
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HudState {
    pub score: u64,
    pub wave: u32,
    /// 0-100
    pub health_percent: f32,
    /// 0-100
    pub stamina_percent: f32,
    /// Whole seconds survived
    pub survival_secs: u64,
    /// Only set when the host can sample performance
    pub fps: Option<u32>,
    pub paused: bool,
    pub inventory_open: bool,
    pub game_over: bool,
    /// Set on the game-over frame when the stored best was beaten
    pub new_high_score: bool,
    pub high_score: u64,
}

impl HudState {
    /// Survival time as `MM:SS`
    pub fn survival_label(&self) -> String {
        format_survival(self.survival_secs)
    }
}

/// Format whole seconds as `MM:SS`
pub fn format_survival(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _frame: &RenderFrame) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _cue: AudioCue, _volume: f32) {}
}

impl HudSink for NullSink {
    fn update(&mut self, _hud: &HudState) {}
}

/// Writes cues and HUD changes to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::trace!("Cue {cue:?} at {volume:.2}");
    }
}

impl HudSink for LogSink {
    fn update(&mut self, hud: &HudState) {
        log::debug!(
            "HUD score={} wave={} hp={:.0}% stamina={:.0}% time={}",
            hud.score,
            hud.wave,
            hud.health_percent,
            hud.stamina_percent,
            hud.survival_label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_survival() {
        assert_eq!(format_survival(0), "00:00");
        assert_eq!(format_survival(65), "01:05");
        assert_eq!(format_survival(3600), "60:00");
    }
}
