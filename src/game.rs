//! Frame orchestrator
//!
//! Owns the live `GameState` and the collaborators. Each host frame runs the
//! interval tickers that are due, advances the simulation, routes events to
//! audio and storage, renders, and pushes HUD changes.

use glam::Vec2;
use serde::Serialize;

use crate::audio::{AudioCue, AudioMixer};
use crate::consts::*;
use crate::highscores::MemoryHighScore;
use crate::perf::PerfSampler;
use crate::platform::{AudioSink, HighScoreStore, HudSink, HudState, NullSink, RenderSink};
use crate::renderer::RenderFrame;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, TickInput};
use crate::tuning::Tuning;

/// Everything needed to start a run
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub seed: u64,
    pub arena: Vec2,
    pub tuning: Tuning,
    pub settings: Settings,
    /// Host exposes a performance-sampling API
    pub perf_available: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arena: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            tuning: Tuning::default(),
            settings: Settings::default(),
            perf_available: false,
        }
    }
}

/// Host-side collaborators
pub struct Collaborators {
    pub render: Box<dyn RenderSink>,
    pub audio: Box<dyn AudioSink>,
    pub hud: Box<dyn HudSink>,
    pub high_score: Box<dyn HighScoreStore>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            render: Box::new(NullSink),
            audio: Box::new(NullSink),
            hud: Box::new(NullSink),
            high_score: Box::new(MemoryHighScore::default()),
        }
    }
}

/// Fixed-period interval timer driven by host time.
///
/// Fires at most once per poll; missed periods are skipped, not replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    period: u64,
    next_due: u64,
}

impl Ticker {
    pub fn new(period: u64, start: u64) -> Self {
        Self {
            period,
            next_due: start + period,
        }
    }

    pub fn poll(&mut self, now: u64) -> bool {
        if now < self.next_due {
            return false;
        }
        let missed = (now - self.next_due) / self.period;
        self.next_due += (missed + 1) * self.period;
        true
    }

    pub fn next_due(&self) -> u64 {
        self.next_due
    }
}

/// Summary of a finished (or in-progress) run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub score: u64,
    pub wave: u32,
    pub survival_time: String,
    pub frames: u64,
    pub enemies_alive: usize,
    pub health: f32,
    pub high_score: u64,
    pub new_high_score: bool,
    pub game_over: bool,
}

/// Top-level game: simulation plus timers and collaborators
pub struct Game {
    config: GameConfig,
    state: GameState,
    sinks: Collaborators,
    mixer: AudioMixer,
    spawn_ticker: Ticker,
    perf: Option<(PerfSampler, Ticker)>,
    survival_ms: u64,
    last_frame_at: u64,
    high_score: u64,
    new_high_score: bool,
    last_hud: Option<HudState>,
}

impl Game {
    pub fn new(config: GameConfig, sinks: Collaborators, now: u64) -> Self {
        let state = GameState::new(config.seed, config.arena, config.tuning.clone(), now);
        let perf = if config.perf_available {
            Some((PerfSampler::starting_at(now), Ticker::new(PERF_PERIOD_MS, now)))
        } else {
            log::info!("Performance API unavailable, sampling disabled");
            None
        };
        let high_score = sinks.high_score.get_high_score();
        log::info!(
            "Starting run (seed {}, arena {}x{}, high score {high_score})",
            config.seed,
            config.arena.x,
            config.arena.y
        );
        Self {
            mixer: AudioMixer::from_settings(&config.settings),
            spawn_ticker: Ticker::new(config.tuning.spawn_period_ms, now),
            perf,
            survival_ms: 0,
            last_frame_at: now,
            high_score,
            new_high_score: false,
            last_hud: None,
            state,
            sinks,
            config,
        }
    }

    /// Run one host frame at `now` (ms)
    pub fn frame(&mut self, input: &TickInput, now: u64) {
        if self.spawn_ticker.poll(now) {
            sim::spawn_tick(&mut self.state);
        }

        let was_playing = self.state.phase == GamePhase::Playing;
        sim::tick(&mut self.state, input, now);

        if was_playing && !self.state.is_over() {
            self.survival_ms += now.saturating_sub(self.last_frame_at);
        }
        self.last_frame_at = now;

        self.dispatch_events();

        let drawn = !self.state.is_paused();
        if drawn {
            let frame = RenderFrame::capture(&self.state, &self.config.settings);
            self.sinks.render.draw(&frame);
        }

        // Sampling stops with the run
        let running = !self.state.is_over();
        if let Some((sampler, ticker)) = self.perf.as_mut().filter(|_| running) {
            if drawn {
                sampler.record_frame();
            }
            if ticker.poll(now) {
                sampler.sample(now);
            }
        }

        self.push_hud();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(cue) = AudioCue::for_event(&event) {
                if let Some(volume) = self.mixer.volume_for(cue) {
                    self.sinks.audio.play(cue, volume);
                }
            }
            match event {
                GameEvent::GameOver { score, wave } => self.on_game_over(score, wave),
                GameEvent::PowerupUsed { kind } => log::debug!("Powerup used: {}", kind.name()),
                _ => {}
            }
        }
    }

    fn on_game_over(&mut self, score: u64, wave: u32) {
        log::info!(
            "Run over: score {score}, wave {wave}, survived {}",
            crate::platform::format_survival(self.survival_secs())
        );
        if score > self.high_score {
            log::info!("New high score {score} (was {})", self.high_score);
            self.high_score = score;
            self.new_high_score = true;
            self.sinks.high_score.set_high_score(score);
        }
    }

    /// Current HUD values
    pub fn hud_state(&self) -> HudState {
        let s = &self.state;
        HudState {
            score: s.score,
            wave: s.wave,
            health_percent: s.player.health_fraction() * 100.0,
            stamina_percent: s.stamina.fraction() * 100.0,
            survival_secs: self.survival_secs(),
            fps: self
                .perf
                .as_ref()
                .filter(|_| self.config.settings.show_perf)
                .and_then(|(sampler, _)| sampler.fps()),
            paused: s.is_paused(),
            inventory_open: s.inventory_open,
            game_over: s.is_over(),
            new_high_score: self.new_high_score,
            high_score: self.high_score,
        }
    }

    fn push_hud(&mut self) {
        let hud = self.hud_state();
        if self.last_hud.as_ref() != Some(&hud) {
            self.sinks.hud.update(&hud);
            self.last_hud = Some(hud);
        }
    }

    /// Throw away the current run and start fresh
    pub fn restart(&mut self, seed: u64, now: u64) {
        self.config.seed = seed;
        self.state = GameState::new(seed, self.config.arena, self.config.tuning.clone(), now);
        self.spawn_ticker = Ticker::new(self.config.tuning.spawn_period_ms, now);
        if let Some(perf) = &mut self.perf {
            *perf = (PerfSampler::starting_at(now), Ticker::new(PERF_PERIOD_MS, now));
        }
        self.survival_ms = 0;
        self.last_frame_at = now;
        self.new_high_score = false;
        self.last_hud = None;
        log::info!("Run restarted (seed {seed})");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    pub fn survival_secs(&self) -> u64 {
        self.survival_ms / 1000
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.config.seed,
            score: self.state.score,
            wave: self.state.wave,
            survival_time: crate::platform::format_survival(self.survival_secs()),
            frames: self.state.frame,
            enemies_alive: self.state.enemies.len(),
            health: self.state.player.health,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            game_over: self.state.is_over(),
        }
    }
}
