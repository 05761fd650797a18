//! Sword Arena - headless native runner
//!
//! Plays one seeded session with the autopilot and prints a JSON summary.
//!
//! Usage: sword-arena [seed] [max-seconds] [tuning.json]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sword_arena::autopilot::Autopilot;
    use sword_arena::game::Collaborators;
    use sword_arena::highscores::FileHighScore;
    use sword_arena::platform::{LogSink, NullSink};
    use sword_arena::{Game, GameConfig, Settings, Tuning};

    /// Simulated frame interval (ms), roughly 60 FPS
    const FRAME_MS: u64 = 16;

    sword_arena::init_logging();
    log::info!("Sword Arena (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);
    let max_secs: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(300);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Rejected tuning file {path} ({e}), using defaults");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let config = GameConfig {
        seed,
        tuning,
        settings: Settings::load(),
        perf_available: true,
        ..Default::default()
    };
    let sinks = Collaborators {
        render: Box::new(NullSink),
        audio: Box::new(LogSink),
        hud: Box::new(LogSink),
        high_score: Box::new(FileHighScore::new(
            std::env::temp_dir().join("sword_arena_high_score.json"),
        )),
    };

    let mut game = Game::new(config, sinks, 0);
    let mut pilot = Autopilot::new();
    let mut now = 0;
    while !game.is_over() && now < max_secs * 1000 {
        now += FRAME_MS;
        let input = pilot.next_input(game.state());
        game.frame(&input, now);
    }

    let summary = game.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Failed to encode run summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library and drives `Game::frame` itself
}
