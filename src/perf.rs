//! Frame-rate sampling

/// Counts frames and reports FPS once per sampling period
#[derive(Debug, Clone, Default)]
pub struct PerfSampler {
    frames: u32,
    window_start: Option<u64>,
    fps: Option<u32>,
}

impl PerfSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampler whose first window opens at `now` (ms)
    pub fn starting_at(now: u64) -> Self {
        Self {
            window_start: Some(now),
            ..Self::default()
        }
    }

    /// Count one rendered frame
    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Close the current window at `now` (ms) and start the next one.
    /// Returns the FPS measured over the closed window.
    pub fn sample(&mut self, now: u64) -> Option<u32> {
        let start = self.window_start.replace(now);
        let frames = std::mem::take(&mut self.frames);
        let elapsed = now.saturating_sub(start?);
        if elapsed == 0 {
            return self.fps;
        }
        let fps = (frames as f64 * 1000.0 / elapsed as f64).round() as u32;
        self.fps = Some(fps);
        self.fps
    }

    /// Most recent measurement
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_only_opens_window() {
        let mut p = PerfSampler::new();
        p.record_frame();
        assert_eq!(p.sample(0), None);
    }

    #[test]
    fn test_started_sampler_reports_first_window() {
        let mut p = PerfSampler::starting_at(500);
        for _ in 0..30 {
            p.record_frame();
        }
        assert_eq!(p.sample(1500), Some(30));
    }

    #[test]
    fn test_fps_over_window() {
        let mut p = PerfSampler::new();
        p.sample(1000);
        for _ in 0..60 {
            p.record_frame();
        }
        assert_eq!(p.sample(2000), Some(60));
        for _ in 0..45 {
            p.record_frame();
        }
        assert_eq!(p.sample(3500), Some(30));
        assert_eq!(p.fps(), Some(30));
    }
}
