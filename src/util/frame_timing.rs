//! Frame pacing and FPS smoothing.

use web_time::{Duration, Instant};

/// EMA weight given to the newest frame's FPS sample.
const FPS_SMOOTHING: f32 = 0.05;

/// Per-frame clock for the frame-loop drivers.
///
/// Tracks a smoothed FPS figure for display and, when a target rate is
/// set, tells the driver whether enough time has passed to tick again.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Minimum time between ticks (zero = unlimited).
    min_frame_duration: Duration,
    last_frame: Instant,
    /// Seconds between the two most recent ticks.
    last_delta: f32,
    smoothed_fps: f32,
    frames: u64,
}

impl FrameTiming {
    /// Create a timer capped at `target_fps` (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            last_delta: 0.0,
            smoothed_fps: 60.0,
            frames: 0,
        }
    }

    /// Whether the frame cap allows another tick yet.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record a finished tick.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;
    }

    fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        let frame_time = elapsed.as_secs_f32();
        self.last_delta = frame_time;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - FPS_SMOOTHING)
                + instant_fps * FPS_SMOOTHING;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Seconds between the two most recent ticks.
    #[must_use]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Ticks recorded so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
