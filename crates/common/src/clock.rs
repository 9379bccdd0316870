//! Presentation clocks driving shot selection.
//!
//! A render pass is timed against a single monotonic elapsed-seconds source.
//! Two implementations exist:
//! - [`RenderClock`]: anchored to `Instant::now()` at capture start, for
//!   interactive/real-time drivers.
//! - [`FrameClock`]: derives elapsed time from a frame counter, for the
//!   off-line encode loop where each tick is exactly one output frame.
//!
//! Both feed the same timeline resolver, so real-time preview and batch
//! encode share all shot-selection logic.

use std::time::Instant;

/// Monotonic elapsed-time source for a render pass.
///
/// Never goes backward; `elapsed_secs` on a stopped clock keeps returning
/// the value at stop time.
#[derive(Debug, Clone)]
pub struct RenderClock {
    epoch: Instant,
    epoch_wall: String,
    stopped_at: Option<f64>,
}

impl RenderClock {
    /// Anchor a new clock to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
            stopped_at: None,
        }
    }

    /// Wall-clock time at render start (ISO 8601), for logs and reports.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Seconds elapsed since the render pass started.
    pub fn elapsed_secs(&self) -> f64 {
        match self.stopped_at {
            Some(frozen) => frozen,
            None => self.epoch.elapsed().as_secs_f64(),
        }
    }

    /// Freeze the clock. Subsequent reads return the stop-time value.
    pub fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(self.epoch.elapsed().as_secs_f64());
        }
    }

    /// Whether the clock has been frozen.
    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}

/// Deterministic frame-indexed clock for off-line rendering.
///
/// Tick `n` maps to `n / fps` seconds. Ticks are strictly sequential; no
/// tick is ever skipped, which gives the encode loop its exact frame count.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fps: u32,
    frame: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frame: 0,
        }
    }

    /// Elapsed seconds at the current frame.
    pub fn elapsed_secs(&self) -> f64 {
        self.frame as f64 / self.fps as f64
    }

    /// Current frame index.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds covered by one frame.
    pub fn frame_interval_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Advance one frame and return the new elapsed time.
    pub fn tick(&mut self) -> f64 {
        self.frame += 1;
        self.elapsed_secs()
    }

    /// Number of whole frames needed to cover `duration_secs`.
    pub fn frames_for(fps: u32, duration_secs: f64) -> u64 {
        (duration_secs * fps.max(1) as f64).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_clock_is_monotonic_and_freezes() {
        let mut clock = RenderClock::start();
        let a = clock.elapsed_secs();
        let b = clock.elapsed_secs();
        assert!(b >= a);

        clock.stop();
        let frozen = clock.elapsed_secs();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(clock.elapsed_secs(), frozen);
    }

    #[test]
    fn frame_clock_maps_frames_to_seconds() {
        let mut clock = FrameClock::new(30);
        assert_eq!(clock.elapsed_secs(), 0.0);
        assert!((clock.tick() - 1.0 / 30.0).abs() < 1e-12);
        for _ in 0..29 {
            clock.tick();
        }
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-9);
        assert_eq!(clock.frame(), 30);
    }

    #[test]
    fn frames_for_rounds_up_partial_frames() {
        assert_eq!(FrameClock::frames_for(30, 5.0), 150);
        assert_eq!(FrameClock::frames_for(30, 5.01), 151);
        assert_eq!(FrameClock::frames_for(30, 0.0), 0);
    }
}
