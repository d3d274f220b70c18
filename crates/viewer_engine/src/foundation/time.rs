//! Time management utilities

use std::time::{Duration, Instant};

/// Longest frame delta reported by [`FrameClock::tick`]
///
/// Window drags and debugger pauses block the loop; larger gaps are clamped
/// so a single stalled frame does not turn into a jump.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Per-frame clock for the main loop
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    delta: Duration,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a clock; the first tick measures from here
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            delta: Duration::ZERO,
            frames: 0,
        }
    }

    /// Mark the start of a frame and return its delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_tick).min(MAX_FRAME_DELTA);
        self.last_tick = now;
        self.frames += 1;
        self.delta.as_secs_f32()
    }

    /// Delta of the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Wall time since the clock was created
    pub fn running_time(&self) -> Duration {
        self.last_tick.saturating_duration_since(self.started)
    }

    /// Frames per second over the clock's whole run, 0 before any time passed
    pub fn average_fps(&self) -> f32 {
        let seconds = self.running_time().as_secs_f32();
        if seconds > 0.0 {
            self.frames as f32 / seconds
        } else {
            0.0
        }
    }
}

/// Simple stopwatch for measuring elapsed time
///
/// The engine uses one to report how long start-up took, from entering
/// `Engine::run` until the first frame is about to be drawn.
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Reset the stopwatch to zero
    pub fn reset(&mut self) {
        self.start_time = None;
        self.elapsed = Duration::ZERO;
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in whole milliseconds
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed().as_millis()
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_stopwatch_starts_stopped() {
        let stopwatch = Stopwatch::new();
        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_stopwatch_accumulates_across_runs() {
        let mut stopwatch = Stopwatch::start_new();
        thread::sleep(Duration::from_millis(5));
        stopwatch.stop();
        let first = stopwatch.elapsed();
        assert!(first >= Duration::from_millis(5));

        // Stopped: no further accumulation
        thread::sleep(Duration::from_millis(5));
        assert_eq!(stopwatch.elapsed(), first);

        stopwatch.start();
        thread::sleep(Duration::from_millis(5));
        stopwatch.stop();
        assert!(stopwatch.elapsed() >= first + Duration::from_millis(5));
    }

    #[test]
    fn test_stopwatch_reset() {
        let mut stopwatch = Stopwatch::start_new();
        thread::sleep(Duration::from_millis(2));
        stopwatch.reset();
        assert!(!stopwatch.is_running());
        assert_eq!(stopwatch.elapsed_millis(), 0);
    }

    #[test]
    fn test_frame_clock_counts_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.average_fps(), 0.0);

        let start = clock.last_tick;
        let delta = clock.tick_at(start + Duration::from_millis(20));
        clock.tick_at(start + Duration::from_millis(40));

        assert_relative_eq!(delta, 0.02, epsilon = 1e-6);
        assert_eq!(clock.frame_count(), 2);
        assert_relative_eq!(clock.average_fps(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_frame_clock_clamps_stalls() {
        let mut clock = FrameClock::new();
        let start = clock.last_tick;
        let delta = clock.tick_at(start + Duration::from_secs(3));
        assert_relative_eq!(delta, MAX_FRAME_DELTA.as_secs_f32());
        assert_relative_eq!(clock.delta_time(), 0.25);
    }
}
