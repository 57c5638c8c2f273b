use std::time::{Duration, Instant};

use lucent_core::profiling::profile_function;

/// Frame timing for the UI loop.
///
/// Widget animation runs on integer milliseconds, so [`tick`](Self::tick)
/// hands back the scaled delta in whole milliseconds. Sub-millisecond
/// remainders carry over to the next frame instead of being dropped.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lucent::FrameClock;
///
/// let mut clock = FrameClock::new();
/// clock.set_time_scale(0.5);
/// assert_eq!(clock.advance(Duration::from_millis(40)), 20);
/// assert_eq!(clock.frame_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total unscaled time fed to the clock
    elapsed: Duration,
    /// Unscaled delta of the last frame, after the cap
    delta: Duration,
    frame_count: u64,
    /// Multiplier applied to deltas (1.0 = normal, 0.0 = paused)
    time_scale: f32,
    /// Cap on a single frame's delta, so a stall does not fast-forward animations
    max_delta: Duration,
    /// Scaled time not yet handed out as whole milliseconds
    carry_ms: f64,
    last_frame_time: Instant,
}

impl FrameClock {
    /// Creates a clock with a time scale of 1.0 and a 100ms delta cap.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
            time_scale: 1.0,
            max_delta: Duration::from_millis(100),
            carry_ms: 0.0,
            last_frame_time: Instant::now(),
        }
    }

    /// Measure the wall time since the previous tick and advance by it.
    pub fn tick(&mut self) -> i64 {
        profile_function!();
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(raw_delta)
    }

    /// Advance by an explicit delta, returning the scaled milliseconds to feed
    /// the widget tree.
    pub fn advance(&mut self, raw_delta: Duration) -> i64 {
        self.delta = raw_delta.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame_count += 1;

        self.carry_ms += self.delta.as_secs_f64() * 1000.0 * self.time_scale as f64;
        let whole = self.carry_ms.floor();
        self.carry_ms -= whole;
        whole as i64
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total unscaled time fed to the clock
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in milliseconds, suitable as an input timestamp.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the time scale. Negative values clamp to 0.0 (paused).
    #[inline]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    #[inline]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    pub fn set_max_delta(&mut self, max_delta: Duration) {
        self.max_delta = max_delta;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.time_scale = 0.0;
    }

    #[inline]
    pub fn resume(&mut self) {
        self.time_scale = 1.0;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.delta(), Duration::ZERO);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_measures_wall_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let ms = clock.tick();

        assert_eq!(clock.frame_count(), 1);
        assert!(ms >= 10);
        assert!(clock.delta() >= Duration::from_millis(10));
    }

    #[test]
    fn test_delta_is_capped() {
        let mut clock = FrameClock::new();
        clock.set_max_delta(Duration::from_millis(50));
        assert_eq!(clock.advance(Duration::from_millis(500)), 50);
        assert_eq!(clock.delta(), Duration::from_millis(50));
    }

    #[test]
    fn test_fractional_milliseconds_carry_over() {
        let mut clock = FrameClock::new();
        let frame = Duration::from_micros(16_667);
        let total: i64 = (0..3).map(|_| clock.advance(frame)).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert!(clock.is_paused());
        assert_eq!(clock.advance(Duration::from_millis(16)), 0);
        assert_eq!(clock.elapsed(), Duration::from_millis(16));

        clock.resume();
        assert_eq!(clock.advance(Duration::from_millis(16)), 16);
    }

    #[test]
    fn test_negative_scale_clamps() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(-2.0);
        assert_eq!(clock.time_scale(), 0.0);
    }
}
