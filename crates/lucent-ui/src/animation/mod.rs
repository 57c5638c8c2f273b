//! Time-driven values embedded in widgets.
//!
//! Both primitives interpolate linearly toward a target over a duration in
//! milliseconds and are advanced by `update(elapsed_ms)` once per frame:
//!
//! - [`AnimatedPosition`]: an `x`/`y` pair with a FIFO queue of relative moves.
//! - [`AnimatedColor`]: normalized RGBA with byte mirrors, blending, and a
//!   two-color oscillation.
//!
//! # Example
//!
//! ```
//! use lucent_ui::animation::AnimatedPosition;
//!
//! let mut pos = AnimatedPosition::new(0.0, 0.0);
//! pos.plot(10.0, 0.0, 100);
//! pos.plot(10.0, 0.0, 100);
//!
//! // One long frame drains both queued moves.
//! pos.update(250);
//! assert_eq!((pos.x(), pos.y()), (20.0, 0.0));
//! assert!(!pos.is_translating());
//! ```

mod color;
mod position;

pub use color::AnimatedColor;
pub use position::{AnimatedPosition, QueuedMove};

/// A single linear interpolation over `N` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transition<const N: usize> {
    pub target: [f32; N],
    /// Change per millisecond.
    pub delta: [f32; N],
    pub duration_ms: i64,
    pub remaining_ms: i64,
}

impl<const N: usize> Transition<N> {
    /// `duration_ms` must be positive.
    pub fn new(from: [f32; N], target: [f32; N], duration_ms: i64) -> Self {
        let mut delta = [0.0; N];
        for i in 0..N {
            delta[i] = (target[i] - from[i]) / duration_ms as f32;
        }
        Self {
            target,
            delta,
            duration_ms,
            remaining_ms: duration_ms,
        }
    }

    pub fn matches(&self, target: &[f32; N], duration_ms: i64) -> bool {
        self.target == *target && self.duration_ms == duration_ms
    }

    /// Advance `values` by at most `elapsed_ms`, returning the time consumed.
    ///
    /// Values never pass the target, and land exactly on it once the
    /// remaining duration is used up.
    pub fn advance(&mut self, values: &mut [f32; N], elapsed_ms: i64) -> i64 {
        let dt = elapsed_ms.min(self.remaining_ms).max(0);
        for i in 0..N {
            let next = values[i] + self.delta[i] * dt as f32;
            values[i] = if (self.delta[i] > 0.0 && next > self.target[i])
                || (self.delta[i] < 0.0 && next < self.target[i])
            {
                self.target[i]
            } else {
                next
            };
        }
        self.remaining_ms -= dt;
        if self.remaining_ms <= 0 {
            *values = self.target;
        }
        dt
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_ms <= 0
    }
}

/// True when every channel of `to` is within `epsilon` of `from`.
pub(crate) fn within_epsilon<const N: usize>(from: &[f32; N], to: &[f32; N], epsilon: f32) -> bool {
    from.iter().zip(to).all(|(a, b)| (a - b).abs() < epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_clamps_overshoot() {
        let mut t = Transition::new([0.0], [10.0], 100);
        let mut v = [0.0];
        let used = t.advance(&mut v, 150);
        assert_eq!(used, 100);
        assert_eq!(v, [10.0]);
        assert!(t.is_finished());
    }

    #[test]
    fn test_transition_partial_progress() {
        let mut t = Transition::new([0.0, 100.0], [100.0, 0.0], 1000);
        let mut v = [0.0, 100.0];
        t.advance(&mut v, 250);
        assert!((v[0] - 25.0).abs() < 1e-3);
        assert!((v[1] - 75.0).abs() < 1e-3);
        assert_eq!(t.remaining_ms, 750);
    }
}
