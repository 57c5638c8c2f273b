use std::collections::VecDeque;

use lucent_core::math::Vec2;

use super::{Transition, within_epsilon};

/// Displacements smaller than this are treated as "already there".
const POSITION_EPSILON: f32 = 0.001;

/// A relative move waiting behind the active transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedMove {
    pub dx: f32,
    pub dy: f32,
    pub duration_ms: i64,
}

/// A 2D coordinate that can glide toward a target.
///
/// At most one transition is active at a time. [`plot`](Self::plot) calls made
/// while one is running are queued and started, in order, relative to wherever
/// the previous move ended. [`assign`](Self::assign) is authoritative: it snaps,
/// cancels the active transition and drops the queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimatedPosition {
    x: f32,
    y: f32,
    transition: Option<Transition<2>>,
    queue: VecDeque<QueuedMove>,
}

impl AnimatedPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: sanitize(x),
            y: sanitize(y),
            ..Default::default()
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_translating(&self) -> bool {
        self.transition.is_some()
    }

    /// Target of the active transition, if any.
    pub fn target(&self) -> Option<Vec2> {
        self.transition
            .as_ref()
            .map(|t| Vec2::new(t.target[0], t.target[1]))
    }

    /// Milliseconds left on the active transition.
    pub fn remaining_ms(&self) -> i64 {
        self.transition.as_ref().map_or(0, |t| t.remaining_ms)
    }

    pub fn queued(&self) -> impl Iterator<Item = &QueuedMove> {
        self.queue.iter()
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Jump to `(x, y)`, cancelling any transition and queued moves.
    ///
    /// Non-finite coordinates are ignored.
    pub fn assign(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.x = x;
        self.y = y;
        self.transition = None;
        self.queue.clear();
    }

    /// Glide to `(target_x, target_y)` over `duration_ms`.
    ///
    /// A non-positive duration assigns immediately. Re-issuing the exact
    /// target and duration of the running transition leaves its progress
    /// untouched.
    pub fn translate(&mut self, target_x: f32, target_y: f32, duration_ms: i64) {
        if !target_x.is_finite() || !target_y.is_finite() {
            return;
        }
        if duration_ms <= 0 {
            self.assign(target_x, target_y);
            return;
        }

        let target = [target_x, target_y];
        if self
            .transition
            .as_ref()
            .is_some_and(|t| t.matches(&target, duration_ms))
        {
            return;
        }

        let from = [self.x, self.y];
        if within_epsilon(&from, &target, POSITION_EPSILON) && self.queue.is_empty() {
            self.transition = None;
            return;
        }

        self.transition = Some(Transition::new(from, target, duration_ms));
    }

    /// Move by `(dx, dy)` over `duration_ms`.
    ///
    /// Starts right away when idle; otherwise waits in the queue until the
    /// moves ahead of it complete.
    pub fn plot(&mut self, dx: f32, dy: f32, duration_ms: i64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if self.transition.is_none() {
            self.queue.clear();
            self.translate(self.x + dx, self.y + dy, duration_ms);
        } else {
            self.queue.push_back(QueuedMove {
                dx,
                dy,
                duration_ms,
            });
        }
    }

    /// Advance by `elapsed_ms`.
    ///
    /// Time left over after a transition completes is spent on the next queued
    /// move, so one long frame can drain several moves.
    pub fn update(&mut self, elapsed_ms: i64) {
        let mut remaining = elapsed_ms;
        while remaining > 0 {
            let Some(transition) = self.transition.as_mut() else {
                break;
            };

            let mut values = [self.x, self.y];
            let used = transition.advance(&mut values, remaining);
            self.x = values[0];
            self.y = values[1];
            remaining -= used;

            if transition.is_finished() {
                self.transition = None;
                self.start_next_queued();
            }
        }
    }

    fn start_next_queued(&mut self) {
        while let Some(next) = self.queue.pop_front() {
            if next.duration_ms <= 0 {
                self.x += next.dx;
                self.y += next.dy;
                continue;
            }

            let from = [self.x, self.y];
            let target = [self.x + next.dx, self.y + next.dy];
            if within_epsilon(&from, &target, POSITION_EPSILON) && self.queue.is_empty() {
                return;
            }
            // A zero-length move with more queued behind it acts as a pause.
            self.transition = Some(Transition::new(from, target, next.duration_ms));
            return;
        }
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_completes_exactly() {
        let mut pos = AnimatedPosition::default();
        pos.translate(100.0, 0.0, 1000);
        assert!(pos.is_translating());

        pos.update(1000);
        assert_eq!((pos.x(), pos.y()), (100.0, 0.0));
        assert!(!pos.is_translating());
    }

    #[test]
    fn test_update_never_overshoots() {
        let mut pos = AnimatedPosition::default();
        pos.translate(10.0, 0.0, 100);
        pos.update(150);
        assert_eq!((pos.x(), pos.y()), (10.0, 0.0));
    }

    #[test]
    fn test_negative_direction_clamps_at_target() {
        let mut pos = AnimatedPosition::new(50.0, 50.0);
        pos.translate(0.0, 10.0, 100);
        pos.update(60);
        assert!(pos.x() > 0.0 && pos.x() < 50.0);
        pos.update(60);
        assert_eq!((pos.x(), pos.y()), (0.0, 10.0));
    }

    #[test]
    fn test_queued_plots_drain_in_one_update() {
        let mut pos = AnimatedPosition::default();
        pos.plot(10.0, 0.0, 100);
        pos.plot(10.0, 0.0, 100);
        assert_eq!(pos.queued_len(), 1);

        pos.update(250);
        assert_eq!((pos.x(), pos.y()), (20.0, 0.0));
        assert_eq!(pos.queued_len(), 0);
        assert!(!pos.is_translating());
    }

    #[test]
    fn test_queued_plot_is_relative_to_reached_position() {
        let mut pos = AnimatedPosition::default();
        pos.plot(10.0, 0.0, 100);
        pos.plot(0.0, 5.0, 100);

        pos.update(100);
        assert_eq!((pos.x(), pos.y()), (10.0, 0.0));
        assert_eq!(pos.target(), Some(Vec2::new(10.0, 5.0)));

        pos.update(50);
        assert!((pos.y() - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_identical_translate_is_idempotent() {
        let mut pos = AnimatedPosition::default();
        pos.translate(50.0, 50.0, 500);
        pos.update(100);
        let remaining = pos.remaining_ms();

        pos.translate(50.0, 50.0, 500);
        assert_eq!(pos.remaining_ms(), remaining);

        pos.translate(50.0, 50.0, 500);
        pos.translate(50.0, 50.0, 500);
        assert_eq!(pos.remaining_ms(), 400);
    }

    #[test]
    fn test_assign_cancels_transition_and_queue() {
        let mut pos = AnimatedPosition::default();
        pos.plot(10.0, 0.0, 100);
        pos.plot(10.0, 0.0, 100);

        pos.assign(3.0, 4.0);
        assert!(!pos.is_translating());
        assert_eq!(pos.queued_len(), 0);

        pos.update(500);
        assert_eq!((pos.x(), pos.y()), (3.0, 4.0));
    }

    #[test]
    fn test_non_positive_duration_assigns() {
        let mut pos = AnimatedPosition::default();
        pos.translate(7.0, 8.0, 0);
        assert_eq!((pos.x(), pos.y()), (7.0, 8.0));
        assert!(!pos.is_translating());
    }

    #[test]
    fn test_tiny_displacement_goes_idle_without_moving() {
        let mut pos = AnimatedPosition::new(1.0, 1.0);
        pos.translate(1.0001, 1.0, 100);
        assert!(!pos.is_translating());
        assert_eq!(pos.x(), 1.0);
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut pos = AnimatedPosition::new(1.0, 2.0);
        pos.assign(f32::NAN, 0.0);
        pos.translate(f32::INFINITY, 0.0, 100);
        assert_eq!((pos.x(), pos.y()), (1.0, 2.0));
        assert!(!pos.is_translating());
    }
}
