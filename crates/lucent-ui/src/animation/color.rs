use lucent_render::Color;
use lucent_render::color::{clamp_unit, unit_to_byte};

use super::{Transition, within_epsilon};

/// Smaller than half a byte step, so skipped transitions never change the bytes.
const COLOR_EPSILON: f32 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleStage {
    ToSecond,
    ToFirst,
    Delay,
}

/// Two-color oscillation driven by [`AnimatedColor::animate`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorCycle {
    first: [f32; 4],
    second: [f32; 4],
    half_ms: i64,
    repeat_delay_ms: i64,
    stage: CycleStage,
    delay_remaining_ms: i64,
}

/// An RGBA color that can transition and oscillate over time.
///
/// Channels are kept in `0.0..=1.0`; out-of-range input is clamped on every
/// mutation and the `u8` mirrors are recomputed each time, so the two views
/// never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedColor {
    values: [f32; 4],
    bytes: [u8; 4],
    transition: Option<Transition<4>>,
    cycle: Option<ColorCycle>,
}

impl AnimatedColor {
    pub fn new(color: Color) -> Self {
        let mut this = Self {
            values: [0.0; 4],
            bytes: [0; 4],
            transition: None,
            cycle: None,
        };
        this.set_values(color.to_array());
        this
    }

    pub fn r(&self) -> f32 {
        self.values[0]
    }

    pub fn g(&self) -> f32 {
        self.values[1]
    }

    pub fn b(&self) -> f32 {
        self.values[2]
    }

    pub fn a(&self) -> f32 {
        self.values[3]
    }

    /// Byte mirrors of the channels, `round(channel * 255)`.
    pub fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    pub fn rgb_bytes(&self) -> [u8; 3] {
        [self.bytes[0], self.bytes[1], self.bytes[2]]
    }

    pub fn alpha_byte(&self) -> u8 {
        self.bytes[3]
    }

    pub fn color(&self) -> Color {
        Color::from(self.values)
    }

    pub fn is_translating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.cycle.is_some()
    }

    /// Set the color immediately, stopping any transition or oscillation.
    pub fn assign(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.cycle = None;
        self.transition = None;
        self.set_values([r, g, b, a]);
    }

    pub fn assign_color(&mut self, color: Color) {
        self.assign(color.r, color.g, color.b, color.a);
    }

    /// Transition to the given channels over `duration_ms`, stopping any
    /// oscillation. Re-issuing the running target and duration is a no-op.
    pub fn translate(&mut self, r: f32, g: f32, b: f32, a: f32, duration_ms: i64) {
        self.cycle = None;
        self.begin_translate([r, g, b, a], duration_ms);
    }

    pub fn translate_color(&mut self, color: Color, duration_ms: i64) {
        self.translate(color.r, color.g, color.b, color.a, duration_ms);
    }

    /// Mix the current RGB toward `(r, g, b)` by `alpha` and assign the result.
    ///
    /// The alpha channel keeps its current value.
    pub fn blend(&mut self, r: f32, g: f32, b: f32, alpha: f32) {
        let alpha = clamp_unit(alpha);
        let given = [clamp_unit(r), clamp_unit(g), clamp_unit(b)];
        let mut mixed = [0.0; 3];
        for i in 0..3 {
            mixed[i] = self.values[i] * (1.0 - alpha) + given[i] * alpha;
        }
        self.assign(mixed[0], mixed[1], mixed[2], self.values[3]);
    }

    /// Oscillate `first -> second -> first`, pausing `repeat_delay_ms` between
    /// cycles. Each leg takes half of `duration_ms`.
    ///
    /// A non-positive duration just assigns `first`.
    pub fn animate(&mut self, first: Color, second: Color, duration_ms: i64, repeat_delay_ms: i64) {
        if duration_ms <= 0 {
            self.assign_color(first);
            return;
        }

        let first = clamp_all(first.to_array());
        let second = clamp_all(second.to_array());
        let half_ms = (duration_ms / 2).max(1);

        self.set_values(first);
        self.cycle = Some(ColorCycle {
            first,
            second,
            half_ms,
            repeat_delay_ms: repeat_delay_ms.max(0),
            stage: CycleStage::ToSecond,
            delay_remaining_ms: 0,
        });
        self.transition = Some(Transition::new(first, second, half_ms));
    }

    pub fn stop_animation(&mut self) {
        self.cycle = None;
    }

    /// Advance by `elapsed_ms`, carrying leftover time across oscillation legs.
    pub fn update(&mut self, elapsed_ms: i64) {
        let mut remaining = elapsed_ms;
        while remaining > 0 {
            if let Some(transition) = self.transition.as_mut() {
                remaining -= transition.advance(&mut self.values, remaining);
                if transition.is_finished() {
                    self.transition = None;
                    self.next_cycle_leg();
                }
                continue;
            }

            let Some(cycle) = self.cycle.as_mut() else {
                break;
            };
            if cycle.stage != CycleStage::Delay {
                break;
            }
            let used = remaining.min(cycle.delay_remaining_ms);
            cycle.delay_remaining_ms -= used;
            remaining -= used;
            if cycle.delay_remaining_ms <= 0 {
                cycle.stage = CycleStage::ToSecond;
                let (second, half) = (cycle.second, cycle.half_ms);
                self.transition = Some(Transition::new(self.values, second, half));
            }
        }
        self.set_values(self.values);
    }

    fn next_cycle_leg(&mut self) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        // Legs always get a transition, even between equal colors, so time keeps flowing.
        match cycle.stage {
            CycleStage::ToSecond => {
                cycle.stage = CycleStage::ToFirst;
                self.transition = Some(Transition::new(self.values, cycle.first, cycle.half_ms));
            }
            CycleStage::ToFirst if cycle.repeat_delay_ms > 0 => {
                cycle.stage = CycleStage::Delay;
                cycle.delay_remaining_ms = cycle.repeat_delay_ms;
            }
            CycleStage::ToFirst | CycleStage::Delay => {
                cycle.stage = CycleStage::ToSecond;
                self.transition = Some(Transition::new(self.values, cycle.second, cycle.half_ms));
            }
        }
    }

    fn begin_translate(&mut self, target: [f32; 4], duration_ms: i64) {
        let target = clamp_all(target);
        if duration_ms <= 0 {
            self.transition = None;
            self.set_values(target);
            return;
        }
        if self
            .transition
            .as_ref()
            .is_some_and(|t| t.matches(&target, duration_ms))
        {
            return;
        }
        if within_epsilon(&self.values, &target, COLOR_EPSILON) {
            self.transition = None;
            return;
        }
        self.transition = Some(Transition::new(self.values, target, duration_ms));
    }

    fn set_values(&mut self, values: [f32; 4]) {
        self.values = clamp_all(values);
        for (byte, value) in self.bytes.iter_mut().zip(self.values) {
            *byte = unit_to_byte(value);
        }
    }
}

impl Default for AnimatedColor {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl From<Color> for AnimatedColor {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

fn clamp_all(values: [f32; 4]) -> [f32; 4] {
    values.map(clamp_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_assign_clamps_channels_and_bytes() {
        let mut c = AnimatedColor::default();
        c.assign(2.0, -1.0, 0.5, 0.5);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1.0, 0.0, 0.5, 0.5));
        assert_eq!(c.bytes(), [255, 0, 128, 128]);
    }

    #[test]
    fn test_translate_reaches_target() {
        let mut c = AnimatedColor::new(Color::BLACK);
        c.translate(1.0, 1.0, 1.0, 1.0, 100);
        c.update(50);
        assert!(approx(c.r(), 0.5));
        c.update(80);
        assert_eq!(c.color(), Color::WHITE);
        assert!(!c.is_translating());
    }

    #[test]
    fn test_translate_clamps_target() {
        let mut c = AnimatedColor::new(Color::BLACK);
        c.translate(3.0, 0.0, 0.0, 1.0, 10);
        c.update(10);
        assert_eq!(c.r(), 1.0);
    }

    #[test]
    fn test_blend_keeps_alpha() {
        let mut c = AnimatedColor::new(Color::rgba(0.0, 0.0, 0.0, 0.4));
        c.blend(1.0, 1.0, 0.0, 0.25);
        assert!(approx(c.r(), 0.25));
        assert!(approx(c.g(), 0.25));
        assert!(approx(c.b(), 0.0));
        assert!(approx(c.a(), 0.4));
    }

    #[test]
    fn test_animate_cycles_between_colors() {
        let mut c = AnimatedColor::default();
        c.animate(Color::RED, Color::BLUE, 1000, 0);
        assert_eq!(c.color(), Color::RED);

        c.update(500);
        assert_eq!(c.color(), Color::BLUE);

        c.update(500);
        assert_eq!(c.color(), Color::RED);
        assert!(c.is_animating());
    }

    #[test]
    fn test_animate_waits_repeat_delay() {
        let mut c = AnimatedColor::default();
        c.animate(Color::RED, Color::BLUE, 1000, 200);

        c.update(1000);
        assert_eq!(c.color(), Color::RED);

        c.update(150);
        assert_eq!(c.color(), Color::RED);

        // 50ms of delay left, then 250ms into the next leg.
        c.update(300);
        assert!(approx(c.r(), 0.5));
        assert!(approx(c.b(), 0.5));
    }

    #[test]
    fn test_animate_equal_colors_does_not_spin() {
        let mut c = AnimatedColor::default();
        c.animate(Color::GREEN, Color::GREEN, 10, 0);
        c.update(10_000);
        assert_eq!(c.color(), Color::GREEN);
    }

    #[test]
    fn test_translate_stops_oscillation() {
        let mut c = AnimatedColor::default();
        c.animate(Color::RED, Color::BLUE, 1000, 0);
        c.translate_color(Color::GREEN, 100);
        assert!(!c.is_animating());
        c.update(1000);
        assert_eq!(c.color(), Color::GREEN);
    }

    #[test]
    fn test_animate_non_positive_duration_assigns() {
        let mut c = AnimatedColor::default();
        c.animate(Color::RED, Color::BLUE, 0, 0);
        assert_eq!(c.color(), Color::RED);
        assert!(!c.is_animating());
    }
}
