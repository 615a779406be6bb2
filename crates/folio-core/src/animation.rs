#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! Animations produce normalized `f32` progress values (0.0–1.0) and are
//! advanced explicitly with [`Animation::tick`]. Nothing here reads a clock:
//! the browser frame loop passes in the elapsed time, tests pass in fixed
//! steps, and both observe identical values.

pub mod stagger;

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in-out. Used for anchor smooth-scrolling.
///
/// `4t³` on the first half, mirrored on the second.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        (t - 1.0) * u * u + 1.0
    }
}

/// CSS `ease-out-quad`-like curve used by element transitions.
pub const CSS_EASE_OUT_QUAD: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;
}

fn nonzero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

fn progress_of(elapsed: Duration, duration: Duration) -> f32 {
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Elapsed time accumulates as [`Duration`] so repeated 16 ms ticks do not
/// drift.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and linear easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(progress_of(self.elapsed, self.duration))
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f64` between `from` and `to` over a duration.
///
/// [`Animation::value`] returns eased progress; [`Tween::current`] returns the
/// interpolated quantity (a scroll offset, a pixel width, a counter value).
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    fade: Fade,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            fade: Fade::new(duration),
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.fade = self.fade.easing(easing);
        self
    }

    /// Interpolated value at the current progress. Exactly `to` once complete.
    pub fn current(&self) -> f64 {
        if self.fade.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * f64::from(self.fade.value())
    }

    pub fn to(&self) -> f64 {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }

    fn value(&self) -> f32 {
        self.fade.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);
    const MS_500: Duration = Duration::from_millis(500);
    const SEC_1: Duration = Duration::from_secs(1);

    #[test]
    fn easing_endpoints() {
        for f in [linear as EasingFn, ease_in_out_cubic] {
            assert!(f(0.0).abs() < f32::EPSILON);
            assert!((f(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn ease_in_out_cubic_is_symmetric() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        let a = ease_in_out_cubic(0.25);
        let b = ease_in_out_cubic(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!((a - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn fade_midpoint_and_completion() {
        let mut fade = Fade::new(SEC_1);
        fade.tick(MS_500);
        assert!((fade.value() - 0.5).abs() < 0.01);
        assert!(!fade.is_complete());
        fade.tick(MS_500);
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_zero_duration_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let mut tween = Tween::new(120.0, 860.0, SEC_1).easing(ease_in_out_cubic);
        for _ in 0..70 {
            tween.tick(MS_16);
        }
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 860.0);
    }

    #[test]
    fn tween_downward() {
        let mut tween = Tween::new(1000.0, 0.0, SEC_1);
        tween.tick(MS_500);
        assert!((tween.current() - 500.0).abs() < 1.0);
    }
}
