#![forbid(unsafe_code)]

//! Effect unit contracts.
//!
//! Every unit reports whether it is running and can be stopped. Units that
//! recompute state each frame additionally implement [`ContinuousFx`], and
//! those that paint a 2D surface implement [`CanvasFx`].
//!
//! Invariants:
//! - `step` on a stopped or disabled unit is a no-op.
//! - `resize` tolerates zero-sized inputs; implementations clamp to 1x1.
//! - `draw` never mutates simulation state, so a frame can be redrawn.

use std::time::Duration;

use folio_core::geometry::Size;

use crate::surface::Surface;

/// Run state of an effect unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Running,
    /// Stopped by the owner or by the unit's own lifetime.
    Stopped,
    /// Never started, typically because its target element was missing.
    Disabled,
}

impl Lifecycle {
    #[inline]
    pub fn is_active(self) -> bool {
        self == Self::Running
    }

    /// Transition to `Stopped`. A disabled unit stays disabled.
    #[inline]
    pub fn stop(&mut self) {
        if *self == Self::Running {
            *self = Self::Stopped;
        }
    }
}

/// Common surface of every effect unit.
pub trait Effect {
    /// Short, stable name used in log fields.
    fn name(&self) -> &'static str;

    fn is_active(&self) -> bool;

    /// Stop the unit. Idempotent.
    fn stop(&mut self);
}

/// Per-frame input handed to continuous animators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Frames stepped so far, starting at 0.
    pub frame: u64,
    /// Time since the unit was mounted.
    pub now: Duration,
    /// Time since the previous frame.
    pub dt: Duration,
}

impl FrameContext {
    pub const fn new(frame: u64, now: Duration, dt: Duration) -> Self {
        Self { frame, now, dt }
    }

    /// Context for the `n`th frame of a fixed-rate clock.
    pub fn nth(n: u64, interval: Duration) -> Self {
        let scale = u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            frame: n,
            now: interval.saturating_mul(scale),
            dt: if n == 0 { Duration::ZERO } else { interval },
        }
    }

    /// Milliseconds since mount, as `Date.now()`-style arithmetic expects.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now.as_secs_f64() * 1000.0
    }
}

/// A unit that recomputes its state once per frame.
pub trait ContinuousFx: Effect {
    /// The drawing area changed size.
    fn resize(&mut self, _size: Size) {}

    /// Advance one frame.
    fn step(&mut self, ctx: &FrameContext);
}

/// A continuous unit that paints onto a 2D surface.
pub trait CanvasFx: ContinuousFx {
    /// Paint the current state.
    fn draw(&self, surface: &mut dyn Surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent() {
        let mut l = Lifecycle::Running;
        l.stop();
        l.stop();
        assert_eq!(l, Lifecycle::Stopped);
        assert!(!l.is_active());
    }

    #[test]
    fn disabled_cannot_be_stopped_into_stopped() {
        let mut l = Lifecycle::Disabled;
        l.stop();
        assert_eq!(l, Lifecycle::Disabled);
    }

    #[test]
    fn nth_frame_context() {
        let ctx = FrameContext::nth(3, Duration::from_millis(33));
        assert_eq!(ctx.now, Duration::from_millis(99));
        assert_eq!(ctx.dt, Duration::from_millis(33));
        assert!((ctx.now_ms() - 99.0).abs() < 1e-9);
        assert_eq!(FrameContext::nth(0, Duration::from_millis(33)).dt, Duration::ZERO);
    }
}
