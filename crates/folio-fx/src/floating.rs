#![forbid(unsafe_code)]

//! Lissajous drift for decorative elements.
//!
//! Element `i` bobs vertically at its own frequency and sways horizontally at
//! half that frequency and half the amplitude, so neighbouring elements never
//! move in lockstep.

use std::f64::consts::PI;

use folio_core::geometry::Point;

use crate::effect::{ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::style::{Transform, TransformFn};

/// Motion parameters for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    /// Peak vertical offset in px.
    pub amplitude: f64,
    /// Radians per millisecond.
    pub frequency: f64,
    pub phase: f64,
}

impl FloatParams {
    /// Parameters for the element at `index` in document order.
    pub fn for_index(index: usize) -> Self {
        let i = index as f64;
        Self {
            amplitude: 20.0 + 5.0 * i,
            frequency: 0.02 + 0.01 * i,
            phase: i * PI / 3.0,
        }
    }

    /// Offset at `t_ms` milliseconds.
    pub fn offset(&self, t_ms: f64) -> Point {
        let t = t_ms * self.frequency;
        Point::new(
            (t * 0.5 + self.phase).cos() * self.amplitude * 0.5,
            (t + self.phase).sin() * self.amplitude,
        )
    }
}

/// Drives a set of floating elements from a shared clock.
#[derive(Debug, Clone)]
pub struct FloatingMotion {
    params: Vec<FloatParams>,
    offsets: Vec<Point>,
    lifecycle: Lifecycle,
}

impl FloatingMotion {
    pub fn new(count: usize) -> Self {
        let params: Vec<_> = (0..count).map(FloatParams::for_index).collect();
        let offsets = params.iter().map(|p| p.offset(0.0)).collect();
        Self {
            params,
            offsets,
            lifecycle: if count == 0 {
                Lifecycle::Disabled
            } else {
                Lifecycle::Running
            },
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// `translate(x, y)` per element, in element order.
    pub fn transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.offsets
            .iter()
            .map(|o| Transform::of(TransformFn::Translate(o.x, o.y)))
    }
}

impl Effect for FloatingMotion {
    fn name(&self) -> &'static str {
        "floating"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}

impl ContinuousFx for FloatingMotion {
    fn step(&mut self, ctx: &FrameContext) {
        if !self.is_active() {
            return;
        }
        let t = ctx.now_ms();
        for (offset, params) in self.offsets.iter_mut().zip(&self.params) {
            *offset = params.offset(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn params_by_index() {
        let p = FloatParams::for_index(2);
        assert_eq!(p.amplitude, 30.0);
        assert!((p.frequency - 0.04).abs() < 1e-12);
        assert!((p.phase - 2.0 * PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn first_element_at_time_zero() {
        let o = FloatParams::for_index(0).offset(0.0);
        assert!((o.x - 10.0).abs() < 1e-12);
        assert!(o.y.abs() < 1e-12);
    }

    #[test]
    fn offsets_stay_within_amplitude() {
        let p = FloatParams::for_index(3);
        for ms in (0..10_000).step_by(37) {
            let o = p.offset(f64::from(ms));
            assert!(o.x.abs() <= p.amplitude * 0.5 + 1e-9);
            assert!(o.y.abs() <= p.amplitude + 1e-9);
        }
    }

    #[test]
    fn step_updates_all_elements() {
        let mut motion = FloatingMotion::new(3);
        motion.step(&FrameContext::new(1, Duration::from_millis(500), Duration::from_millis(16)));
        for (i, o) in motion.offsets().iter().enumerate() {
            assert_eq!(*o, FloatParams::for_index(i).offset(500.0));
        }
        assert_eq!(motion.transforms().count(), 3);
    }

    #[test]
    fn empty_set_is_disabled() {
        assert!(!FloatingMotion::new(0).is_active());
    }
}
