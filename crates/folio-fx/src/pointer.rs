#![forbid(unsafe_code)]

//! Pointer-reactive transforms.
//!
//! Each effect maps pointer input (in viewport coordinates) plus the target
//! element's bounding rect to a CSS transform. Leaving the element restores
//! the identity pose.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::animation::CSS_EASE_OUT_QUAD;
use folio_core::geometry::{Bounds, Point, Size};

use crate::effect::{ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::style::{StyleDecl, Transform, TransformFn, Transition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub magnetic_strength: f64,
    pub magnetic_scale: f64,
    /// Pixels of pointer offset per degree of tilt.
    pub tilt_divisor: f64,
    pub tilt_perspective: f64,
    pub tilt_scale: f64,
    /// Fraction of the remaining gap the follower closes each frame.
    pub follower_lerp: f64,
    pub follower_hover_scale: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            magnetic_strength: 0.3,
            magnetic_scale: 1.05,
            tilt_divisor: 10.0,
            tilt_perspective: 1000.0,
            tilt_scale: 1.05,
            follower_lerp: 0.1,
            follower_hover_scale: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Magnetic
// ---------------------------------------------------------------------------

/// Pulls an element toward the pointer.
///
/// The bounding rect is cached and refreshed on resize, so moves do not force
/// layout.
#[derive(Debug, Clone)]
pub struct Magnetic {
    strength: f64,
    scale: f64,
    bounds: Bounds,
}

impl Magnetic {
    pub fn new(config: &PointerConfig, bounds: Bounds) -> Self {
        Self {
            strength: config.magnetic_strength,
            scale: config.magnetic_scale,
            bounds,
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn on_enter(&self) -> StyleDecl {
        StyleDecl::transition(&[
            Transition::new("transform", Duration::from_millis(300)).timing(CSS_EASE_OUT_QUAD)
        ])
    }

    pub fn on_move(&self, pointer: Point) -> Transform {
        let delta = pointer.offset_from(self.bounds.center());
        Transform::of(TransformFn::Translate(
            delta.x * self.strength,
            delta.y * self.strength,
        ))
        .then(TransformFn::Scale(self.scale))
    }

    pub fn on_leave(&self) -> Transform {
        Transform::of(TransformFn::Translate(0.0, 0.0)).then(TransformFn::Scale(1.0))
    }
}

// ---------------------------------------------------------------------------
// Tilt
// ---------------------------------------------------------------------------

/// 3D tilt toward the pointer.
#[derive(Debug, Clone, Copy)]
pub struct Tilt {
    divisor: f64,
    perspective: f64,
    scale: f64,
}

impl Tilt {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            divisor: if config.tilt_divisor == 0.0 {
                1.0
            } else {
                config.tilt_divisor
            },
            perspective: config.tilt_perspective,
            scale: config.tilt_scale,
        }
    }

    /// Rotation `(x_deg, y_deg)` for a pointer at `pointer` over `bounds`.
    pub fn angles(&self, pointer: Point, bounds: Bounds) -> (f64, f64) {
        let local = pointer.offset_from(Point::new(bounds.left(), bounds.top()));
        let cx = bounds.width / 2.0;
        let cy = bounds.height / 2.0;
        ((local.y - cy) / self.divisor, (cx - local.x) / self.divisor)
    }

    pub fn on_move(&self, pointer: Point, bounds: Bounds) -> Transform {
        let (rx, ry) = self.angles(pointer, bounds);
        self.pose(rx, ry, self.scale)
    }

    pub fn on_leave(&self) -> Transform {
        self.pose(0.0, 0.0, 1.0)
    }

    fn pose(&self, rx: f64, ry: f64, scale: f64) -> Transform {
        Transform::of(TransformFn::Perspective(self.perspective))
            .then(TransformFn::RotateX(rx))
            .then(TransformFn::RotateY(ry))
            .then(TransformFn::Scale3d(scale))
    }
}

// ---------------------------------------------------------------------------
// CursorFollower
// ---------------------------------------------------------------------------

/// A decorative dot that eases toward the pointer.
///
/// Each frame closes `lerp` of the remaining gap: a first-order exponential
/// tracking filter.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    position: Point,
    target: Point,
    lerp: f64,
    hover_scale: f64,
    hovering: bool,
    lifecycle: Lifecycle,
}

impl CursorFollower {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            position: Point::ZERO,
            target: Point::ZERO,
            lerp: config.follower_lerp.clamp(0.0, 1.0),
            hover_scale: config.follower_hover_scale,
            hovering: false,
            lifecycle: Lifecycle::Running,
        }
    }

    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// `left`/`top` for the current position.
    pub fn styles(&self) -> [StyleDecl; 2] {
        [
            StyleDecl::left_px(self.position.x),
            StyleDecl::top_px(self.position.y),
        ]
    }

    /// Pointer entered (`true`) or left an interactive element.
    pub fn hover(&mut self, on: bool) -> Transform {
        self.hovering = on;
        Transform::of(TransformFn::Scale(if on { self.hover_scale } else { 1.0 }))
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

impl Effect for CursorFollower {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}

impl ContinuousFx for CursorFollower {
    fn resize(&mut self, _size: Size) {}

    fn step(&mut self, _ctx: &FrameContext) {
        if self.is_active() {
            self.position = self.position.lerp(self.target, self.lerp);
        }
    }
}

// ---------------------------------------------------------------------------
// CardFlip
// ---------------------------------------------------------------------------

/// Click-to-flip card.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardFlip {
    flipped: bool,
}

impl CardFlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Styles applied once when the card is mounted.
    pub fn mount_styles(&self) -> [StyleDecl; 2] {
        [
            StyleDecl::new("transform-style", "preserve-3d"),
            StyleDecl::transition(&[Transition::new("transform", Duration::from_millis(600))]),
        ]
    }

    pub fn toggle(&mut self) -> Transform {
        self.flipped = !self.flipped;
        Transform::of(TransformFn::RotateY(if self.flipped { 180.0 } else { 0.0 }))
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cfg() -> PointerConfig {
        PointerConfig::default()
    }

    #[test]
    fn magnetic_pulls_toward_pointer() {
        let m = Magnetic::new(&cfg(), Bounds::new(100.0, 100.0, 200.0, 100.0));
        assert_eq!(
            m.on_move(Point::new(250.0, 130.0)).to_css(),
            "translate(15px, -6px) scale(1.05)"
        );
        assert_eq!(m.on_leave().to_css(), "translate(0px, 0px) scale(1)");
        assert_eq!(
            m.on_enter().value,
            "transform 0.3s cubic-bezier(0.25, 0.46, 0.45, 0.94)"
        );
    }

    #[test]
    fn magnetic_uses_refreshed_bounds() {
        let mut m = Magnetic::new(&cfg(), Bounds::new(0.0, 0.0, 100.0, 100.0));
        m.set_bounds(Bounds::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(
            m.on_move(Point::new(150.0, 50.0)).to_css(),
            "translate(0px, 0px) scale(1.05)"
        );
    }

    #[test]
    fn tilt_angles_from_top_left() {
        let t = Tilt::new(&cfg());
        let b = Bounds::new(50.0, 50.0, 200.0, 100.0);
        // Local (20, 90): rotateX = (90 - 50)/10, rotateY = (100 - 20)/10.
        assert_eq!(t.angles(Point::new(70.0, 140.0), b), (4.0, 8.0));
        assert_eq!(
            t.on_move(Point::new(150.0, 100.0), b).to_css(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale3d(1.05, 1.05, 1.05)"
        );
        assert_eq!(
            t.on_leave().to_css(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)"
        );
    }

    #[test]
    fn follower_closes_a_tenth_each_frame() {
        let mut f = CursorFollower::new(&cfg());
        f.set_target(Point::new(100.0, 200.0));
        let ctx = FrameContext::nth(1, Duration::from_millis(16));
        f.step(&ctx);
        assert_eq!(f.position(), Point::new(10.0, 20.0));
        f.step(&ctx);
        assert!((f.position().x - 19.0).abs() < 1e-9);
        for _ in 0..200 {
            f.step(&ctx);
        }
        assert!((f.position().x - 100.0).abs() < 1e-6);
    }

    #[test]
    fn follower_hover_scale() {
        let mut f = CursorFollower::new(&cfg());
        assert_eq!(f.hover(true).to_css(), "scale(2)");
        assert!(f.is_hovering());
        assert_eq!(f.hover(false).to_css(), "scale(1)");
    }

    #[test]
    fn card_flip_toggles() {
        let mut c = CardFlip::new();
        assert_eq!(c.toggle().to_css(), "rotateY(180deg)");
        assert_eq!(c.toggle().to_css(), "rotateY(0deg)");
        assert!(!c.is_flipped());
        let [style, transition] = c.mount_styles();
        assert_eq!(style.value, "preserve-3d");
        assert_eq!(transition.value, "transform 0.6s");
    }
}
