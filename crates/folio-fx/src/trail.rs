#![forbid(unsafe_code)]

//! Pointer trail.
//!
//! Pointer positions are queued with full life; every frame each point loses
//! a fixed amount of life and dead points drop out. Older points are drawn
//! larger and the queue is bounded, evicting the oldest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use folio_core::color::Rgba;
use folio_core::geometry::{Point, Size};

use crate::effect::{CanvasFx, ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::surface::Surface;

/// Largest `max_points` a page configuration may ask for.
pub const MAX_TRAIL_POINTS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub max_points: usize,
    /// Life lost per frame.
    pub decay: f32,
    /// Sprite diameter of the oldest point.
    pub base_diameter: f64,
    /// Diameter lost per position in the queue.
    pub shrink: f64,
    pub color: Rgba,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: 20,
            decay: 0.05,
            base_diameter: 10.0,
            shrink: 0.5,
            color: Rgba::ACCENT_BLUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Point,
    /// Remaining life in `(0, 1]`.
    pub life: f32,
}

/// A drawable trail sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSprite {
    pub center: Point,
    pub diameter: f64,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct MouseTrail {
    config: TrailConfig,
    points: VecDeque<TrailPoint>,
    lifecycle: Lifecycle,
}

impl MouseTrail {
    /// `config.max_points` is capped at [`MAX_TRAIL_POINTS`].
    pub fn new(mut config: TrailConfig) -> Self {
        config.max_points = config.max_points.min(MAX_TRAIL_POINTS);
        Self {
            points: VecDeque::with_capacity(config.max_points.saturating_add(1)),
            config,
            lifecycle: Lifecycle::Running,
        }
    }

    /// Record a pointer position at full life.
    pub fn push(&mut self, position: Point) {
        if !self.is_active() || self.config.max_points == 0 {
            return;
        }
        self.points.push_back(TrailPoint {
            position,
            life: 1.0,
        });
        while self.points.len() > self.config.max_points {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sprites oldest first; sprite `i` has diameter `base - i * shrink`.
    pub fn sprites(&self) -> impl Iterator<Item = TrailSprite> + '_ {
        self.points.iter().enumerate().map(|(i, p)| TrailSprite {
            center: p.position,
            diameter: (self.config.base_diameter - i as f64 * self.config.shrink).max(0.0),
            alpha: p.life,
        })
    }
}

impl Default for MouseTrail {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl Effect for MouseTrail {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
        self.points.clear();
    }
}

impl ContinuousFx for MouseTrail {
    fn resize(&mut self, _size: Size) {}

    fn step(&mut self, _ctx: &FrameContext) {
        let decay = self.config.decay;
        for p in &mut self.points {
            p.life -= decay;
        }
        self.points.retain(|p| p.life > 0.0);
    }
}

impl CanvasFx for MouseTrail {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for sprite in self.sprites() {
            surface.fill_circle(
                sprite.center,
                sprite.diameter / 2.0,
                self.config.color.with_alpha(sprite.alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn frame() -> FrameContext {
        FrameContext::nth(1, Duration::from_millis(16))
    }

    #[test]
    fn bounded_queue_evicts_oldest() {
        let mut trail = MouseTrail::default();
        for i in 0..25 {
            trail.push(Point::new(f64::from(i), 0.0));
        }
        assert_eq!(trail.len(), 20);
        assert_eq!(trail.points().next().map(|p| p.position.x), Some(5.0));
    }

    #[test]
    fn oversized_queue_is_capped() {
        let mut trail = MouseTrail::new(TrailConfig {
            max_points: usize::MAX,
            ..TrailConfig::default()
        });
        for i in 0..1_200 {
            trail.push(Point::new(f64::from(i), 0.0));
        }
        assert_eq!(trail.len(), MAX_TRAIL_POINTS);
    }

    #[test]
    fn points_die_after_twenty_frames() {
        let mut trail = MouseTrail::default();
        trail.push(Point::new(1.0, 1.0));
        for _ in 0..19 {
            trail.step(&frame());
        }
        assert_eq!(trail.len(), 1);
        assert!(trail.points().all(|p| p.life > 0.0 && p.life <= 1.0));
        trail.step(&frame());
        trail.step(&frame());
        assert!(trail.is_empty());
    }

    #[test]
    fn sprite_sizes_shrink_along_queue() {
        let mut trail = MouseTrail::default();
        for i in 0..20 {
            trail.push(Point::new(f64::from(i), 0.0));
        }
        let diameters: Vec<f64> = trail.sprites().map(|s| s.diameter).collect();
        assert_eq!(diameters[0], 10.0);
        assert_eq!(diameters[1], 9.5);
        assert_eq!(diameters[19], 0.5);
    }

    #[test]
    fn draw_uses_life_as_alpha() {
        let mut trail = MouseTrail::default();
        trail.push(Point::new(3.0, 4.0));
        trail.step(&frame());
        let mut surface = crate::surface::RecordingSurface::new(Size::new(10.0, 10.0));
        trail.draw(&mut surface);
        let (center, radius, color) = surface.circles().next().expect("one sprite");
        assert_eq!(*center, Point::new(3.0, 4.0));
        assert_eq!(radius, 5.0);
        assert!((color.a - 0.95).abs() < 1e-6);
    }

    #[test]
    fn stopped_trail_ignores_input() {
        let mut trail = MouseTrail::default();
        trail.push(Point::ZERO);
        trail.stop();
        trail.push(Point::ZERO);
        assert!(trail.is_empty());
    }
}
