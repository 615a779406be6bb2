#![forbid(unsafe_code)]

//! Connected particle field.
//!
//! A fixed population of dots drifts across the canvas, bouncing off the
//! edges. Every pair closer than the connection distance is joined by a line
//! whose opacity falls off linearly with distance.
//!
//! # Invariants
//!
//! 1. After [`ParticleField::step`] every particle lies in `[0, w] x [0, h]`.
//! 2. A velocity component flips sign only on the axis that overflowed.
//! 3. [`connection_opacity`] is `0` at and beyond the threshold and strictly
//!    decreasing below it.
//!
//! # Cost
//!
//! Connection lines are O(n²) per frame; at the default 50 particles that is
//! 1225 distance checks.

use serde::{Deserialize, Serialize};

use folio_core::color::Rgba;
use folio_core::geometry::{Point, Size};
use folio_core::rng::FxRng;

use crate::effect::{CanvasFx, ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::surface::Surface;

/// What happens to existing state when the surface is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Keep state, clamping positions into the new bounds.
    #[default]
    Preserve,
    /// Discard state and respawn.
    Reset,
}

/// Largest `count` a page configuration may ask for.
pub const MAX_PARTICLES: usize = 10_000;

/// Particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Radius is `rand * size + 1`.
    pub size: f64,
    /// Each velocity component is `(rand - 0.5) * speed`.
    pub speed: f64,
    pub color: Rgba,
    pub connection_distance: f64,
    /// Line alpha is `connection_opacity * line_alpha`.
    pub line_alpha: f32,
    pub line_width: f64,
    pub resize_policy: ResizePolicy,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            size: 2.0,
            speed: 1.0,
            color: Rgba::ACCENT_BLUE,
            connection_distance: 100.0,
            line_alpha: 0.3,
            line_width: 0.5,
            resize_policy: ResizePolicy::Preserve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Particle {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move one step, reflect off the edges of `size`, and clamp inside.
    ///
    /// The reflection test uses the unclamped position, so a particle that
    /// lands exactly on an edge keeps its velocity.
    pub fn advance(&mut self, size: Size) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 || self.x > size.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > size.height {
            self.vy = -self.vy;
        }
        self.x = self.x.clamp(0.0, size.width);
        self.y = self.y.clamp(0.0, size.height);
    }
}

/// Opacity of the line joining two particles `distance` apart.
///
/// `1 - d/t` below the threshold, `0` at or beyond it.
#[inline]
pub fn connection_opacity(distance: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 || distance.is_nan() || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// A line between particles `a` and `b` with its opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// The connected particle field.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    size: Size,
    rng: FxRng,
    lifecycle: Lifecycle,
}

impl ParticleField {
    /// `config.count` is capped at [`MAX_PARTICLES`].
    pub fn new(mut config: ParticleConfig, size: Size, rng: FxRng) -> Self {
        config.count = config.count.min(MAX_PARTICLES);
        let mut field = Self {
            particles: Vec::with_capacity(config.count),
            config,
            size: size.clamped(),
            rng,
            lifecycle: Lifecycle::Running,
        };
        field.spawn_all();
        tracing::debug!(unit = "particles", count = field.particles.len(), "particle field ready");
        field
    }

    /// Field from explicit particles, for tests and replays.
    pub fn from_particles(config: ParticleConfig, size: Size, particles: Vec<Particle>) -> Self {
        Self {
            config,
            particles,
            size: size.clamped(),
            rng: FxRng::default(),
            lifecycle: Lifecycle::Running,
        }
    }

    fn spawn_all(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    fn spawn(&mut self) -> Particle {
        let rng = &mut self.rng;
        Particle {
            x: rng.next_f64() * self.size.width,
            y: rng.next_f64() * self.size.height,
            vx: (rng.next_f64() - 0.5) * self.config.speed,
            vy: (rng.next_f64() - 0.5) * self.config.speed,
            radius: rng.next_f64() * self.config.size + 1.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// All pairs currently close enough to be joined.
    pub fn connections(&self) -> Vec<Connection> {
        let threshold = self.config.connection_distance;
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let opacity = connection_opacity(a.position().distance(b.position()), threshold);
                if opacity > 0.0 {
                    out.push(Connection { a: i, b: j, opacity });
                }
            }
        }
        out
    }
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}

impl ContinuousFx for ParticleField {
    fn resize(&mut self, size: Size) {
        self.size = size.clamped();
        match self.config.resize_policy {
            ResizePolicy::Preserve => {
                for p in &mut self.particles {
                    p.x = p.x.clamp(0.0, self.size.width);
                    p.y = p.y.clamp(0.0, self.size.height);
                }
            }
            ResizePolicy::Reset => self.spawn_all(),
        }
    }

    fn step(&mut self, _ctx: &FrameContext) {
        if !self.is_active() {
            return;
        }
        let size = self.size;
        for p in &mut self.particles {
            p.advance(size);
        }
    }
}

impl CanvasFx for ParticleField {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        let color = self.config.color;
        for c in self.connections() {
            let (a, b) = (&self.particles[c.a], &self.particles[c.b]);
            let alpha = c.opacity as f32 * self.config.line_alpha * color.a;
            surface.stroke_line(
                a.position(),
                b.position(),
                self.config.line_width,
                color.with_alpha(alpha),
            );
        }
        for p in &self.particles {
            surface.fill_circle(p.position(), p.radius, color);
        }
    }
}
