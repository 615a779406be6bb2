#![forbid(unsafe_code)]

//! Matrix digital rain.
//!
//! One drop per 14 px column. Each frame the surface is veiled with a
//! translucent black rectangle (so earlier glyphs fade into a trail), one
//! random glyph is printed at every drop, and drops that have passed the
//! bottom restart at the top with a small probability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::color::Rgba;
use folio_core::geometry::{Bounds, Point, Size};
use folio_core::rng::FxRng;

use crate::config::millis_opt;
use crate::effect::{CanvasFx, ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::particles::ResizePolicy;
use crate::surface::Surface;

/// Glyphs the rain draws from.
pub const MATRIX_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '@', '#', '$', '%', '^', '&', '*', '(', ')',
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub font_px: f64,
    pub glyph_color: Rgba,
    /// Veil painted over the whole surface before each frame.
    pub fade_color: Rgba,
    /// Chance per frame that a drop past the bottom restarts.
    pub reset_chance: f64,
    /// Stop after this long. `None` runs until stopped.
    #[serde(with = "millis_opt")]
    pub lifetime: Option<Duration>,
    pub resize_policy: ResizePolicy,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            font_px: 14.0,
            glyph_color: Rgba::MATRIX_GREEN,
            fade_color: Rgba::BLACK.with_alpha(0.05),
            reset_chance: 0.025,
            lifetime: None,
            resize_policy: ResizePolicy::Preserve,
        }
    }
}

impl MatrixConfig {
    /// The Konami easter-egg variant: runs for ten seconds.
    pub fn easter_egg() -> Self {
        Self {
            lifetime: Some(Duration::from_secs(10)),
            ..Self::default()
        }
    }
}

/// Number of columns for a surface width; never zero.
pub fn column_count(width: f64, font_px: f64) -> usize {
    if font_px.is_nan() || font_px <= 0.0 || !width.is_finite() {
        return 1;
    }
    ((width / font_px).floor() as usize).max(1)
}

#[derive(Debug, Clone)]
pub struct MatrixRain {
    config: MatrixConfig,
    size: Size,
    /// Row index (in glyph heights) of each column's drop.
    drops: Vec<u32>,
    /// Glyphs chosen by the last step, one per column, with their row.
    frame: Vec<(char, u32)>,
    rng: FxRng,
    lifecycle: Lifecycle,
}

impl MatrixRain {
    pub fn new(config: MatrixConfig, size: Size, rng: FxRng) -> Self {
        let size = size.clamped();
        let columns = column_count(size.width, config.font_px);
        tracing::debug!(unit = "matrix", columns, "matrix rain ready");
        Self {
            config,
            size,
            drops: vec![1; columns],
            frame: Vec::with_capacity(columns),
            rng,
            lifecycle: Lifecycle::Running,
        }
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }
}

impl Effect for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}

impl ContinuousFx for MatrixRain {
    fn resize(&mut self, size: Size) {
        self.size = size.clamped();
        let columns = column_count(self.size.width, self.config.font_px);
        match self.config.resize_policy {
            ResizePolicy::Preserve => self.drops.resize(columns, 1),
            ResizePolicy::Reset => self.drops = vec![1; columns],
        }
        self.frame.clear();
    }

    fn step(&mut self, ctx: &FrameContext) {
        if !self.is_active() {
            return;
        }
        if let Some(lifetime) = self.config.lifetime
            && ctx.now >= lifetime
        {
            tracing::debug!(unit = "matrix", "lifetime elapsed");
            self.stop();
            self.frame.clear();
            return;
        }
        let font = self.config.font_px;
        self.frame.clear();
        for drop in &mut self.drops {
            let glyph = self.rng.pick(MATRIX_ALPHABET).copied().unwrap_or('0');
            self.frame.push((glyph, *drop));
            if f64::from(*drop) * font > self.size.height
                && self.rng.chance(self.config.reset_chance)
            {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }
}

impl CanvasFx for MatrixRain {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Bounds::from_size(self.size), self.config.fade_color);
        let font = self.config.font_px;
        for (i, (glyph, row)) in self.frame.iter().enumerate() {
            let at = Point::new(i as f64 * font, f64::from(*row) * font);
            surface.fill_glyph(*glyph, at, font, self.config.glyph_color);
        }
    }
}
