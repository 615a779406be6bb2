#![forbid(unsafe_code)]

//! Abstract 2D drawing target.
//!
//! The browser implementation forwards to `CanvasRenderingContext2d`;
//! [`RecordingSurface`] captures the same calls as data for tests and
//! benchmarks.

use folio_core::color::Rgba;
use folio_core::geometry::{Bounds, Point, Size};

/// Immediate-mode 2D drawing calls used by canvas effects.
pub trait Surface {
    /// Current drawable size in CSS pixels.
    fn size(&self) -> Size;

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle. Translucent colours blend over what is
    /// already drawn, which is how the matrix trail fades.
    fn fill_rect(&mut self, bounds: Bounds, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba);

    /// Draw one glyph with its baseline-left at `at`, monospace `font_px`.
    fn fill_glyph(&mut self, glyph: char, at: Point, font_px: f64, color: Rgba);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        bounds: Bounds,
        color: Rgba,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba,
    },
    Glyph {
        glyph: char,
        at: Point,
        font_px: f64,
        color: Rgba,
    },
}

/// A [`Surface`] that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size: size.clamped(),
            ops: Vec::new(),
        }
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size.clamped();
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the recording empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Point, f64, &Rgba)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => Some((center, *radius, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeLine { .. }))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (char, &Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Glyph { glyph, at, .. } => Some((*glyph, at)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        self.ops.push(DrawOp::FillRect { bounds, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_glyph(&mut self, glyph: char, at: Point, font_px: f64, color: Rgba) {
        self.ops.push(DrawOp::Glyph {
            glyph,
            at,
            font_px,
            color,
        });
    }
}
