#![forbid(unsafe_code)]

//! 2D canvas implementation of [`Surface`].

use std::f64::consts::TAU;

use folio_core::color::Rgba;
use folio_core::geometry::{Bounds, Point, Size};
use folio_fx::surface::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    font_px: Option<f64>,
}

impl CanvasSurface {
    pub(crate) fn attach(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self {
            canvas,
            ctx,
            font_px: None,
        })
    }

    /// Set the backing store size; this also clears the canvas.
    pub(crate) fn fit(&mut self, size: Size) {
        let size = size.clamped();
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
        // Resizing resets the context state, font included.
        self.font_px = None;
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_glyph(&mut self, glyph: char, at: Point, font_px: f64, color: Rgba) {
        if self.font_px != Some(font_px) {
            self.ctx.set_font(&format!("{font_px}px monospace"));
            self.font_px = Some(font_px);
        }
        self.ctx.set_fill_style_str(&color.to_css());
        let mut buf = [0u8; 4];
        let _ = self.ctx.fill_text(glyph.encode_utf8(&mut buf), at.x, at.y);
    }
}
