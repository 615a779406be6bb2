#![forbid(unsafe_code)]

//! Background canvases: the particle field and the matrix rain.

use folio_fx::matrix_rain::MatrixRain;
use folio_fx::particles::ParticleField;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use super::{CanvasUnit, Disabled, MountContext, failed};
use crate::dom;
use crate::frame_loop::Cadence;
use crate::page::MountedUnit;

pub(crate) const PARTICLE_CANVAS: &str = "#particle-canvas";
pub(crate) const MATRIX_CANVAS: &str = "#matrix-canvas";

fn canvas(selector: &str) -> Option<HtmlCanvasElement> {
    dom::query(selector)?.dyn_into::<HtmlCanvasElement>().ok()
}

pub(crate) fn mount_particles(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Some(target) = canvas(PARTICLE_CANVAS) else {
        return Box::new(Disabled("particles"));
    };
    let config = ctx.config.particles.clone();
    let rng = ctx.rng();
    match CanvasUnit::mount(
        target,
        Cadence::Frame,
        ctx.config.scroll.resize_debounce,
        move |size| ParticleField::new(config, size, rng),
        || {},
    ) {
        Ok(unit) => Box::new(unit),
        Err(err) => failed("particles", err),
    }
}

pub(crate) fn mount_matrix(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Some(target) = canvas(MATRIX_CANVAS) else {
        return Box::new(Disabled("matrix"));
    };
    let config = ctx.config.matrix.clone();
    let rng = ctx.rng();
    match CanvasUnit::mount(
        target,
        Cadence::Frame,
        ctx.config.scroll.resize_debounce,
        move |size| MatrixRain::new(config, size, rng),
        || {},
    ) {
        Ok(unit) => Box::new(unit),
        Err(err) => failed("matrix", err),
    }
}
