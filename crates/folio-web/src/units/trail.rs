#![forbid(unsafe_code)]

//! Mouse trail drawn with a pool of fixed-position dots.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::color::Rgba;
use folio_fx::effect::{ContinuousFx, Effect};
use folio_fx::style::StyleDecl;
use folio_fx::trail::{MouseTrail, TrailSprite};
use web_sys::Element;

use super::{Clock, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;

const POINT_CLASS: &str = "mouse-trail-point";
const POINT_BASE_STYLE: &str = "position: fixed; border-radius: 50%; pointer-events: none; \
     z-index: 9999; transform: translate(-50%, -50%);";

struct Pool {
    color: Rgba,
    dots: Vec<Element>,
}

impl Pool {
    fn dot(&mut self, i: usize) -> Option<&Element> {
        while self.dots.len() <= i {
            let doc = dom::document().ok()?;
            let dot = doc.create_element("div").ok()?;
            dot.set_class_name(POINT_CLASS);
            dot.set_attribute("style", POINT_BASE_STYLE).ok()?;
            doc.body()?.append_child(&dot).ok()?;
            self.dots.push(dot);
        }
        self.dots.get(i)
    }

    fn render(&mut self, sprites: impl Iterator<Item = TrailSprite>) {
        let color = self.color;
        let mut shown = 0;
        for (i, sprite) in sprites.enumerate() {
            let Some(dot) = self.dot(i) else {
                break;
            };
            let fill = color.with_alpha(sprite.alpha);
            dom::apply_styles(
                dot,
                &[
                    StyleDecl::new("display", "block"),
                    StyleDecl::left_px(sprite.center.x),
                    StyleDecl::top_px(sprite.center.y),
                    StyleDecl::new("width", format!("{}px", sprite.diameter)),
                    StyleDecl::new("height", format!("{}px", sprite.diameter)),
                    StyleDecl::new(
                        "background",
                        format!("radial-gradient(circle, {fill} 0%, transparent 70%)"),
                    ),
                ],
            );
            shown = i + 1;
        }
        for dot in self.dots.iter().skip(shown) {
            dom::apply_styles(dot, &[StyleDecl::new("display", "none")]);
        }
    }

    fn clear(&mut self) {
        for dot in self.dots.drain(..) {
            dot.remove();
        }
    }
}

pub(crate) struct TrailUnit {
    trail: Rc<RefCell<MouseTrail>>,
    pool: Rc<RefCell<Pool>>,
    ticker: Ticker,
    listeners: Listeners,
}

pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let config = ctx.config.trail.clone();
    let pool = Rc::new(RefCell::new(Pool {
        color: config.color,
        dots: Vec::with_capacity(config.max_points),
    }));
    let trail = Rc::new(RefCell::new(MouseTrail::new(config)));

    let mut listeners = Listeners::new();
    if let Ok(doc) = dom::document() {
        let trail = trail.clone();
        listeners.on(doc.as_ref(), "mousemove", move |event| {
            if let Some(p) = dom::client_point(&event) {
                trail.borrow_mut().push(p);
            }
        });
    }

    let ticker = {
        let trail = trail.clone();
        let pool = pool.clone();
        let mut clock = Clock::new();
        Ticker::start(Cadence::Frame, move || {
            let mut trail = trail.borrow_mut();
            // Draw first so a fresh point shows at full life.
            pool.borrow_mut().render(trail.sprites());
            trail.step(&clock.next());
            trail.is_active()
        })
    };
    match ticker {
        Ok(ticker) => Box::new(TrailUnit {
            trail,
            pool,
            ticker,
            listeners,
        }),
        Err(err) => failed("trail", err),
    }
}

impl MountedUnit for TrailUnit {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running()
    }

    fn stop(&mut self) {
        self.ticker.stop();
        self.listeners.clear();
        self.trail.borrow_mut().stop();
        self.pool.borrow_mut().clear();
    }
}
