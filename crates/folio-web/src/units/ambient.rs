#![forbid(unsafe_code)]

//! Floating dots appended to the particles container.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use folio_fx::ambient::{AmbientEmitter, AmbientEvent};
use folio_fx::effect::{ContinuousFx, Effect};
use web_sys::Element;

use super::{Clock, Disabled, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::page::MountedUnit;

const CONTAINER: &str = ".particles-container";
const DOT_CLASS: &str = "particle";
const POLL: Duration = Duration::from_millis(100);

struct Dots {
    container: Element,
    live: HashMap<u64, Element>,
}

impl Dots {
    fn apply(&mut self, events: Vec<AmbientEvent>) {
        for event in events {
            match event {
                AmbientEvent::Spawn(particle) => {
                    let Ok(dot) = dom::document().and_then(|doc| doc.create_element("div")) else {
                        continue;
                    };
                    dot.set_class_name(DOT_CLASS);
                    dom::apply_styles(&dot, &particle.styles());
                    if self.container.append_child(&dot).is_ok() {
                        self.live.insert(particle.id, dot);
                    }
                }
                AmbientEvent::Despawn(id) => {
                    if let Some(dot) = self.live.remove(&id) {
                        dot.remove();
                    }
                }
            }
        }
    }
}

pub(crate) struct AmbientUnit {
    emitter: Rc<RefCell<AmbientEmitter>>,
    dots: Rc<RefCell<Dots>>,
    ticker: Ticker,
}

pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Some(container) = dom::query(CONTAINER) else {
        return Box::new(Disabled("ambient"));
    };
    let emitter = Rc::new(RefCell::new(AmbientEmitter::new(
        ctx.config.ambient.clone(),
        ctx.rng(),
    )));
    let dots = Rc::new(RefCell::new(Dots {
        container,
        live: HashMap::new(),
    }));
    let ticker = {
        let emitter = emitter.clone();
        let dots = dots.clone();
        let mut clock = Clock::new();
        Ticker::start(Cadence::Every(POLL), move || {
            let mut emitter = emitter.borrow_mut();
            emitter.step(&clock.next());
            dots.borrow_mut().apply(emitter.drain());
            emitter.is_active()
        })
    };
    match ticker {
        Ok(ticker) => Box::new(AmbientUnit {
            emitter,
            dots,
            ticker,
        }),
        Err(err) => failed("ambient", err),
    }
}

impl MountedUnit for AmbientUnit {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running()
    }

    fn stop(&mut self) {
        self.ticker.stop();
        let mut emitter = self.emitter.borrow_mut();
        emitter.stop();
        self.dots.borrow_mut().apply(emitter.drain());
    }
}
