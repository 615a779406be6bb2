#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_fx::effect::{ContinuousFx, Effect};
use folio_fx::floating::FloatingMotion;

use super::{Clock, Disabled, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::page::MountedUnit;

const TARGETS: &str = ".floating-element";

/// Bobs every `.floating-element` along its own Lissajous path.
pub(crate) struct FloatingUnit {
    motion: Rc<RefCell<FloatingMotion>>,
    ticker: Ticker,
}

pub(crate) fn mount(_ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let elements = dom::query_all(TARGETS);
    if elements.is_empty() {
        return Box::new(Disabled("floating"));
    }
    let motion = Rc::new(RefCell::new(FloatingMotion::new(elements.len())));
    let ticker = {
        let motion = motion.clone();
        let mut clock = Clock::new();
        Ticker::start(Cadence::Frame, move || {
            let mut motion = motion.borrow_mut();
            motion.step(&clock.next());
            for (el, transform) in elements.iter().zip(motion.transforms()) {
                dom::set_transform(el, &transform);
            }
            motion.is_active()
        })
    };
    match ticker {
        Ok(ticker) => Box::new(FloatingUnit { motion, ticker }),
        Err(err) => failed("floating", err),
    }
}

impl MountedUnit for FloatingUnit {
    fn name(&self) -> &'static str {
        "floating"
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running()
    }

    fn stop(&mut self) {
        self.ticker.stop();
        self.motion.borrow_mut().stop();
    }
}
