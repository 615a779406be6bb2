#![forbid(unsafe_code)]

//! The lagging cursor follower and its hover scale.

use std::cell::RefCell;
use std::rc::Rc;

use folio_fx::effect::{ContinuousFx, Effect};
use folio_fx::pointer::CursorFollower;

use super::{Clock, Disabled, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;

const FOLLOWER: &str = ".cursor-follower";
const HOVER_TARGETS: &str = "a, button, .interactive";

pub(crate) struct CursorUnit {
    follower: Rc<RefCell<CursorFollower>>,
    ticker: Ticker,
    listeners: Listeners,
}

pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Some(el) = dom::query(FOLLOWER) else {
        return Box::new(Disabled("cursor"));
    };
    let follower = Rc::new(RefCell::new(CursorFollower::new(&ctx.config.pointer)));
    let mut listeners = Listeners::new();

    if let Ok(doc) = dom::document() {
        let follower = follower.clone();
        listeners.on(doc.as_ref(), "mousemove", move |event| {
            if let Some(p) = dom::client_point(&event) {
                follower.borrow_mut().set_target(p);
            }
        });
    }
    for target in dom::query_all(HOVER_TARGETS) {
        for (event, on) in [("mouseenter", true), ("mouseleave", false)] {
            let follower = follower.clone();
            let el = el.clone();
            listeners.on(target.as_ref(), event, move |_| {
                let transform = follower.borrow_mut().hover(on);
                dom::set_transform(&el, &transform);
            });
        }
    }

    let ticker = {
        let follower = follower.clone();
        let mut clock = Clock::new();
        Ticker::start(Cadence::Frame, move || {
            let mut follower = follower.borrow_mut();
            follower.step(&clock.next());
            dom::apply_styles(&el, &follower.styles());
            follower.is_active()
        })
    };
    match ticker {
        Ok(ticker) => Box::new(CursorUnit {
            follower,
            ticker,
            listeners,
        }),
        Err(err) => failed("cursor", err),
    }
}

impl MountedUnit for CursorUnit {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running()
    }

    fn stop(&mut self) {
        self.ticker.stop();
        self.listeners.clear();
        self.follower.borrow_mut().stop();
    }
}
