#![forbid(unsafe_code)]

//! Magnetic pull, 3D tilt and click-to-flip cards.

use std::cell::RefCell;
use std::rc::Rc;

use folio_fx::pointer::{CardFlip, Magnetic, Tilt};
use web_sys::Element;

use super::{ListenerUnit, MountContext};
use crate::dom;
use crate::listener::Listeners;
use crate::page::MountedUnit;

const MAGNETIC_TARGETS: &str = ".btn, .social-link, .achievement-card, .project-card, .magnetic";
const TILT_TARGETS: &str = ".project-card";
const FLIP_TARGETS: &str = ".card-3d";

pub(crate) fn mount_magnetic(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let mut listeners = Listeners::new();
    let mut magnets: Vec<(Element, Rc<RefCell<Magnetic>>)> = Vec::new();

    for el in dom::query_all(MAGNETIC_TARGETS) {
        let magnet = Rc::new(RefCell::new(Magnetic::new(
            &ctx.config.pointer,
            dom::bounds_of(&el),
        )));
        {
            let (el2, magnet) = (el.clone(), magnet.clone());
            listeners.on(el.as_ref(), "mouseenter", move |_| {
                let mut magnet = magnet.borrow_mut();
                magnet.set_bounds(dom::bounds_of(&el2));
                dom::apply_styles(&el2, &[magnet.on_enter()]);
            });
        }
        {
            let (el2, magnet) = (el.clone(), magnet.clone());
            listeners.on(el.as_ref(), "mousemove", move |event| {
                if let Some(p) = dom::client_point(&event) {
                    dom::set_transform(&el2, &magnet.borrow().on_move(p));
                }
            });
        }
        {
            let (el2, magnet) = (el.clone(), magnet.clone());
            listeners.on(el.as_ref(), "mouseleave", move |_| {
                dom::set_transform(&el2, &magnet.borrow().on_leave());
            });
        }
        magnets.push((el, magnet));
    }

    if !magnets.is_empty()
        && let Ok(window) = dom::window()
    {
        listeners.on(window.as_ref(), "resize", move |_| {
            for (el, magnet) in &magnets {
                magnet.borrow_mut().set_bounds(dom::bounds_of(el));
            }
        });
    }
    ListenerUnit::new("magnetic", listeners)
}

pub(crate) fn mount_tilt(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let tilt = Tilt::new(&ctx.config.pointer);
    let mut listeners = Listeners::new();
    for el in dom::query_all(TILT_TARGETS) {
        let moved = el.clone();
        listeners.on(el.as_ref(), "mousemove", move |event| {
            if let Some(p) = dom::client_point(&event) {
                dom::set_transform(&moved, &tilt.on_move(p, dom::bounds_of(&moved)));
            }
        });
        let left = el.clone();
        listeners.on(el.as_ref(), "mouseleave", move |_| {
            dom::set_transform(&left, &tilt.on_leave());
        });
    }
    ListenerUnit::new("tilt", listeners)
}

pub(crate) fn mount_card_flip(_ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let mut listeners = Listeners::new();
    for el in dom::query_all(FLIP_TARGETS) {
        let mut card = CardFlip::new();
        dom::apply_styles(&el, &card.mount_styles());
        let target = el.clone();
        listeners.on(el.as_ref(), "click", move |_| {
            dom::set_transform(&target, &card.toggle());
        });
    }
    ListenerUnit::new("card-flip", listeners)
}
