#![forbid(unsafe_code)]

//! Scroll-driven chrome and in-page navigation.
//!
//! `mount_chrome` follows the window scroll offset: the progress bar, the
//! back-to-top button, and both parallax flavours. `mount_navigation` owns the
//! hamburger menu and the eased scroll to anchors and back to the top.

use std::cell::RefCell;
use std::rc::Rc;

use folio_fx::scroll::{
    NavMenu, ScrollConfig, SmoothScroll, back_to_top_class, data_parallax, hero_parallax,
    parallax_speed, progress_percent,
};
use folio_fx::style::StyleDecl;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::{Clock, ListenerUnit, MountContext};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;

const PROGRESS_BAR: &str = ".scroll-progress";
const BACK_TO_TOP: &str = "#backToTop";
const HERO: &str = ".hero-background";
const PARALLAX: &str = "[data-parallax]";
const HAMBURGER: &str = ".hamburger";
const NAV_MENU: &str = ".nav-menu";
const ANCHORS: &str = "a[href^=\"#\"]";

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

struct Chrome {
    config: ScrollConfig,
    progress: Option<Element>,
    back_to_top: Option<Element>,
    hero: Option<Element>,
    layers: Vec<(Element, f64)>,
}

impl Chrome {
    fn is_empty(&self) -> bool {
        self.progress.is_none()
            && self.back_to_top.is_none()
            && self.hero.is_none()
            && self.layers.is_empty()
    }

    fn update(&self) {
        let top = dom::scroll_top();
        if let Some(bar) = &self.progress {
            let percent = progress_percent(top, dom::document_height(), dom::viewport().height);
            dom::apply_styles(bar, &[StyleDecl::percent("width", percent)]);
        }
        if let Some(button) = &self.back_to_top {
            dom::apply_class(button, back_to_top_class(top, &self.config));
        }
        if let Some(hero) = &self.hero {
            dom::set_transform(hero, &hero_parallax(top, &self.config));
        }
        for (el, speed) in &self.layers {
            dom::set_transform(el, &data_parallax(top, *speed));
        }
    }
}

pub(crate) fn mount_chrome(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let config = ctx.config.scroll.clone();
    let layers = dom::query_all(PARALLAX)
        .into_iter()
        .map(|el| {
            let speed = parallax_speed(el.get_attribute("data-parallax").as_deref(), &config);
            (el, speed)
        })
        .collect();
    let chrome = Chrome {
        progress: dom::query(PROGRESS_BAR),
        back_to_top: dom::query(BACK_TO_TOP),
        hero: dom::query(HERO),
        layers,
        config,
    };

    let mut listeners = Listeners::new();
    if !chrome.is_empty()
        && let Ok(window) = dom::window()
    {
        chrome.update();
        listeners.on(window.as_ref(), "scroll", move |_| chrome.update());
    }
    ListenerUnit::new("scroll", listeners)
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Page offset of `target`, as layout reports it.
fn offset_top(target: &Element) -> f64 {
    match target.dyn_ref::<HtmlElement>() {
        Some(html) => f64::from(html.offset_top()),
        None => dom::bounds_of(target).top() + dom::scroll_top(),
    }
}

/// The eased window scroll in flight, if any. Starting a new one replaces it.
#[derive(Clone, Default)]
struct Scroller {
    active: Rc<RefCell<Option<Ticker>>>,
}

impl Scroller {
    fn scroll_to(&self, target: f64, config: &ScrollConfig) {
        let Ok(window) = dom::window() else {
            return;
        };
        let mut scroll = SmoothScroll::new(dom::scroll_top(), target, config);
        let mut clock = Clock::new();
        let started = Ticker::start(Cadence::Frame, move || {
            let y = scroll.tick(clock.next().dt);
            window.scroll_to_with_x_and_y(0.0, y);
            !scroll.is_complete()
        });
        match started {
            Ok(ticker) => *self.active.borrow_mut() = Some(ticker),
            Err(err) => {
                tracing::warn!(unit = "navigation", error = ?err, "smooth scroll not started");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.active.borrow().as_ref().is_some_and(Ticker::is_running)
    }

    fn stop(&self) {
        if let Some(ticker) = self.active.borrow().as_ref() {
            ticker.stop();
        }
    }
}

#[derive(Clone)]
struct Menu {
    state: Rc<RefCell<NavMenu>>,
    elements: Rc<Vec<Element>>,
}

impl Menu {
    fn toggle(&self) {
        let toggle = self.state.borrow_mut().toggle();
        for el in self.elements.iter() {
            dom::apply_class(el, toggle);
        }
    }

    fn close(&self) {
        let toggle = self.state.borrow_mut().close();
        for el in self.elements.iter() {
            dom::apply_class(el, toggle);
        }
    }
}

pub(crate) struct NavigationUnit {
    listeners: Listeners,
    scroller: Scroller,
}

pub(crate) fn mount_navigation(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let config = ctx.config.scroll.clone();
    let scroller = Scroller::default();
    let hamburger = dom::query(HAMBURGER);
    let menu = Menu {
        state: Rc::default(),
        elements: Rc::new(hamburger.iter().cloned().chain(dom::query(NAV_MENU)).collect()),
    };
    let mut listeners = Listeners::new();

    if let Some(hamburger) = &hamburger {
        let menu = menu.clone();
        listeners.on(hamburger.as_ref(), "click", move |_| menu.toggle());
    }
    if let Some(button) = dom::query(BACK_TO_TOP) {
        let (scroller, config) = (scroller.clone(), config.clone());
        listeners.on(button.as_ref(), "click", move |_| scroller.scroll_to(0.0, &config));
    }
    for anchor in dom::query_all(ANCHORS) {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let (scroller, menu, config) = (scroller.clone(), menu.clone(), config.clone());
        listeners.on(anchor.as_ref(), "click", move |event| {
            event.prevent_default();
            // A bare "#" is not a valid selector and resolves to nothing.
            if let Some(target) = dom::query(&href) {
                scroller.scroll_to(offset_top(&target), &config);
            }
            menu.close();
        });
    }

    if listeners.is_empty() {
        return ListenerUnit::new("navigation", listeners);
    }
    tracing::debug!(unit = "navigation", count = listeners.len(), "listeners attached");
    Box::new(NavigationUnit {
        listeners,
        scroller,
    })
}

impl MountedUnit for NavigationUnit {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn is_active(&self) -> bool {
        !self.listeners.is_empty() || self.scroller.is_running()
    }

    fn stop(&mut self) {
        self.listeners.clear();
        self.scroller.stop();
    }
}
