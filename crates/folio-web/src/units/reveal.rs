#![forbid(unsafe_code)]

//! Scroll-triggered reveals through an `IntersectionObserver`.
//!
//! Cards, `[data-animate]` elements, stat counters and lazy images are
//! registered once with a [`RevealObserver`]; the first intersecting entry for
//! an element unobserves it and runs its plan. `[data-animate]` elements
//! additionally get the `animate` class once scrolled within reach.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_fx::reveal::{
    ANIMATE_CLASS, Counter, Intersection, Payload, RevealAction, RevealConfig, RevealObserver,
    RevealPlan, RevealSpec, class_reveal,
};
use folio_fx::style::StyleDecl;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{Disabled, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;
use crate::timer::Timeouts;

const CARD_TARGETS: &str =
    ".skill-card, .achievement-card, .project-card, .stat-card, .testimonial-card";
const ANIMATE_TARGETS: &str = "[data-animate]";
const COUNTER_TARGETS: &str = ".stat-number";
const LAZY_TARGETS: &str = "img[data-src]";
const BAR_CHILD: &str = ".skill-progress";
const RING_CHILD: &str = ".progress-ring-circle";

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

fn child(el: &Element, selector: &str) -> Option<Element> {
    el.query_selector(selector).ok().flatten()
}

fn payload_or_log(el: &Element, parsed: folio_fx::FxResult<Payload>) -> Option<Payload> {
    match parsed {
        Ok(p) => Some(p),
        Err(err) => {
            tracing::debug!(
                unit = "reveal",
                element = %el.tag_name(),
                error = %err,
                "payload skipped"
            );
            None
        }
    }
}

/// Pending registrations; an element listed twice merges into one spec.
#[derive(Default)]
struct Registry {
    entries: Vec<(Element, RevealSpec)>,
}

impl Registry {
    fn add(&mut self, el: Element, spec: RevealSpec) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(e, _)| *e == el) {
            if existing.kind.is_none() {
                existing.kind = spec.kind;
                existing.prime_on_observe = spec.prime_on_observe;
            }
            existing.payloads.extend(spec.payloads);
        } else {
            self.entries.push((el, spec));
        }
    }

    fn collect() -> Self {
        let mut registry = Self::default();
        for el in dom::query_all(CARD_TARGETS) {
            let mut spec = RevealSpec::card();
            if dom::has_class(&el, "skill-card")
                && let Some(bar) = child(&el, BAR_CHILD)
                && let Some(p) = payload_or_log(
                    &el,
                    Payload::progress_bar(&bar.get_attribute("data-width").unwrap_or_default()),
                )
            {
                spec = spec.with_payload(p);
            }
            if dom::has_class(&el, "achievement-card")
                && let Some(ring) = child(&el, RING_CHILD)
                && let Some(p) = payload_or_log(
                    &el,
                    Payload::progress_ring(
                        &ring.get_attribute("data-progress").unwrap_or_default(),
                    ),
                )
            {
                spec = spec.with_payload(p);
            }
            registry.add(el, spec);
        }
        for el in dom::query_all(ANIMATE_TARGETS) {
            let attr = el.get_attribute("data-animate").unwrap_or_default();
            match RevealSpec::from_attribute(&attr) {
                Ok(spec) => registry.add(el, spec),
                Err(err) => tracing::debug!(unit = "reveal", error = %err, "data-animate ignored"),
            }
        }
        for el in dom::query_all(COUNTER_TARGETS) {
            let target = el.get_attribute("data-target").unwrap_or_default();
            if let Some(p) = payload_or_log(&el, Payload::counter(&target, &dom::text_of(&el))) {
                registry.add(el, payload_only(p));
            }
        }
        for el in dom::query_all(LAZY_TARGETS) {
            let src = el.get_attribute("data-src").unwrap_or_default();
            if let Some(p) = payload_or_log(&el, Payload::lazy_image(&src)) {
                registry.add(el, payload_only(p));
            }
        }
        registry
    }
}

fn payload_only(payload: Payload) -> RevealSpec {
    RevealSpec {
        kind: None,
        payloads: vec![payload],
        prime_on_observe: false,
    }
}

// ---------------------------------------------------------------------------
// Plan execution
// ---------------------------------------------------------------------------

struct Shared {
    observer: RevealObserver<usize>,
    elements: Vec<Element>,
    timeouts: Timeouts,
    counters: Vec<Ticker>,
}

impl Shared {
    fn run(&mut self, weak: &Weak<RefCell<Shared>>, el: &Element, plan: RevealPlan) {
        let tick = self.observer.config().counter_tick;
        for step in plan.steps {
            if step.delay.is_zero() {
                if let Some(counter) = apply(el, step.action, tick) {
                    self.keep(counter);
                }
                continue;
            }
            let el = el.clone();
            let weak = weak.clone();
            let action = step.action;
            self.timeouts.push(step.delay, move || {
                if let Some(counter) = apply(&el, action, tick)
                    && let Some(shared) = weak.upgrade()
                    && let Ok(mut shared) = shared.try_borrow_mut()
                {
                    shared.keep(counter);
                }
            });
        }
    }

    fn keep(&mut self, counter: Ticker) {
        self.counters.retain(Ticker::is_running);
        self.counters.push(counter);
    }
}

/// Perform one action on `el`; a started counter is returned to be kept alive.
fn apply(el: &Element, action: RevealAction, tick: Duration) -> Option<Ticker> {
    match action {
        RevealAction::Styles(decls) => dom::apply_styles(el, &decls),
        RevealAction::BarWidth(decl) => {
            if let Some(bar) = child(el, BAR_CHILD) {
                dom::apply_styles(&bar, &[decl]);
            }
        }
        RevealAction::RingOffset(offset) => {
            if let Some(ring) = child(el, RING_CHILD) {
                dom::apply_styles(
                    &ring,
                    &[StyleDecl::new("stroke-dashoffset", offset.to_string())],
                );
            }
        }
        RevealAction::LoadImage { src, class } => {
            if el.set_attribute("src", &src).is_ok() {
                dom::apply_class(el, class);
            }
        }
        RevealAction::StartCounter(counter) => return start_counter(el.clone(), counter, tick),
    }
    None
}

fn start_counter(el: Element, mut counter: Counter, tick: Duration) -> Option<Ticker> {
    let started = Ticker::start(Cadence::Every(tick), move || match counter.tick() {
        Some(text) => {
            dom::set_text(&el, &text);
            true
        }
        None => false,
    });
    match started {
        Ok(ticker) => Some(ticker),
        Err(err) => {
            tracing::warn!(unit = "reveal", error = ?err, "counter not started");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Unit
// ---------------------------------------------------------------------------

pub(crate) struct RevealUnit {
    shared: Rc<RefCell<Shared>>,
    observer: IntersectionObserver,
    _callback: EntryCallback,
    listeners: Listeners,
    connected: bool,
}

fn observer_init(config: &RevealConfig) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin.to_css());
    init
}

fn reveal_classes(targets: &[Element], config: &RevealConfig) {
    let viewport_height = dom::viewport().height;
    for el in targets {
        if class_reveal(dom::bounds_of(el).top(), viewport_height, config) {
            dom::apply_class(el, ANIMATE_CLASS);
        }
    }
}

pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let config = ctx.config.reveal.clone();
    let registry = Registry::collect();
    let animate_targets = dom::query_all(ANIMATE_TARGETS);
    if registry.entries.is_empty() && animate_targets.is_empty() {
        return Box::new(Disabled("reveal"));
    }

    let shared = Rc::new(RefCell::new(Shared {
        observer: RevealObserver::new(config.clone()),
        elements: Vec::with_capacity(registry.entries.len()),
        timeouts: Timeouts::default(),
        counters: Vec::new(),
    }));

    let callback: EntryCallback = {
        let weak = Rc::downgrade(&shared);
        Closure::new(move |entries: js_sys::Array, io: IntersectionObserver| {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let mut shared = strong.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(id) = shared.elements.iter().position(|el| *el == target) else {
                    continue;
                };
                let hit = Intersection {
                    is_intersecting: entry.is_intersecting(),
                };
                if let Some(plan) = shared.observer.on_intersection(&id, hit) {
                    io.unobserve(&target);
                    shared.run(&weak, &target, plan);
                }
            }
        })
    };

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_init(&config),
    ) {
        Ok(observer) => observer,
        Err(err) => return failed("reveal", err),
    };

    {
        let mut state = shared.borrow_mut();
        for (id, (el, spec)) in registry.entries.into_iter().enumerate() {
            let primed = state.observer.observe(id, spec);
            dom::apply_styles(&el, &primed);
            observer.observe(&el);
            state.elements.push(el);
        }
        tracing::debug!(unit = "reveal", count = state.observer.observed(), "observing");
    }

    let mut listeners = Listeners::new();
    if !animate_targets.is_empty() {
        reveal_classes(&animate_targets, &config);
        if let Ok(window) = dom::window() {
            listeners.on(window.as_ref(), "scroll", move |_| {
                reveal_classes(&animate_targets, &config);
            });
        }
    }

    Box::new(RevealUnit {
        shared,
        observer,
        _callback: callback,
        listeners,
        connected: true,
    })
}

impl RevealUnit {
    fn disconnect(&mut self) {
        if self.connected {
            self.observer.disconnect();
            self.connected = false;
        }
    }
}

impl MountedUnit for RevealUnit {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn is_active(&self) -> bool {
        self.connected
    }

    fn stop(&mut self) {
        self.disconnect();
        self.listeners.clear();
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.timeouts.clear();
            for counter in &shared.counters {
                counter.stop();
            }
        }
    }
}

impl Drop for RevealUnit {
    fn drop(&mut self) {
        self.disconnect();
    }
}
