#![forbid(unsafe_code)]

//! Text effects: the looping headline, hover retyping, hover glitch, and the
//! one-off glitch/scramble runs exported to JS.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::rng::FxRng;
use folio_fx::text::{Glitch, GlitchParams, Scramble, Typewriter, TypewriterLoop};
use wasm_bindgen::JsValue;
use web_sys::Element;
use web_time::Instant;

use super::{Clock, Disabled, ListenerUnit, MountContext, failed};
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;
use crate::timer::Timeouts;

const TYPING_TARGET: &str = ".typing-text";
const RETYPE_TARGETS: &str = ".typewriter-text";
const GLITCH_TARGETS: &str = ".nav-logo, .glitch-text";

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// A glitch or scramble in progress on one element.
///
/// Cancelling leaves the element showing its final text.
pub(crate) enum TextRun {
    Glitch {
        el: Element,
        snapshot: String,
        steps: Timeouts,
    },
    Scramble {
        el: Element,
        target: String,
        ticker: Ticker,
    },
}

impl TextRun {
    pub(crate) fn is_active(&self) -> bool {
        match self {
            Self::Glitch { steps, .. } => !steps.is_empty(),
            Self::Scramble { ticker, .. } => ticker.is_running(),
        }
    }

    pub(crate) fn cancel(&mut self) {
        if !self.is_active() {
            return;
        }
        match self {
            Self::Glitch {
                el,
                snapshot,
                steps,
            } => {
                steps.clear();
                dom::set_text(el, snapshot);
            }
            Self::Scramble { el, target, ticker } => {
                ticker.stop();
                dom::set_text(el, target);
            }
        }
    }
}

/// Schedule every corrupt/restore step of `glitch` on `el`.
fn schedule_glitch(
    el: &Element,
    glitch: &Rc<Glitch>,
    rng: &Rc<RefCell<FxRng>>,
    steps: &mut Timeouts,
) {
    steps.clear();
    for step in glitch.timeline() {
        let (el, glitch, rng) = (el.clone(), glitch.clone(), rng.clone());
        steps.push(step.at, move || {
            let text = glitch.render(step.op, &mut rng.borrow_mut());
            dom::set_text(&el, &text);
        });
    }
}

/// Glitch the element's current text.
pub(crate) fn glitch(el: Element, params: GlitchParams, rng: FxRng) -> TextRun {
    let snapshot = dom::text_of(&el);
    let glitch = Rc::new(Glitch::new(snapshot.clone(), params));
    let mut steps = Timeouts::default();
    schedule_glitch(&el, &glitch, &Rc::new(RefCell::new(rng)), &mut steps);
    tracing::debug!(unit = "glitch", intensity = params.intensity, "glitch started");
    TextRun::Glitch {
        el,
        snapshot,
        steps,
    }
}

/// Resolve random glyphs into `target` over `duration`.
pub(crate) fn scramble(
    el: Element,
    target: String,
    duration: Duration,
    mut rng: FxRng,
) -> Result<TextRun, JsValue> {
    let scramble = Scramble::new(target.clone(), duration);
    let started = Instant::now();
    let shown = el.clone();
    let ticker = Ticker::start(Cadence::Frame, move || {
        let elapsed = started.elapsed();
        dom::set_text(&shown, &scramble.frame(elapsed, &mut rng));
        !scramble.is_complete(elapsed)
    })?;
    Ok(TextRun::Scramble { el, target, ticker })
}

// ---------------------------------------------------------------------------
// Looping headline
// ---------------------------------------------------------------------------

pub(crate) struct TypingUnit {
    ticker: Ticker,
}

/// Type, hold, and delete the configured phrases on `.typing-text`.
pub(crate) fn mount_typing(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Some(el) = dom::query(TYPING_TARGET) else {
        return Box::new(Disabled("typing"));
    };
    let mut typing = TypewriterLoop::new(&ctx.config.text);
    let clock = Clock::new();
    let mut due = Duration::ZERO;
    let ticker = Ticker::start(Cadence::Frame, move || {
        let now = clock.elapsed();
        if now >= due {
            due = now + typing.advance();
            dom::set_text(&el, &typing.text());
        }
        true
    });
    match ticker {
        Ok(ticker) => Box::new(TypingUnit { ticker }),
        Err(err) => failed("typing", err),
    }
}

impl MountedUnit for TypingUnit {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running()
    }

    fn stop(&mut self) {
        self.ticker.stop();
    }
}

// ---------------------------------------------------------------------------
// Hover effects
// ---------------------------------------------------------------------------

/// Retype `.typewriter-text` from empty on every mouseenter.
pub(crate) fn mount_typewriter(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let interval = ctx.config.text.typewriter_interval;
    let mut listeners = Listeners::new();
    for el in dom::query_all(RETYPE_TARGETS) {
        let text = dom::text_of(&el);
        let running: Rc<RefCell<Option<Ticker>>> = Rc::default();
        let target = el.clone();
        listeners.on(el.as_ref(), "mouseenter", move |_| {
            let mut typewriter = Typewriter::new(&text, interval);
            dom::set_text(&target, "");
            let shown = target.clone();
            let started = Ticker::start(Cadence::Every(typewriter.interval()), move || {
                match typewriter.tick() {
                    Some(partial) => {
                        dom::set_text(&shown, &partial);
                        true
                    }
                    None => false,
                }
            });
            match started {
                Ok(ticker) => *running.borrow_mut() = Some(ticker),
                Err(err) => {
                    tracing::warn!(unit = "typewriter", error = ?err, "retype not started");
                    dom::set_text(&target, &text);
                }
            }
        });
    }
    ListenerUnit::new("typewriter", listeners)
}

/// Glitch `.nav-logo` and `.glitch-text` on mouseenter.
///
/// Each element's text is captured once at mount, so hovering again during a
/// burst never snapshots a corrupted frame.
pub(crate) fn mount_hover_glitch(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let params = ctx.config.text.hover_glitch;
    let rng = Rc::new(RefCell::new(ctx.rng()));
    let mut listeners = Listeners::new();
    for el in dom::query_all(GLITCH_TARGETS) {
        let glitch = Rc::new(Glitch::new(dom::text_of(&el), params));
        let steps: Rc<RefCell<Timeouts>> = Rc::default();
        let (target, rng) = (el.clone(), rng.clone());
        listeners.on(el.as_ref(), "mouseenter", move |_| {
            schedule_glitch(&target, &glitch, &rng, &mut steps.borrow_mut());
        });
    }
    ListenerUnit::new("glitch", listeners)
}
