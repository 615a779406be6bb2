#![forbid(unsafe_code)]

//! Browser bindings for each effect unit.
//!
//! A `mount` function per unit looks up its targets, wires listeners and
//! timers, and returns a [`MountedUnit`]. A missing target yields a disabled
//! unit, never an error.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::geometry::Size;
use folio_core::rng::FxRng;
use folio_fx::FolioConfig;
use folio_fx::effect::{CanvasFx, ContinuousFx, Effect, FrameContext};
use folio_fx::surface::Surface;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;
use web_time::Instant;

use crate::canvas::CanvasSurface;
use crate::dom;
use crate::frame_loop::{Cadence, Ticker};
use crate::listener::Listeners;
use crate::page::MountedUnit;
use crate::timer::Debounce;

pub(crate) mod ambient;
pub(crate) mod carousel;
pub(crate) mod cursor;
pub(crate) mod floating;
pub(crate) mod konami;
pub(crate) mod particles;
pub(crate) mod pointer;
pub(crate) mod reveal;
pub(crate) mod scroll;
pub(crate) mod text;
pub(crate) mod theme;
pub(crate) mod trail;

/// What every mount function gets.
pub(crate) struct MountContext {
    pub(crate) config: FolioConfig,
    seeds: FxRng,
}

impl MountContext {
    pub(crate) fn new(config: FolioConfig) -> Self {
        let seeds = match config.seed {
            Some(seed) => FxRng::from_seed(seed),
            None => FxRng::from_unit(js_sys::Math::random()),
        };
        Self { config, seeds }
    }

    /// An independent generator for one unit.
    pub(crate) fn rng(&mut self) -> FxRng {
        FxRng::from_seed(self.seeds.next_u32())
    }
}

/// Report a failed mount and hand back a disabled unit in its place.
pub(crate) fn failed(name: &'static str, err: JsValue) -> Box<dyn MountedUnit> {
    tracing::warn!(unit = name, error = ?err, "mount failed");
    Box::new(Disabled(name))
}

/// A unit whose targets are absent.
pub(crate) struct Disabled(pub(crate) &'static str);

impl MountedUnit for Disabled {
    fn name(&self) -> &'static str {
        self.0
    }

    fn is_active(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}

/// A unit made only of event listeners.
pub(crate) struct ListenerUnit {
    name: &'static str,
    listeners: Listeners,
}

impl ListenerUnit {
    pub(crate) fn new(name: &'static str, listeners: Listeners) -> Box<dyn MountedUnit> {
        if listeners.is_empty() {
            return Box::new(Disabled(name));
        }
        tracing::debug!(unit = name, count = listeners.len(), "listeners attached");
        Box::new(Self { name, listeners })
    }
}

impl MountedUnit for ListenerUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

/// Frame counter and clock for a ticking unit.
pub(crate) struct Clock {
    started: Instant,
    frame: u64,
    last: Duration,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self {
            started: Instant::now(),
            frame: 0,
            last: Duration::ZERO,
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn next(&mut self) -> FrameContext {
        let now = self.started.elapsed();
        let ctx = FrameContext::new(self.frame, now, now.saturating_sub(self.last));
        self.frame += 1;
        self.last = now;
        ctx
    }
}

/// A [`CanvasFx`] painting a canvas that tracks the viewport size.
pub(crate) struct CanvasUnit<F> {
    fx: Rc<RefCell<F>>,
    ticker: Ticker,
    listeners: Listeners,
    resize: Rc<RefCell<Debounce>>,
}

impl<F: CanvasFx + 'static> CanvasUnit<F> {
    /// Size `canvas` to the viewport, build the effect for that size and start
    /// it. `on_end` runs once if the effect stops on its own.
    pub(crate) fn mount(
        canvas: HtmlCanvasElement,
        cadence: Cadence,
        resize_debounce: Duration,
        make: impl FnOnce(Size) -> F,
        on_end: impl FnOnce() + 'static,
    ) -> Result<Self, JsValue> {
        let mut surface = CanvasSurface::attach(canvas)?;
        surface.fit(dom::viewport());
        let fx = Rc::new(RefCell::new(make(surface.size())));
        let surface = Rc::new(RefCell::new(surface));

        let ticker = {
            let fx = fx.clone();
            let surface = surface.clone();
            let mut clock = Clock::new();
            let mut on_end = Some(on_end);
            Ticker::start(cadence, move || {
                let mut fx = fx.borrow_mut();
                fx.step(&clock.next());
                if !fx.is_active() {
                    if let Some(f) = on_end.take() {
                        f();
                    }
                    return false;
                }
                fx.draw(&mut *surface.borrow_mut());
                true
            })?
        };

        let resize = Rc::new(RefCell::new(Debounce::new(resize_debounce)));
        let mut listeners = Listeners::new();
        {
            let fx = fx.clone();
            let resize = resize.clone();
            listeners.on(dom::window()?.as_ref(), "resize", move |_| {
                let fx = fx.clone();
                let surface = surface.clone();
                resize.borrow_mut().schedule(move || {
                    let mut surface = surface.borrow_mut();
                    surface.fit(dom::viewport());
                    let size = surface.size();
                    fx.borrow_mut().resize(size);
                });
            });
        }

        Ok(Self {
            fx,
            ticker,
            listeners,
            resize,
        })
    }
}

impl<F: CanvasFx + 'static> MountedUnit for CanvasUnit<F> {
    fn name(&self) -> &'static str {
        self.fx.borrow().name()
    }

    fn is_active(&self) -> bool {
        self.ticker.is_running() && self.fx.borrow().is_active()
    }

    fn stop(&mut self) {
        self.ticker.stop();
        self.listeners.clear();
        self.resize.borrow_mut().cancel();
        self.fx.borrow_mut().stop();
    }
}
