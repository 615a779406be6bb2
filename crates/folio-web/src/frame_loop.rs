#![forbid(unsafe_code)]

//! `requestAnimationFrame` loop with explicit cancellation, and [`Ticker`],
//! which drives a callback either per frame or on an interval.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::timer::Interval;

struct LoopState {
    handle: Cell<Option<i32>>,
    running: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn schedule(&self) -> Result<(), JsValue> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }

    fn cancel(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take()
            && let Ok(window) = dom::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// Calls `on_frame` with the frame timestamp once per animation frame for as
/// long as it returns `true`.
///
/// The callback must not drop its own `FrameLoop`.
pub(crate) struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub(crate) fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Result<Self, JsValue> {
        let state = Rc::new(LoopState {
            handle: Cell::new(None),
            running: Cell::new(true),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.handle.set(None);
            if !state.running.get() {
                return;
            }
            if !on_frame(timestamp) {
                state.running.set(false);
                return;
            }
            if let Err(err) = state.schedule() {
                tracing::warn!(error = ?err, "frame request failed; loop stopped");
                state.running.set(false);
            }
        });
        *state.callback.borrow_mut() = Some(callback);
        state.schedule()?;
        Ok(Self { state })
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub(crate) fn stop(&self) {
        self.state.cancel();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.state.cancel();
        self.state.callback.borrow_mut().take();
    }
}

/// How often a [`Ticker`] fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cadence {
    /// Every animation frame.
    Frame,
    /// On a fixed interval.
    Every(std::time::Duration),
}

/// A frame loop or an interval that stops itself once its callback returns
/// `false`.
pub(crate) enum Ticker {
    Frame(FrameLoop),
    Every(Rc<RefCell<Option<Interval>>>),
}

impl Ticker {
    pub(crate) fn start(
        cadence: Cadence,
        mut on_tick: impl FnMut() -> bool + 'static,
    ) -> Result<Self, JsValue> {
        match cadence {
            Cadence::Frame => FrameLoop::start(move |_| on_tick()).map(Self::Frame),
            Cadence::Every(period) => {
                let slot: Rc<RefCell<Option<Interval>>> = Rc::default();
                let weak = Rc::downgrade(&slot);
                let interval = Interval::new(period, move || {
                    if on_tick() {
                        return;
                    }
                    if let Some(slot) = weak.upgrade()
                        && let Ok(mut guard) = slot.try_borrow_mut()
                        && let Some(interval) = guard.as_mut()
                    {
                        interval.stop();
                    }
                })?;
                *slot.borrow_mut() = Some(interval);
                Ok(Self::Every(slot))
            }
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        match self {
            Self::Frame(frames) => frames.is_running(),
            Self::Every(slot) => slot
                .try_borrow()
                .is_ok_and(|guard| guard.as_ref().is_some_and(Interval::is_running)),
        }
    }

    pub(crate) fn stop(&self) {
        match self {
            Self::Frame(frames) => frames.stop(),
            Self::Every(slot) => {
                if let Ok(mut guard) = slot.try_borrow_mut()
                    && let Some(interval) = guard.as_mut()
                {
                    interval.stop();
                }
            }
        }
    }
}
