#![forbid(unsafe_code)]

//! `setTimeout`/`setInterval` handles. Both clear their timer on drop.
//!
//! A handle's closure lives as long as the handle, so a callback must never
//! drop the handle that is running it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

fn millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}

pub(crate) struct Timeout {
    handle: Option<i32>,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub(crate) fn new(delay: Duration, f: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            f();
            flag.set(true);
        });
        let handle = dom::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis(delay),
        )?;
        Ok(Self {
            handle: Some(handle),
            fired,
            _callback: callback,
        })
    }

    /// Scheduled and not yet run to completion.
    pub(crate) fn is_pending(&self) -> bool {
        self.handle.is_some() && !self.fired.get()
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take()
            && let Ok(window) = dom::window()
        {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub(crate) struct Interval {
    handle: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub(crate) fn new(period: Duration, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut()>::new(f);
        let handle = dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis(period),
        )?;
        Ok(Self {
            handle: Some(handle),
            _callback: callback,
        })
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn stop(&mut self) {
        if let Some(handle) = self.handle.take()
            && let Ok(window) = dom::window()
        {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs the latest scheduled callback once no new one arrived for `delay`.
pub(crate) struct Debounce {
    delay: Duration,
    pending: Option<Timeout>,
}

impl Debounce {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub(crate) fn schedule(&mut self, f: impl FnOnce() + 'static) {
        // Dropping the previous timeout clears it.
        self.pending = match Timeout::new(self.delay, f) {
            Ok(t) => Some(t),
            Err(err) => {
                tracing::warn!(error = ?err, "debounce timer not scheduled");
                None
            }
        };
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Timeouts that all die with their owner.
#[derive(Default)]
pub(crate) struct Timeouts {
    pending: Vec<Timeout>,
}

impl Timeouts {
    pub(crate) fn push(&mut self, delay: Duration, f: impl FnOnce() + 'static) {
        self.pending.retain(Timeout::is_pending);
        match Timeout::new(delay, f) {
            Ok(t) => self.pending.push(t),
            Err(err) => tracing::warn!(error = ?err, "timeout not scheduled"),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.pending.iter().any(Timeout::is_pending)
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }
}
