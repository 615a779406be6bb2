#![forbid(unsafe_code)]

//! Event listeners that detach on drop.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl Listener {
    pub(crate) fn new(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(f);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
            attached: true,
        })
    }

    pub(crate) fn remove(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let callback = self.callback.as_ref().unchecked_ref();
        let _ = self.target.remove_event_listener_with_callback(self.event, callback);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Every listener a unit registered.
#[derive(Default)]
pub(crate) struct Listeners {
    items: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `f`; a failed registration is logged and skipped.
    pub(crate) fn on(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) {
        match Listener::new(target, event, f) {
            Ok(listener) => self.items.push(listener),
            Err(err) => tracing::warn!(event, error = ?err, "listener not attached"),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        for listener in &mut self.items {
            listener.remove();
        }
        self.items.clear();
    }
}
