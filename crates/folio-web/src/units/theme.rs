#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_fx::theme::{ThemeApply, ThemeController};
use web_sys::Element;

use super::MountContext;
use crate::dom;
use crate::listener::Listeners;
use crate::page::MountedUnit;
use crate::storage::LocalStorageStore;

const TOGGLE_BUTTON: &str = "#darkModeToggle";

/// Shared access to the page theme, for the toggle button and for JS.
#[derive(Clone)]
pub(crate) struct ThemeHandle {
    controller: Rc<RefCell<ThemeController<LocalStorageStore>>>,
    button: Option<Element>,
    live: Rc<Cell<bool>>,
}

impl ThemeHandle {
    fn apply(&self, apply: &ThemeApply) {
        let (class, on) = apply.class_toggle();
        if let Some(body) = dom::body() {
            dom::set_class(&body, class, on);
        }
        if let Some(button) = &self.button {
            button.set_inner_html(&format!("<i class=\"fas {}\"></i>", apply.icon));
        }
    }

    /// Flip the theme; returns whether the page is now dark. Does nothing
    /// once the unit is stopped.
    pub(crate) fn toggle(&self) -> bool {
        if !self.live.get() {
            return self.is_dark();
        }
        let apply = self.controller.borrow_mut().toggle();
        self.apply(&apply);
        apply.mode.is_dark()
    }

    pub(crate) fn is_dark(&self) -> bool {
        self.controller.borrow().is_dark()
    }
}

pub(crate) struct ThemeUnit {
    handle: ThemeHandle,
    listeners: Listeners,
}

/// Restore the stored theme and wire `#darkModeToggle`.
pub(crate) fn mount(ctx: &mut MountContext) -> (Box<dyn MountedUnit>, ThemeHandle) {
    let (controller, initial) =
        ThemeController::load(LocalStorageStore, ctx.config.theme.clone());
    let handle = ThemeHandle {
        controller: Rc::new(RefCell::new(controller)),
        button: dom::query(TOGGLE_BUTTON),
        live: Rc::new(Cell::new(true)),
    };
    handle.apply(&initial);

    let mut listeners = Listeners::new();
    if let Some(button) = &handle.button {
        let handle = handle.clone();
        listeners.on(button.as_ref(), "click", move |_| {
            handle.toggle();
        });
    }
    tracing::info!(
        unit = "theme",
        dark = initial.mode.is_dark(),
        persisted = initial.persisted,
        "theme applied"
    );
    let unit = ThemeUnit {
        handle: handle.clone(),
        listeners,
    };
    (Box::new(unit), handle)
}

impl MountedUnit for ThemeUnit {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn is_active(&self) -> bool {
        self.handle.live.get()
    }

    fn stop(&mut self) {
        self.listeners.clear();
        self.handle.live.set(false);
    }
}
