#![forbid(unsafe_code)]

//! Page startup: mount every unit whose targets exist.

use std::time::Duration;

use folio_fx::FolioConfig;

use crate::dom;
use crate::page::{MountedUnit, Page};
use crate::timer::Timeout;
use crate::units::theme::ThemeHandle;
use crate::units::{
    MountContext, ambient, carousel, cursor, failed, floating, konami, particles, pointer, reveal,
    scroll, text, theme, trail,
};

const LOADED_CLASS: &str = "loaded";
const LOADED_DELAY: Duration = Duration::from_millis(100);

type MountFn = fn(&mut MountContext) -> Box<dyn MountedUnit>;

/// Mounted in this order, after the theme.
const UNITS: &[MountFn] = &[
    particles::mount_particles,
    particles::mount_matrix,
    cursor::mount,
    trail::mount,
    ambient::mount,
    floating::mount,
    reveal::mount,
    text::mount_typing,
    text::mount_typewriter,
    text::mount_hover_glitch,
    carousel::mount,
    scroll::mount_chrome,
    scroll::mount_navigation,
    pointer::mount_magnetic,
    pointer::mount_tilt,
    pointer::mount_card_flip,
    konami::mount,
    mark_loaded,
];

/// Adds `loaded` to the body shortly after startup, for CSS entrance effects.
struct LoadedUnit(Timeout);

impl MountedUnit for LoadedUnit {
    fn name(&self) -> &'static str {
        "loaded"
    }

    fn is_active(&self) -> bool {
        self.0.is_pending()
    }

    fn stop(&mut self) {
        self.0.cancel();
    }
}

fn mark_loaded(_ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let timeout = Timeout::new(LOADED_DELAY, || {
        if let Some(body) = dom::body() {
            dom::set_class(&body, LOADED_CLASS, true);
        }
    });
    match timeout {
        Ok(timeout) => Box::new(LoadedUnit(timeout)),
        Err(err) => failed("loaded", err),
    }
}

/// Mount the whole page. The returned handle drives the theme from JS.
pub(crate) fn mount(config: FolioConfig) -> (Page, ThemeHandle) {
    let mut ctx = MountContext::new(config);
    let mut page = Page::new();

    let (theme_unit, theme) = theme::mount(&mut ctx);
    page.add(theme_unit);
    for mount in UNITS {
        page.add(mount(&mut ctx));
    }

    tracing::info!(count = page.active_units().len(), total = page.len(), "page mounted");
    (page, theme)
}
