#![forbid(unsafe_code)]

//! WASM binding for folio.
//!
//! Mounts the `folio-fx` effect units on a portfolio page. Each unit owns its
//! browser registrations (frame request, timer, listeners, observer) and
//! releases them on `stop()` and on drop; [`Page`] holds the mounted units so
//! the whole page can be torn down at once.
//!
//! JS surface:
//! - `new FolioPage()`, `page.mount(configJson?)`
//! - `page.toggleTheme()`, `page.isDark()`, `page.activeUnits()`
//! - `page.dispose()`
//! - `glitchText(element, intensity, durationMs)`,
//!   `scrambleText(element, text, durationMs)`
//!
//! The browser-facing modules only exist on `wasm32`; [`page`], [`logging`]
//! and [`mount_config`] are host-agnostic.

use folio_fx::{FolioConfig, FxResult};

pub mod logging;
pub mod page;

#[cfg(target_arch = "wasm32")]
mod bootstrap;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod listener;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod timer;
#[cfg(target_arch = "wasm32")]
mod units;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{FolioPage, TextEffect, glitch_text, scramble_text};

pub use page::{MountedUnit, Page, UnitSlot};

/// Configuration for `FolioPage.mount`. A missing or blank argument means
/// every default.
pub fn mount_config(json: Option<&str>) -> FxResult<FolioConfig> {
    match json.map(str::trim) {
        None | Some("") => Ok(FolioConfig::default()),
        Some(json) => FolioConfig::from_json(json),
    }
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioPage {
    page: Page,
}

#[cfg(not(target_arch = "wasm32"))]
impl FolioPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration; nothing is mounted off the browser.
    pub fn mount(&mut self, config_json: Option<&str>) -> FxResult<()> {
        mount_config(config_json).map(|_| ())
    }

    pub fn active_units(&self) -> Vec<&'static str> {
        self.page.active_units()
    }

    pub fn dispose(&mut self) {
        self.page.dispose();
    }
}
