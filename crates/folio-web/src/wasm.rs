#![forbid(unsafe_code)]

use std::time::Duration;

use folio_core::rng::FxRng;
use folio_fx::text::GlitchParams;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::logging::{self, LogConfig};
use crate::page::Page;
use crate::units::text::{self, TextRun};
use crate::units::theme::ThemeHandle;
use crate::{bootstrap, mount_config};

/// The effects engine for one portfolio page.
///
/// `mount` attaches every unit whose DOM targets exist; units with missing
/// targets are skipped. `dispose` (or `free()` from JS) tears everything down:
/// frame requests, timers, listeners, and observers.
#[wasm_bindgen]
pub struct FolioPage {
    page: Page,
    theme: Option<ThemeHandle>,
}

#[wasm_bindgen]
impl FolioPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            page: Page::new(),
            theme: None,
        }
    }

    /// Mount the page, optionally overriding defaults with a JSON config.
    ///
    /// Mounting again disposes the previous units first. An invalid config
    /// rejects without touching the page.
    pub fn mount(&mut self, config_json: Option<String>) -> Result<(), JsValue> {
        let config = mount_config(config_json.as_deref())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        logging::install(LogConfig::default());
        self.dispose();
        let (page, theme) = bootstrap::mount(config);
        self.page = page;
        self.theme = Some(theme);
        Ok(())
    }

    /// Flip dark mode; returns whether the page is now dark.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> bool {
        self.theme.as_ref().is_some_and(ThemeHandle::toggle)
    }

    #[wasm_bindgen(js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.theme.as_ref().is_some_and(ThemeHandle::is_dark)
    }

    /// Names of the units still running, in mount order.
    #[wasm_bindgen(js_name = activeUnits)]
    pub fn active_units(&self) -> js_sys::Array {
        self.page
            .active_units()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Explicit teardown for JS callers.
    pub fn dispose(&mut self) {
        self.page.dispose();
        self.page = Page::new();
        self.theme = None;
    }
}

/// A running glitch or scramble started from JS.
#[wasm_bindgen]
pub struct TextEffect {
    run: TextRun,
}

#[wasm_bindgen]
impl TextEffect {
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.run.is_active()
    }

    /// Stop early, leaving the final text in place.
    pub fn cancel(&mut self) {
        self.run.cancel();
    }
}

fn host_rng() -> FxRng {
    FxRng::from_unit(js_sys::Math::random())
}

/// Corrupt and restore the element's text `intensity` times, each corruption
/// lasting `duration_ms`.
#[wasm_bindgen(js_name = glitchText)]
pub fn glitch_text(element: Element, intensity: u32, duration_ms: u32) -> TextEffect {
    let params = GlitchParams {
        intensity,
        duration: Duration::from_millis(u64::from(duration_ms)),
        ..GlitchParams::default()
    };
    TextEffect {
        run: text::glitch(element, params, host_rng()),
    }
}

/// Resolve random glyphs into `target` over `duration_ms`.
#[wasm_bindgen(js_name = scrambleText)]
pub fn scramble_text(
    element: Element,
    target: String,
    duration_ms: u32,
) -> Result<TextEffect, JsValue> {
    let duration = Duration::from_millis(u64::from(duration_ms));
    let run = text::scramble(element, target, duration, host_rng())?;
    Ok(TextEffect { run })
}
