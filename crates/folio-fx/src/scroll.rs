#![forbid(unsafe_code)]

//! Scroll-driven page chrome: progress bar, back-to-top button, parallax,
//! smooth anchor scrolling, and the mobile navigation menu.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::animation::{Animation, Tween, ease_in_out_cubic};

use crate::config::millis;
use crate::error::{FxError, FxResult};
use crate::style::{ClassToggle, Transform, TransformFn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_after: f64,
    pub hero_speed: f64,
    /// Speed for `[data-parallax]` elements without a usable value.
    pub default_parallax_speed: f64,
    #[serde(with = "millis")]
    pub smooth_scroll_duration: Duration,
    #[serde(with = "millis")]
    pub resize_debounce: Duration,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            back_to_top_after: 300.0,
            hero_speed: 0.5,
            default_parallax_speed: 0.5,
            smooth_scroll_duration: Duration::from_millis(1000),
            resize_debounce: Duration::from_millis(250),
        }
    }
}

/// Width of the scroll progress bar in percent.
pub fn progress_percent(scroll_top: f64, doc_height: f64, viewport_height: f64) -> f64 {
    let scrollable = doc_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn back_to_top_visible(scroll_top: f64, config: &ScrollConfig) -> bool {
    scroll_top > config.back_to_top_after
}

/// Class toggle for the back-to-top button.
pub fn back_to_top_class(scroll_top: f64, config: &ScrollConfig) -> ClassToggle {
    ClassToggle::new("visible", back_to_top_visible(scroll_top, config))
}

/// The hero background moves down at a fraction of the scroll speed.
pub fn hero_parallax(scroll_top: f64, config: &ScrollConfig) -> Transform {
    Transform::of(TransformFn::TranslateY(scroll_top * config.hero_speed))
}

/// `[data-parallax]` elements move up against the scroll.
pub fn data_parallax(scroll_top: f64, speed: f64) -> Transform {
    Transform::of(TransformFn::TranslateY(-(scroll_top * speed)))
}

/// Parse a `data-parallax` speed.
pub fn parse_parallax_speed(attr: Option<&str>) -> FxResult<Option<f64>> {
    match attr.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(FxError::invalid_attribute("data-parallax", raw)),
        },
    }
}

/// Speed for an element, falling back to the configured default when the
/// attribute is missing or unusable.
pub fn parallax_speed(attr: Option<&str>, config: &ScrollConfig) -> f64 {
    match parse_parallax_speed(attr) {
        Ok(Some(v)) => v,
        Ok(None) => config.default_parallax_speed,
        Err(e) => {
            tracing::debug!(unit = "parallax", error = %e, "falling back to default speed");
            config.default_parallax_speed
        }
    }
}

// ---------------------------------------------------------------------------
// Smooth scroll
// ---------------------------------------------------------------------------

/// Animated window scroll toward an anchor.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    tween: Tween,
}

impl SmoothScroll {
    pub fn new(start: f64, target: f64, config: &ScrollConfig) -> Self {
        Self {
            tween: Tween::new(start, target, config.smooth_scroll_duration)
                .easing(ease_in_out_cubic),
        }
    }

    /// Advance by `dt`; returns the scroll offset to apply.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        self.tween.tick(dt);
        self.tween.current()
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    pub fn target(&self) -> f64 {
        self.tween.to()
    }
}

// ---------------------------------------------------------------------------
// Mobile nav
// ---------------------------------------------------------------------------

/// Hamburger menu state. The same `active` class goes on both the menu and
/// the hamburger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub const CLASS: &'static str = "active";

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> ClassToggle {
        self.open = !self.open;
        ClassToggle::new(Self::CLASS, self.open)
    }

    pub fn close(&mut self) -> ClassToggle {
        self.open = false;
        ClassToggle::new(Self::CLASS, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn progress_bar_width() {
        assert_eq!(progress_percent(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(progress_percent(1500.0, 2000.0, 1000.0), 100.0);
        assert_eq!(progress_percent(-20.0, 2000.0, 1000.0), 0.0);
        assert_eq!(progress_percent(10.0, 800.0, 1000.0), 0.0);
        assert_eq!(progress_percent(10.0, 1000.0, 1000.0), 0.0);
    }

    #[test]
    fn back_to_top_threshold() {
        let c = ScrollConfig::default();
        assert!(!back_to_top_visible(300.0, &c));
        assert!(back_to_top_visible(301.0, &c));
        assert_eq!(back_to_top_class(0.0, &c), ClassToggle::new("visible", false));
    }

    #[test]
    fn parallax_transforms() {
        let c = ScrollConfig::default();
        assert_eq!(hero_parallax(200.0, &c).to_css(), "translateY(100px)");
        assert_eq!(data_parallax(200.0, 0.25).to_css(), "translateY(-50px)");
        assert_eq!(data_parallax(0.0, 0.25).to_css(), "translateY(0px)");
    }

    #[test]
    fn parallax_speed_attribute() {
        let c = ScrollConfig::default();
        assert_eq!(parallax_speed(Some("0.2"), &c), 0.2);
        assert_eq!(parallax_speed(None, &c), 0.5);
        assert_eq!(parallax_speed(Some("fast"), &c), 0.5);
        assert!(parse_parallax_speed(Some("fast")).is_err());
        assert_eq!(parse_parallax_speed(Some(" ")).expect("blank"), None);
    }

    #[test]
    fn smooth_scroll_lands_on_target() {
        let mut s = SmoothScroll::new(0.0, 1200.0, &ScrollConfig::default());
        let mid = s.tick(Duration::from_millis(500));
        assert!((mid - 600.0).abs() < 1.0);
        let mut last = mid;
        for _ in 0..40 {
            let y = s.tick(Duration::from_millis(16));
            assert!(y >= last);
            last = y;
        }
        assert_eq!(s.tick(Duration::from_millis(500)), 1200.0);
        assert!(s.is_complete());
    }

    #[test]
    fn nav_menu_toggles_and_closes() {
        let mut nav = NavMenu::default();
        assert!(nav.toggle().on);
        assert!(nav.is_open());
        assert!(!nav.toggle().on);
        nav.toggle();
        assert_eq!(nav.close(), ClassToggle::new("active", false));
        assert!(!nav.is_open());
    }
}
