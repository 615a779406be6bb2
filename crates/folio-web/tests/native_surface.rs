//! Host-agnostic surface of the web binding: config parsing for
//! `FolioPage.mount`, page teardown, and the console log format.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use folio_fx::FxError;
use folio_web::logging::{CaptureWriter, ConsoleLayer, LogConfig};
use folio_web::{FolioPage, MountedUnit, Page, mount_config};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing::Level;
use tracing_subscriber::prelude::*;

#[test]
fn missing_or_blank_config_is_default() {
    let default = folio_fx::FolioConfig::default();
    assert_eq!(mount_config(None).expect("default"), default);
    assert_eq!(mount_config(Some("   ")).expect("blank"), default);
    assert_eq!(mount_config(Some("{}")).expect("empty object"), default);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let config =
        mount_config(Some(r#"{ "carousel": { "interval": 8000 }, "seed": 7 }"#)).expect("valid");
    assert_eq!(config.carousel.interval, Duration::from_millis(8000));
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.particles, folio_fx::FolioConfig::default().particles);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = mount_config(Some("{ particles: ")).expect_err("malformed");
    assert!(matches!(err, FxError::Config(_)), "{err}");
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{ "reveal": { "threshold": 2 } }"#,
        r#"{ "carousel": { "interval": 0 } }"#,
        r#"{ "text": { "phrases": [] } }"#,
        r#"{ "theme": { "storage_key": "" } }"#,
        r#"{ "particles": { "count": 18446744073709551615 } }"#,
        r#"{ "trail": { "max_points": 18446744073709551615 } }"#,
        r#"{ "ambient": { "burst": 5000 } }"#,
    ] {
        let err = mount_config(Some(json)).expect_err(json);
        assert!(matches!(err, FxError::Config(_)), "{json}: {err}");
    }
}

#[test]
fn native_page_validates_and_mounts_nothing() {
    let mut page = FolioPage::new();
    page.mount(Some(r#"{ "scroll": { "resize_debounce": 100 } }"#))
        .expect("valid config");
    assert!(page.mount(Some("42")).is_err());
    assert!(page.active_units().is_empty());
    page.dispose();
}

struct Counting {
    name: &'static str,
    stops: Rc<Cell<u32>>,
}

impl MountedUnit for Counting {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_active(&self) -> bool {
        self.stops.get() == 0
    }

    fn stop(&mut self) {
        self.stops.set(self.stops.get() + 1);
    }
}

#[test]
fn dispose_logs_once_at_info() {
    let writer = CaptureWriter::new();
    let layer = ConsoleLayer::with_config(writer.clone(), LogConfig::default());
    let stops = Rc::new(Cell::new(0));

    tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), || {
        let mut page = Page::new();
        for name in ["particles", "carousel"] {
            page.add(Box::new(Counting {
                name,
                stops: stops.clone(),
            }));
        }
        assert_eq!(page.active_units(), vec!["particles", "carousel"]);
        page.dispose();
        page.dispose();
    });

    assert_eq!(stops.get(), 2);
    assert_eq!(
        writer.lines(),
        vec![(Level::INFO, "INFO  page disposed count=2".to_string())]
    );
}

proptest! {
    #[test]
    fn thresholds_in_range_are_accepted(t in 0.0f64..0.99) {
        let json = format!(r#"{{ "reveal": {{ "threshold": {t} }} }}"#);
        let config = mount_config(Some(&json)).expect("in range");
        prop_assert!((config.reveal.threshold - t).abs() < 1e-9);
    }

    #[test]
    fn thresholds_above_one_are_rejected(t in 1.001f64..1000.0) {
        let json = format!(r#"{{ "reveal": {{ "threshold": {t} }} }}"#);
        prop_assert!(mount_config(Some(&json)).is_err());
    }
}
