#![forbid(unsafe_code)]

//! Structured log events emitted by the effect units.
//!
//! Each test installs a capturing layer for the duration of a closure and
//! checks the level and `unit` field of what was recorded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_core::geometry::Size;
use folio_core::rng::FxRng;
use folio_fx::effect::{ContinuousFx, FrameContext};
use folio_fx::matrix_rain::{MatrixConfig, MatrixRain};
use folio_fx::reveal::{Intersection, RevealKind, RevealObserver, RevealSpec};
use folio_fx::theme::{MemoryThemeStore, ThemeConfig, ThemeController};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn unavailable_store_warns_on_load_and_toggle() {
    let events = capture(|| {
        let (mut c, _) =
            ThemeController::load(MemoryThemeStore::unavailable(), ThemeConfig::default());
        c.toggle();
    });
    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.level == Level::WARN && e.field("unit") == Some("theme"))
        .collect();
    // Read failure, write failure on load, write failure on toggle.
    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().all(|e| e.field("store") == Some("MemoryThemeStore")));
    assert!(
        warnings
            .iter()
            .any(|e| e.field("message") == Some("theme flag not persisted"))
    );
}

#[test]
fn healthy_store_logs_no_warnings() {
    let events = capture(|| {
        let (mut c, _) = ThemeController::load(MemoryThemeStore::new(), ThemeConfig::default());
        c.toggle();
    });
    assert!(events.iter().all(|e| e.level != Level::WARN));
    let applied: Vec<_> = events
        .iter()
        .filter(|e| e.field("message") == Some("theme applied"))
        .collect();
    assert_eq!(applied.len(), 2);
    assert_eq!(applied[1].field("dark"), Some("true"));
}

#[test]
fn reveal_fire_is_traced_once() {
    let events = capture(|| {
        let mut obs = RevealObserver::new(Default::default());
        obs.observe(1u32, RevealSpec::animate(RevealKind::SlideInLeft));
        obs.on_intersection(&1, Intersection::VISIBLE);
        obs.on_intersection(&1, Intersection::VISIBLE);
    });
    let fired: Vec<_> = events
        .iter()
        .filter(|e| e.field("unit") == Some("reveal"))
        .collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].level, Level::TRACE);
}

#[test]
fn matrix_lifetime_end_is_logged() {
    let events = capture(|| {
        let mut rain = MatrixRain::new(
            MatrixConfig::easter_egg(),
            Size::new(140.0, 140.0),
            FxRng::from_seed(2),
        );
        rain.step(&FrameContext::new(
            1,
            std::time::Duration::from_secs(11),
            std::time::Duration::from_millis(33),
        ));
    });
    let matrix: Vec<_> = events
        .iter()
        .filter(|e| e.field("unit") == Some("matrix"))
        .collect();
    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix[0].field("columns"), Some("10"));
    assert_eq!(matrix[1].field("message"), Some("lifetime elapsed"));
}
