#![forbid(unsafe_code)]

//! ↑↑↓↓←→←→BA drops a faint matrix rain over the page for ten seconds.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::event::KeyCode;
use folio_core::key_sequence::KeySequenceDetector;
use folio_core::rng::FxRng;
use folio_fx::matrix_rain::{MatrixConfig, MatrixRain};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, KeyboardEvent};

use super::{CanvasUnit, ListenerUnit, MountContext};
use crate::dom;
use crate::frame_loop::Cadence;
use crate::listener::Listeners;
use crate::page::{MountedUnit, UnitSlot};
use crate::timer::Timeout;

const EGG_INTERVAL: Duration = Duration::from_millis(33);
const EGG_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     pointer-events: none; z-index: -1; opacity: 0.1;";

/// A running egg and the canvas it paints.
struct Egg {
    unit: CanvasUnit<MatrixRain>,
    canvas: HtmlCanvasElement,
}

impl MountedUnit for Egg {
    fn name(&self) -> &'static str {
        "konami-egg"
    }

    fn is_active(&self) -> bool {
        self.unit.is_active()
    }

    fn stop(&mut self) {
        self.unit.stop();
        self.canvas.remove();
    }
}

fn hatch(
    rng: FxRng,
    resize_debounce: Duration,
    on_end: impl FnOnce() + 'static,
) -> Result<Egg, JsValue> {
    let doc = dom::document()?;
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_attribute("style", EGG_STYLE)?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&canvas)?;

    let done = canvas.clone();
    let unit = CanvasUnit::mount(
        canvas.clone(),
        Cadence::Every(EGG_INTERVAL),
        resize_debounce,
        move |size| MatrixRain::new(MatrixConfig::easter_egg(), size, rng),
        move || {
            done.remove();
            on_end();
        },
    );
    match unit {
        Ok(unit) => Ok(Egg { unit, canvas }),
        Err(err) => {
            canvas.remove();
            Err(err)
        }
    }
}

/// Once the rain ends, drop the egg on the next task. The end hook runs inside
/// the egg's own ticker, which must not be dropped from there.
fn release_later(
    slot: Weak<RefCell<UnitSlot>>,
    reaper: &Rc<RefCell<Option<Timeout>>>,
) -> impl FnOnce() + 'static {
    let reaper = Rc::downgrade(reaper);
    move || {
        let timeout = Timeout::new(Duration::ZERO, move || {
            if let Some(slot) = slot.upgrade()
                && slot.borrow_mut().release_ended()
            {
                tracing::debug!(unit = "konami", "matrix rain released");
            }
        });
        match timeout {
            Ok(timeout) => {
                if let Some(reaper) = reaper.upgrade() {
                    *reaper.borrow_mut() = Some(timeout);
                }
            }
            Err(err) => {
                tracing::warn!(unit = "konami", error = ?err, "egg release not scheduled");
            }
        }
    }
}

/// Watches keydown for the Konami code.
pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let Ok(doc) = dom::document() else {
        return ListenerUnit::new("konami", Listeners::new());
    };
    let resize_debounce = ctx.config.scroll.resize_debounce;
    let mut seeds = ctx.rng();
    let mut detector = KeySequenceDetector::konami();
    let slot: Rc<RefCell<UnitSlot>> = Rc::default();
    let reaper: Rc<RefCell<Option<Timeout>>> = Rc::default();

    let mut listeners = Listeners::new();
    listeners.on(doc.as_ref(), "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if !detector.feed(KeyCode::from_dom_key(&key)) {
            return;
        }
        tracing::info!(unit = "konami", "sequence matched");
        let rng = FxRng::from_seed(seeds.next_u32());
        // A previous egg clears its canvas first.
        slot.borrow_mut().clear();
        let on_end = release_later(Rc::downgrade(&slot), &reaper);
        match hatch(rng, resize_debounce, on_end) {
            Ok(egg) => slot.borrow_mut().replace(Box::new(egg)),
            Err(err) => tracing::warn!(unit = "konami", error = ?err, "matrix rain not started"),
        }
    });
    ListenerUnit::new("konami", listeners)
}
