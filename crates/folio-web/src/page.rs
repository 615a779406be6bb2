#![forbid(unsafe_code)]

//! The set of units mounted on a page.

use std::fmt;

/// A running unit bound to the page: a frame loop, timer, listener set, or
/// observer, plus the effect state it drives.
///
/// `stop` releases every browser registration the unit holds. Units also
/// release them on drop, so dropping the [`Page`] is a full teardown.
pub trait MountedUnit {
    fn name(&self) -> &'static str;

    fn is_active(&self) -> bool;

    fn stop(&mut self);
}

/// Owns every mounted unit.
#[derive(Default)]
pub struct Page {
    units: Vec<Box<dyn MountedUnit>>,
    disposed: bool,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a unit. Ignored once the page is disposed.
    pub fn add(&mut self, unit: Box<dyn MountedUnit>) {
        if self.disposed {
            tracing::debug!(unit = unit.name(), "page disposed; dropping unit");
            return;
        }
        tracing::debug!(unit = unit.name(), active = unit.is_active(), "unit mounted");
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Names of units that are still running, in mount order.
    pub fn active_units(&self) -> Vec<&'static str> {
        self.units
            .iter()
            .filter(|u| u.is_active())
            .map(|u| u.name())
            .collect()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stop and drop every unit, newest first.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let count = self.units.len();
        while let Some(mut unit) = self.units.pop() {
            unit.stop();
        }
        self.disposed = true;
        tracing::info!(count, "page disposed");
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Holds at most one unit that can end on its own, such as a timed overlay.
///
/// Replacing or clearing stops the held unit. [`UnitSlot::release_ended`]
/// drops it once it has gone inactive, so its registrations do not outlive
/// the effect.
#[derive(Default)]
pub struct UnitSlot {
    unit: Option<Box<dyn MountedUnit>>,
}

impl UnitSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self) -> bool {
        self.unit.is_some()
    }

    /// Stop the held unit, if any, and hold `unit` instead.
    pub fn replace(&mut self, unit: Box<dyn MountedUnit>) {
        self.clear();
        self.unit = Some(unit);
    }

    pub fn clear(&mut self) {
        if let Some(mut unit) = self.unit.take() {
            unit.stop();
        }
    }

    /// Stop and drop the held unit if it has ended. Returns whether one was
    /// released.
    pub fn release_ended(&mut self) -> bool {
        if self.unit.as_ref().is_some_and(|u| !u.is_active()) {
            self.clear();
            return true;
        }
        false
    }
}

impl Drop for UnitSlot {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("units", &self.units.iter().map(|u| u.name()).collect::<Vec<_>>())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type StopLog = Rc<RefCell<Vec<&'static str>>>;

    struct Stub {
        name: &'static str,
        active: Rc<Cell<bool>>,
        log: StopLog,
    }

    impl MountedUnit for Stub {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_active(&self) -> bool {
            self.active.get()
        }

        fn stop(&mut self) {
            self.active.set(false);
            self.log.borrow_mut().push(self.name);
        }
    }

    fn stub(name: &'static str, active: bool, log: &StopLog) -> Box<Stub> {
        Box::new(Stub {
            name,
            active: Rc::new(Cell::new(active)),
            log: log.clone(),
        })
    }

    #[test]
    fn active_units_skip_disabled() {
        let log = Rc::default();
        let mut page = Page::new();
        page.add(stub("particles", true, &log));
        page.add(stub("carousel", false, &log));
        page.add(stub("theme", true, &log));
        assert_eq!(page.active_units(), vec!["particles", "theme"]);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn dispose_stops_newest_first_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::new();
        page.add(stub("a", true, &log));
        page.add(stub("b", true, &log));
        page.dispose();
        page.dispose();
        assert_eq!(*log.borrow(), vec!["b", "a"]);
        assert!(page.is_empty());
        assert!(page.active_units().is_empty());
    }

    #[test]
    fn add_after_dispose_is_ignored() {
        let log = Rc::default();
        let mut page = Page::new();
        page.dispose();
        page.add(stub("late", true, &log));
        assert!(page.is_empty());
    }

    #[test]
    fn drop_disposes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut page = Page::new();
            page.add(stub("trail", true, &log));
        }
        assert_eq!(*log.borrow(), vec!["trail"]);
    }

    #[test]
    fn slot_releases_a_unit_once_it_ends() {
        let log = StopLog::default();
        let running = Rc::new(Cell::new(true));
        let mut slot = UnitSlot::new();
        slot.replace(Box::new(Stub {
            name: "egg",
            active: running.clone(),
            log: log.clone(),
        }));

        assert!(!slot.release_ended());
        assert!(slot.is_occupied());

        // The effect ran out on its own.
        running.set(false);
        assert!(slot.release_ended());
        assert!(!slot.is_occupied());
        assert_eq!(*log.borrow(), vec!["egg"]);
        assert!(!slot.release_ended());
    }

    #[test]
    fn slot_replace_stops_previous() {
        let log = StopLog::default();
        let mut slot = UnitSlot::new();
        slot.replace(stub("first", true, &log));
        slot.replace(stub("second", true, &log));
        assert_eq!(*log.borrow(), vec!["first"]);
        drop(slot);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
