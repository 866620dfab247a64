use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use tracing::{debug, trace};

use crate::EventEmitter;

/// The phases an application goes through while booting.
///
/// Phases are ordered and only ever advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lifecycle {
    /// Nothing has been mounted yet.
    #[default]
    Starting,
    /// The root of the application is mounted.
    Started,
    /// Every resource the application needs is in place. The router boots on this phase.
    Restored,
    /// The router has shown the first page; the application is interactive.
    Ready,
}

/// The application-wide lifecycle broadcaster.
///
/// A phase requested while subscribers are still being told about the previous one is queued
/// and announced once they are done, so every subscriber sees the phases in order and
/// [`LifecycleEvents::phase`] always matches the phase being announced.
#[derive(Debug, Default)]
pub struct LifecycleEvents {
    phase: Cell<Lifecycle>,
    queued: RefCell<VecDeque<Lifecycle>>,
    emitting: Cell<bool>,
    on_phase_did_change: EventEmitter<Lifecycle>,
}

impl LifecycleEvents {
    /// Create a broadcaster in [`Lifecycle::Starting`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> Lifecycle {
        self.phase.get()
    }

    /// Advance to `phase` and notify subscribers.
    ///
    /// Repeating the current phase or going back to an earlier one is ignored.
    ///
    /// ```rust
    /// # use hashnav_router::{Lifecycle, LifecycleEvents};
    /// let events = LifecycleEvents::new();
    /// events.set_phase(Lifecycle::Restored);
    /// events.set_phase(Lifecycle::Started);
    /// assert_eq!(events.phase(), Lifecycle::Restored);
    /// ```
    pub fn set_phase(&self, phase: Lifecycle) {
        let latest = self
            .queued
            .borrow()
            .back()
            .copied()
            .unwrap_or(self.phase.get());
        if phase <= latest {
            debug!(current = ?latest, requested = ?phase, "ignoring lifecycle transition");
            return;
        }

        self.queued.borrow_mut().push_back(phase);
        if self.emitting.replace(true) {
            trace!(?phase, "lifecycle transition queued behind the current one");
            return;
        }

        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(next) = next else {
                break;
            };
            debug!(from = ?self.phase.get(), to = ?next, "lifecycle phase changed");
            self.phase.set(next);
            self.on_phase_did_change.emit(next);
        }
        self.emitting.set(false);
    }

    /// The stream of phase changes.
    pub fn on_phase_did_change(&self) -> &EventEmitter<Lifecycle> {
        &self.on_phase_did_change
    }
}
