use std::{cell::RefCell, rc::Rc};

use tracing::trace;

use crate::{DocumentError, RouteMarker, ViewDocument};

/// The half of an exchange an observer is called for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangePhase {
    /// Called before the first marker is changed.
    Before,
    /// Called after the marker change it brackets.
    After,
}

/// Moves the active marker from one view container to another.
///
/// A single observer can be installed to run code right before and right after each exchange.
#[derive(Default)]
pub struct ViewExchanger {
    observer: RefCell<Option<Rc<dyn Fn(ExchangePhase)>>>,
}

impl ViewExchanger {
    /// Create an exchanger without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the observer, replacing any previous one.
    pub fn set_observer(&self, observer: impl Fn(ExchangePhase) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    fn notify(&self, phase: ExchangePhase) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(phase);
        }
    }

    /// Make `target` the active container.
    ///
    /// On the initial load the observer brackets the activation of `target`. Afterwards it
    /// brackets the deactivation of the currently active container, and `target` is activated
    /// once the observer is done. If no container is active outside the initial load, the
    /// observer runs twice in a row and `target` is activated.
    ///
    /// `target` is not validated beforehand; a missing container surfaces as the error of the
    /// failing marker change, after which no further step runs.
    pub fn exchange(
        &self,
        document: &dyn ViewDocument,
        target: &str,
        initial_load: bool,
    ) -> Result<(), DocumentError> {
        if initial_load {
            trace!(target, "initial exchange");
            self.notify(ExchangePhase::Before);
            document.set_route_marker(target, RouteMarker::Active)?;
            self.notify(ExchangePhase::After);
            return Ok(());
        }

        match document.active_view() {
            Some(previous) => {
                trace!(%previous, target, "exchanging views");
                self.notify(ExchangePhase::Before);
                document.set_route_marker(&previous, RouteMarker::Inactive)?;
                self.notify(ExchangePhase::After);
                document.set_route_marker(target, RouteMarker::Active)
            }
            None => {
                trace!(target, "no active view, exchanging without deactivation");
                self.notify(ExchangePhase::Before);
                self.notify(ExchangePhase::After);
                document.set_route_marker(target, RouteMarker::Active)
            }
        }
    }
}
