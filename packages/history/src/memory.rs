use std::{cell::RefCell, rc::Rc};

use tracing::trace;

use crate::{strip_hash, HashLocation};

struct MemoryHashState {
    current: String,
    writes: Vec<String>,
    listeners: Vec<Rc<dyn Fn(&str)>>,
}

/// A [`HashLocation`] that keeps the fragment in memory.
///
/// Useful for tests and for hosts that have no browser location. Listeners are called
/// synchronously from [`HashLocation::set_hash`], but only when the fragment actually changes.
pub struct MemoryHashLocation {
    state: RefCell<MemoryHashState>,
}

impl Default for MemoryHashLocation {
    fn default() -> Self {
        Self::with_initial_hash("")
    }
}

impl MemoryHashLocation {
    /// Create a [`MemoryHashLocation`] starting at `fragment`.
    ///
    /// ```rust
    /// # use hashnav_history::{HashLocation, MemoryHashLocation};
    /// let location = MemoryHashLocation::with_initial_hash("about");
    /// assert_eq!(location.hash(), "about");
    /// assert!(location.writes().is_empty());
    /// ```
    pub fn with_initial_hash(fragment: impl AsRef<str>) -> Self {
        Self {
            state: RefCell::new(MemoryHashState {
                current: strip_hash(fragment.as_ref()).to_string(),
                writes: Vec::new(),
                listeners: Vec::new(),
            }),
        }
    }

    /// Every fragment written through [`HashLocation::set_hash`], oldest first.
    ///
    /// Writes of the already-current fragment are recorded too, even though they notify nobody.
    pub fn writes(&self) -> Vec<String> {
        self.state.borrow().writes.clone()
    }

    /// The number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl HashLocation for MemoryHashLocation {
    fn hash(&self) -> String {
        self.state.borrow().current.clone()
    }

    fn set_hash(&self, fragment: &str) {
        let fragment = strip_hash(fragment);
        let listeners = {
            let mut state = self.state.borrow_mut();
            state.writes.push(fragment.to_string());

            // browsers don't fire `hashchange` when the fragment stays the same
            if state.current == fragment {
                trace!(fragment, "hash unchanged, not notifying");
                return;
            }

            state.current = fragment.to_string();
            state.listeners.clone()
        };

        for listener in listeners {
            listener(fragment);
        }
    }

    fn on_hash_change(&self, callback: Rc<dyn Fn(&str)>) {
        self.state.borrow_mut().listeners.push(callback);
    }
}
