#![warn(missing_docs)]
//! Hash-fragment location providers for hashnav.
//!
//! The router never talks to `window.location` directly. Instead it relies on a [`HashLocation`],
//! which reads and writes the fragment after `#` and tells the router when that fragment changed.
//! This crate ships an in-memory provider for tests and non-browser hosts, a browser provider
//! behind the `web` feature, and the [`NavigationHistory`] stacks the router uses for back and
//! forward navigation.

use std::rc::Rc;

mod memory;
pub use memory::*;

mod stack;
pub use stack::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// An integration with the fragment part of a document location.
///
/// Implementations must mimic the browser: writing the fragment that is already current does not
/// notify anybody, and notifications are delivered after the new fragment is readable through
/// [`HashLocation::hash`].
pub trait HashLocation {
    /// Get the current fragment, without the leading `#`.
    ///
    /// ```rust
    /// # use hashnav_history::{HashLocation, MemoryHashLocation};
    /// let location = MemoryHashLocation::with_initial_hash("#blog");
    /// assert_eq!(location.hash(), "blog");
    /// ```
    #[must_use]
    fn hash(&self) -> String;

    /// Replace the current fragment.
    ///
    /// A leading `#` in `fragment` is ignored.
    fn set_hash(&self, fragment: &str);

    /// Register a callback fired every time the fragment changes.
    ///
    /// The callback receives the fragment the location changed to, without the leading `#`. When
    /// several changes are delivered late, each callback still sees its own fragment, not the
    /// latest one.
    ///
    /// Callbacks must only do cheap work (like queueing a message). The fragment might be changed
    /// again from inside the callback.
    fn on_hash_change(&self, callback: Rc<dyn Fn(&str)>);
}

/// Strip the `#` a fragment may carry when it comes straight from a URL.
pub(crate) fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}
