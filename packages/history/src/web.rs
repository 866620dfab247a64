use std::{cell::RefCell, rc::Rc};

use gloo::{events::EventListener, utils::window};
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{HashChangeEvent, Window};

use crate::{strip_hash, HashLocation};

/// A [`HashLocation`] backed by the browser's [Location API] and its `hashchange` event.
///
/// Notifications are delivered by the browser's event loop, never synchronously from
/// [`HashLocation::set_hash`].
///
/// [Location API]: https://developer.mozilla.org/en-US/docs/Web/API/Location
pub struct WebHashLocation {
    listeners: RefCell<Vec<EventListener>>,
    window: Window,
}

impl Default for WebHashLocation {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            window: window(),
        }
    }
}

impl HashLocation for WebHashLocation {
    fn hash(&self) -> String {
        match self.window.location().hash() {
            Ok(hash) => strip_hash(&hash).to_string(),
            Err(e) => {
                error!("failed to read the location hash: {e:?}");
                String::new()
            }
        }
    }

    fn set_hash(&self, fragment: &str) {
        if let Err(e) = self.window.location().set_hash(strip_hash(fragment)) {
            error!("failed to set the location hash to `{fragment}`: {e:?}");
        }
    }

    fn on_hash_change(&self, callback: Rc<dyn Fn(&str)>) {
        let window = self.window.clone();
        let listener = EventListener::new(&self.window, "hashchange", move |event| {
            // the event is delivered late, so prefer the URL it was fired for
            let fragment = match event.dyn_ref::<HashChangeEvent>() {
                Some(event) => fragment_of(&event.new_url()).to_string(),
                None => window
                    .location()
                    .hash()
                    .map(|hash| strip_hash(&hash).to_string())
                    .unwrap_or_default(),
            };
            callback(&fragment);
        });
        self.listeners.borrow_mut().push(listener);
    }
}

/// The fragment of `url`, without the `#`, or an empty string if it has none.
fn fragment_of(url: &str) -> &str {
    url.split_once('#').map_or("", |(_, fragment)| fragment)
}
