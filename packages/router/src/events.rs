use std::{cell::RefCell, fmt, rc::Rc};

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

/// A handle to a callback registered on an [`EventEmitter`].
///
/// The handle stays valid no matter how the callback was created, so it can always be used to
/// remove exactly the callback it was returned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(usize);

struct Listeners<T> {
    next_id: usize,
    callbacks: Vec<(Subscription, Rc<dyn Fn(&T)>)>,
    channels: Vec<UnboundedSender<T>>,
}

/// A single-threaded publish/subscribe channel.
///
/// Emitting works on a snapshot of the registered callbacks, so callbacks may subscribe,
/// unsubscribe or emit again while they run. Changes made during an emission take effect for the
/// next one.
pub struct EventEmitter<T> {
    listeners: RefCell<Listeners<T>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Listeners {
                next_id: 0,
                callbacks: Vec::new(),
                channels: Vec::new(),
            }),
        }
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("EventEmitter")
            .field("callbacks", &listeners.callbacks.len())
            .field("channels", &listeners.channels.len())
            .finish()
    }
}

impl<T: Clone + 'static> EventEmitter<T> {
    /// Create an emitter without subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` with every future event.
    ///
    /// ```rust
    /// # use hashnav_router::EventEmitter;
    /// # use std::{cell::Cell, rc::Rc};
    /// let emitter = EventEmitter::new();
    /// let total = Rc::new(Cell::new(0));
    /// let subscription = emitter.subscribe({
    ///     let total = total.clone();
    ///     move |value: &i32| total.set(total.get() + value)
    /// });
    ///
    /// emitter.emit(2);
    /// assert!(emitter.unsubscribe(subscription));
    /// emitter.emit(40);
    /// assert_eq!(total.get(), 2);
    /// ```
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let subscription = Subscription(listeners.next_id);
        listeners.next_id += 1;
        listeners.callbacks.push((subscription, Rc::new(callback)));
        subscription
    }

    /// Remove the callback registered under `subscription`.
    ///
    /// Returns [`false`] if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.callbacks.len();
        listeners.callbacks.retain(|(id, _)| *id != subscription);
        listeners.callbacks.len() != before
    }

    /// Receive every future event on a stream.
    ///
    /// The stream is dropped from the emitter once its receiver is gone.
    pub fn channel(&self) -> UnboundedReceiver<T> {
        let (tx, rx) = unbounded();
        self.listeners.borrow_mut().channels.push(tx);
        rx
    }

    /// The number of registered callbacks and live streams.
    pub fn subscriber_count(&self) -> usize {
        let listeners = self.listeners.borrow();
        listeners.callbacks.len() + listeners.channels.len()
    }

    /// Deliver `value` to every subscriber.
    pub fn emit(&self, value: T) {
        let callbacks: Vec<_> = self
            .listeners
            .borrow()
            .callbacks
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in callbacks {
            callback(&value);
        }

        self.listeners
            .borrow_mut()
            .channels
            .retain(|tx| tx.unbounded_send(value.clone()).is_ok());
    }
}
