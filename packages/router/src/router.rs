use std::{
    cell::{Cell, RefCell},
    collections::{hash_map::Entry, HashMap},
    future::poll_fn,
    rc::{Rc, Weak},
};

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use hashnav_history::{HashLocation, NavigationHistory};
use tracing::{debug, error, trace, warn};

use crate::{
    DocumentError, EventEmitter, ExchangePhase, HashFragmentKey, Lifecycle, LifecycleEvents, NavigationState,
    RouteId, RouteTable, RouterConfig, RouterError, RouterLifecycle, RouterState, Subscription,
    UnknownHashPolicy, ViewDocument, ViewExchanger,
};

/// The payload carried across a navigation to the navigation hook of the target route.
pub type NavigationData = serde_json::Value;

/// What a navigation hook receives.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationHookArgs {
    /// The data handed to [`Router::navigate_to_route`], or [`NavigationData::Null`] if the route
    /// was reached some other way.
    pub data: NavigationData,

    /// The nature of the navigation.
    pub navigation_state: NavigationState,
}

/// A set of messages that the [`Router`] can handle.
enum RouterMessage {
    /// The location fragment changed to the contained fragment.
    HashChanged(String),
}

type NavigationCallback = Rc<dyn Fn()>;
type NavigationHook = Rc<dyn Fn(NavigationHookArgs)>;

struct LifecycleBinding {
    events: Rc<LifecycleEvents>,
    subscription: Option<Subscription>,
}

struct RouterInner {
    config: RouterConfig,
    table: RouteTable,
    document: Rc<dyn ViewDocument>,
    location: Rc<dyn HashLocation>,
    exchanger: ViewExchanger,
    tx: UnboundedSender<RouterMessage>,
    rx: RefCell<UnboundedReceiver<RouterMessage>>,

    lifecycle: Cell<RouterLifecycle>,
    navigation_state: Cell<NavigationState>,
    current_route: RefCell<RouteId>,
    active_route: RefCell<Option<RouteId>>,
    history: RefCell<NavigationHistory<RouteId>>,
    traversal: RefCell<Option<RouteId>>,
    pending_data: RefCell<HashMap<HashFragmentKey, NavigationData>>,

    before_navigation: RefCell<Option<NavigationCallback>>,
    after_navigation: RefCell<Option<NavigationCallback>>,
    hooks: RefCell<HashMap<RouteId, NavigationHook>>,
    route_changed: EventEmitter<RouteId>,
    binding: RefCell<Option<LifecycleBinding>>,
}

/// The core of the router.
///
/// This combines the declared routes, a [`ViewDocument`] and a [`HashLocation`] to decide which
/// view container is shown for the current fragment, and tells interested parties about every
/// navigation.
///
/// # Lifecycle
/// A router starts out [`RouterLifecycle::Initializing`]. Once the application reaches
/// [`Lifecycle::Restored`] (see [`Router::attach`]) or [`Router::bootstrap`] is called, it loads
/// the page for the current fragment and becomes [`RouterLifecycle::Restored`]. Only then are
/// fragment changes handled.
///
/// # Fragment changes
/// Every fragment change queues a message carrying the new fragment. The queue is worked off by
/// [`Router::process_pending`] or by the [`Router::run`] loop, in order, so changing the fragment
/// and seeing the new view are always two separate steps.
///
/// The router is a cheap handle; clones share the same state.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Create a new [`Router`].
    ///
    /// Fails if no routes are declared, if the home or not-found route is missing, or if
    /// `document` has no container for one of the declared views.
    pub fn new(
        config: RouterConfig,
        document: Rc<dyn ViewDocument>,
        location: Rc<dyn HashLocation>,
    ) -> Result<Self, RouterError> {
        config.validate()?;
        let table = RouteTable::build(config.routes());
        if let Some((_, view)) = table.iter().find(|(_, view)| !document.has_view(view)) {
            return Err(DocumentError::ViewNotFound(view.to_string()).into());
        }
        debug!(routes = table.len(), "route table built");

        let (tx, rx) = unbounded();
        location.on_hash_change(Rc::new({
            let tx = tx.clone();
            move |fragment: &str| {
                if tx
                    .unbounded_send(RouterMessage::HashChanged(fragment.to_string()))
                    .is_err()
                {
                    trace!("router is gone, dropping hash change");
                }
            }
        }));

        let current_route = config.home().clone();
        Ok(Self {
            inner: Rc::new(RouterInner {
                config,
                table,
                document,
                location,
                exchanger: ViewExchanger::new(),
                tx,
                rx: RefCell::new(rx),
                lifecycle: Cell::new(RouterLifecycle::Initializing),
                navigation_state: Cell::new(NavigationState::Static),
                current_route: RefCell::new(current_route),
                active_route: RefCell::new(None),
                history: RefCell::new(NavigationHistory::new()),
                traversal: RefCell::new(None),
                pending_data: RefCell::new(HashMap::new()),
                before_navigation: RefCell::new(None),
                after_navigation: RefCell::new(None),
                hooks: RefCell::new(HashMap::new()),
                route_changed: EventEmitter::new(),
                binding: RefCell::new(None),
            }),
        })
    }

    /// Create a [`Router`] working on the browser's document and location.
    ///
    /// The containers for every declared view must already be in the document.
    #[cfg(feature = "web")]
    pub fn web(config: RouterConfig) -> Result<Self, RouterError> {
        let document = Rc::new(crate::WebDocument::new()?);
        let location = Rc::new(hashnav_history::WebHashLocation::default());
        Self::new(config, document, location)
    }

    /// Spawn [`Router::run`] on the browser's event loop.
    #[cfg(feature = "web")]
    pub fn spawn(&self) {
        let router = self.clone();
        wasm_bindgen_futures::spawn_local(async move { router.run().await });
    }

    /// Boot once `events` reaches [`Lifecycle::Restored`].
    ///
    /// The router listens for exactly one phase change to [`Lifecycle::Restored`], removes its
    /// listener, boots, and then moves `events` on to [`Lifecycle::Ready`]. If `events` is already
    /// at or past [`Lifecycle::Restored`], the router boots right away.
    pub fn attach(&self, events: Rc<LifecycleEvents>) {
        if self.inner.binding.borrow().is_some() {
            warn!("router is already attached to a lifecycle; ignoring");
            return;
        }

        if events.phase() >= Lifecycle::Restored {
            *self.inner.binding.borrow_mut() = Some(LifecycleBinding {
                events,
                subscription: None,
            });
            self.bootstrap();
            return;
        }

        let router = Rc::downgrade(&self.inner);
        let subscription = events.on_phase_did_change().subscribe(move |phase| {
            if *phase != Lifecycle::Restored {
                return;
            }
            if let Some(router) = upgrade(&router) {
                router.on_restored();
            }
        });

        *self.inner.binding.borrow_mut() = Some(LifecycleBinding {
            events,
            subscription: Some(subscription),
        });
    }

    fn on_restored(&self) {
        let detached = {
            let mut binding = self.inner.binding.borrow_mut();
            binding.as_mut().and_then(|binding| {
                let subscription = binding.subscription.take()?;
                Some((binding.events.clone(), subscription))
            })
        };

        if let Some((events, subscription)) = detached {
            events.on_phase_did_change().unsubscribe(subscription);
        }

        self.bootstrap();
    }

    /// Load the page for the current fragment and start handling fragment changes.
    ///
    /// Runs once; later calls only log a warning.
    pub fn bootstrap(&self) {
        if self.inner.lifecycle.get() != RouterLifecycle::Initializing {
            warn!("router bootstrap requested twice; ignoring");
            return;
        }

        self.wire_exchange_observer();

        self.inner.lifecycle.set(RouterLifecycle::Loading);
        self.load_current_hash(true);

        self.inner.lifecycle.set(RouterLifecycle::Restored);
        // the initial load already reflects any fragment change queued before this point
        while let Ok(Some(_)) = self.inner.rx.borrow_mut().try_next() {}
        debug!(route = %self.current_route(), "router restored");

        let events = self
            .inner
            .binding
            .borrow()
            .as_ref()
            .map(|binding| binding.events.clone());
        if let Some(events) = events {
            events.set_phase(Lifecycle::Ready);
        }
    }

    fn wire_exchange_observer(&self) {
        let router = Rc::downgrade(&self.inner);
        self.inner.exchanger.set_observer(move |phase| {
            let Some(router) = router.upgrade() else {
                return;
            };
            let callback = match phase {
                ExchangePhase::Before => router.before_navigation.borrow().clone(),
                ExchangePhase::After => router.after_navigation.borrow().clone(),
            };
            if let Some(callback) = callback {
                callback();
            }
        });
    }

    /// Register the callback run right before every view exchange.
    ///
    /// Only the first registration takes effect.
    pub fn before_route_navigation(&self, callback: impl Fn() + 'static) {
        let mut slot = self.inner.before_navigation.borrow_mut();
        if slot.is_some() {
            debug!("before-navigation callback already registered; ignoring");
            return;
        }
        *slot = Some(Rc::new(callback));
    }

    /// Register the callback run right after the marker change of every view exchange.
    ///
    /// Only the first registration takes effect.
    pub fn after_route_navigation(&self, callback: impl Fn() + 'static) {
        let mut slot = self.inner.after_navigation.borrow_mut();
        if slot.is_some() {
            debug!("after-navigation callback already registered; ignoring");
            return;
        }
        *slot = Some(Rc::new(callback));
    }

    /// Register a hook that receives the navigation data whenever `route` is shown.
    ///
    /// Only the first hook registered for a route takes effect.
    pub fn navigation_hook(
        &self,
        route: impl Into<RouteId>,
        hook: impl Fn(NavigationHookArgs) + 'static,
    ) {
        match self.inner.hooks.borrow_mut().entry(route.into()) {
            Entry::Occupied(entry) => {
                debug!(route = %entry.key(), "navigation hook already registered; ignoring");
            }
            Entry::Vacant(entry) => {
                entry.insert(Rc::new(hook));
            }
        }
    }

    /// Navigate to `route`, handing `data` to its navigation hook.
    ///
    /// This only points the location at the route. The view is exchanged once the resulting
    /// fragment change is processed. Navigating to the route the location already points at
    /// queues the change directly, so the route is shown again. Unknown routes lead to the
    /// not-found route.
    pub fn navigate_to_route(&self, route: impl Into<RouteId>, data: NavigationData) {
        let route = route.into();
        let key = HashFragmentKey::from(&route);

        if !self.inner.table.contains(&key) {
            debug!(%route, "navigation to unknown route; redirecting to not-found");
            self.set_location(self.inner.config.not_found());
            return;
        }

        debug!(%route, "navigating");
        self.inner.pending_data.borrow_mut().insert(key, data);
        *self.inner.current_route.borrow_mut() = route.clone();
        self.set_location(&route);
    }

    /// Navigate to the previously shown route, if there is one.
    ///
    /// Like [`Router::navigate_to_route`], the view changes once the fragment change is processed.
    pub fn go_back(&self) -> bool {
        self.traverse(|history, current| history.go_back(current))
    }

    /// Navigate to the route left by [`Router::go_back`], if there is one.
    pub fn go_forward(&self) -> bool {
        self.traverse(|history, current| history.go_forward(current))
    }

    fn traverse(
        &self,
        step: impl FnOnce(&mut NavigationHistory<RouteId>, RouteId) -> Option<RouteId>,
    ) -> bool {
        let Some(active) = self.inner.active_route.borrow().clone() else {
            return false;
        };
        let Some(target) = step(&mut *self.inner.history.borrow_mut(), active) else {
            return false;
        };

        *self.inner.traversal.borrow_mut() = Some(target.clone());
        *self.inner.current_route.borrow_mut() = target.clone();
        self.set_location(&target);
        true
    }

    /// Work off every queued fragment change.
    ///
    /// Returns the number of changes handled.
    pub fn process_pending(&self) -> usize {
        let mut handled = 0;
        loop {
            let message = self.inner.rx.borrow_mut().try_next();
            match message {
                Ok(Some(RouterMessage::HashChanged(fragment))) => {
                    self.hash_changed(&fragment);
                    handled += 1;
                }
                Ok(None) | Err(_) => return handled,
            }
        }
    }

    /// The router's event loop.
    ///
    /// Handles fragment changes in the order they are queued. Never returns; the router keeps
    /// its own end of the queue.
    pub async fn run(&self) {
        loop {
            let message = poll_fn(|cx| self.inner.rx.borrow_mut().poll_next_unpin(cx)).await;
            match message {
                Some(RouterMessage::HashChanged(fragment)) => self.hash_changed(&fragment),
                None => return,
            }
        }
    }

    /// Show the view for the current fragment.
    ///
    /// For hosts that deliver fragment changes themselves. Does nothing until the router is
    /// restored.
    pub fn handle_hash_change(&self) {
        let fragment = self.inner.location.hash();
        self.hash_changed(&fragment);
    }

    fn hash_changed(&self, fragment: &str) {
        if self.inner.lifecycle.get() != RouterLifecycle::Restored {
            trace!(fragment, "hash changed before the router was restored; ignoring");
            return;
        }
        self.load_fragment(fragment, false);
    }

    fn load_current_hash(&self, initial_load: bool) {
        let fragment = self.inner.location.hash();
        self.load_fragment(&fragment, initial_load);
    }

    fn load_fragment(&self, fragment: &str, initial_load: bool) {
        let key = HashFragmentKey::new(fragment);

        if key.is_root() {
            let home = HashFragmentKey::from(self.inner.config.home());
            self.show(&home, initial_load);
            return;
        }

        if self.inner.table.contains(&key) {
            self.show(&key, false);
        } else {
            self.unknown_hash(fragment);
        }
    }

    fn unknown_hash(&self, fragment: &str) {
        match self.inner.config.unknown_hash() {
            UnknownHashPolicy::Ignore => {
                debug!(fragment, "no route declared for fragment; ignoring");
            }
            UnknownHashPolicy::RedirectToNotFound => {
                debug!(fragment, "no route declared for fragment; redirecting to not-found");
                let not_found = HashFragmentKey::from(self.inner.config.not_found());
                self.inner.location.set_hash(not_found.fragment());

                // fragment changes queued while loading are dropped, so show the page directly
                if self.inner.lifecycle.get() == RouterLifecycle::Loading {
                    self.show(&not_found, false);
                }
            }
        }
    }

    fn set_location(&self, route: &RouteId) {
        let key = HashFragmentKey::from(route);
        let fragment = key.fragment();

        // the location stays silent when the fragment doesn't change
        if HashFragmentKey::new(&self.inner.location.hash()) == key {
            trace!(fragment, "location already points at route; queueing a reload");
            if self
                .inner
                .tx
                .unbounded_send(RouterMessage::HashChanged(fragment.to_string()))
                .is_err()
            {
                trace!("router queue is closed, dropping reload");
            }
            return;
        }

        self.inner.location.set_hash(fragment);
    }

    fn show(&self, key: &HashFragmentKey, initial_load: bool) {
        let table = &self.inner.table;
        let (Some(route), Some(view)) = (table.route_id(key), table.resolve(key)) else {
            error!(%key, "no route declared for key");
            return;
        };
        let route = route.clone();

        if let Err(err) = self
            .inner
            .exchanger
            .exchange(&*self.inner.document, view, initial_load)
        {
            error!(%route, %err, "failed to exchange views");
            return;
        }

        let navigation_state = match self.inner.lifecycle.get() {
            RouterLifecycle::Restored => NavigationState::Towards,
            _ => NavigationState::Static,
        };
        self.inner.navigation_state.set(navigation_state);
        *self.inner.current_route.borrow_mut() = route.clone();

        let previous = self.inner.active_route.replace(Some(route.clone()));
        let traversed = self.inner.traversal.borrow_mut().take();
        match (previous, traversed) {
            (_, Some(target)) if target == route => {}
            (Some(previous), _) => self.inner.history.borrow_mut().record(previous, &route),
            (None, _) => {}
        }

        let data = self
            .inner
            .pending_data
            .borrow_mut()
            .remove(key)
            .unwrap_or(NavigationData::Null);
        let hook = self.inner.hooks.borrow().get(&route).cloned();
        if let Some(hook) = hook {
            hook(NavigationHookArgs {
                data,
                navigation_state,
            });
        }

        trace!(%route, "route changed");
        self.inner.route_changed.emit(route);
    }

    /// Notifications of every route that became active, including the first one.
    pub fn route_changed(&self) -> &EventEmitter<RouteId> {
        &self.inner.route_changed
    }

    /// The current routing information.
    pub fn state(&self) -> RouterState {
        let history = self.inner.history.borrow();
        RouterState {
            current_route: self.current_route(),
            lifecycle: self.lifecycle(),
            navigation_state: self.inner.navigation_state.get(),
            can_go_back: history.can_go_back(),
            can_go_forward: history.can_go_forward(),
        }
    }

    /// The route last navigated to.
    pub fn current_route(&self) -> RouteId {
        self.inner.current_route.borrow().clone()
    }

    /// The phase the router is in.
    pub fn lifecycle(&self) -> RouterLifecycle {
        self.inner.lifecycle.get()
    }

    /// The routes this router resolves fragments against.
    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    /// The configuration this router was created with.
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }
}

fn upgrade(router: &Weak<RouterInner>) -> Option<Router> {
    router.upgrade().map(|inner| Router { inner })
}
