use std::{cell::RefCell, rc::Rc};

use futures::{executor::LocalPool, task::LocalSpawnExt};
use hashnav_router::prelude::*;
use hashnav_router::{DocumentError, DocumentMutation, ExchangePhase};
use pretty_assertions::assert_eq;
use serde_json::json;

fn routes() -> Vec<RouteDeclaration> {
    vec![
        RouteDeclaration::new("home", "/home", "home-view"),
        RouteDeclaration::new("about", "/about", "about-view"),
        RouteDeclaration::new("blog", "/blog", "blog-view"),
        RouteDeclaration::new("academics", "/academics", "academics-view"),
        RouteDeclaration::new("pagenotfound", "/pagenotfound", "pagenotfound-view"),
    ]
}

fn views() -> [&'static str; 5] {
    [
        "home-view",
        "about-view",
        "blog-view",
        "academics-view",
        "pagenotfound-view",
    ]
}

struct Fixture {
    router: Router,
    document: Rc<MemoryDocument>,
    location: Rc<MemoryHashLocation>,
    changes: Rc<RefCell<Vec<String>>>,
}

impl Fixture {
    fn new(initial_hash: &str) -> Self {
        Self::with_config(initial_hash, RouterConfig::new(routes()))
    }

    fn with_config(initial_hash: &str, config: RouterConfig) -> Self {
        let document = Rc::new(MemoryDocument::new(views()));
        let location = Rc::new(MemoryHashLocation::with_initial_hash(initial_hash));
        let router = Router::new(config, document.clone(), location.clone()).unwrap();

        let changes = Rc::new(RefCell::new(Vec::new()));
        router.route_changed().subscribe({
            let changes = changes.clone();
            move |route: &RouteId| changes.borrow_mut().push(route.to_string())
        });

        Self {
            router,
            document,
            location,
            changes,
        }
    }

    fn booted(initial_hash: &str) -> Self {
        let fixture = Self::new(initial_hash);
        fixture.router.bootstrap();
        fixture.document.take_journal();
        fixture.changes.borrow_mut().clear();
        fixture
    }

    fn changes(&self) -> Vec<String> {
        self.changes.borrow().clone()
    }
}

fn mutation(view: &str, marker: RouteMarker) -> DocumentMutation {
    DocumentMutation {
        view: view.to_string(),
        marker,
    }
}

#[derive(Debug, PartialEq)]
enum Event {
    Before,
    After,
    Mutate(String, RouteMarker),
}

struct RecordingDocument {
    inner: MemoryDocument,
    events: Rc<RefCell<Vec<Event>>>,
}

impl ViewDocument for RecordingDocument {
    fn active_view(&self) -> Option<String> {
        self.inner.active_view()
    }

    fn has_view(&self, view_attribute: &str) -> bool {
        self.inner.has_view(view_attribute)
    }

    fn set_route_marker(
        &self,
        view_attribute: &str,
        marker: RouteMarker,
    ) -> Result<(), DocumentError> {
        self.events
            .borrow_mut()
            .push(Event::Mutate(view_attribute.to_string(), marker));
        self.inner.set_route_marker(view_attribute, marker)
    }
}

#[test]
fn initial_load_with_empty_hash_shows_home() {
    let fixture = Fixture::new("");
    let hooks = Rc::new(RefCell::new(Vec::new()));
    fixture.router.before_route_navigation({
        let hooks = hooks.clone();
        move || hooks.borrow_mut().push(ExchangePhase::Before)
    });
    fixture.router.after_route_navigation({
        let hooks = hooks.clone();
        move || hooks.borrow_mut().push(ExchangePhase::After)
    });

    fixture.router.bootstrap();

    assert_eq!(
        fixture.document.journal(),
        vec![mutation("home-view", RouteMarker::Active)]
    );
    assert_eq!(
        *hooks.borrow(),
        vec![ExchangePhase::Before, ExchangePhase::After]
    );
    assert_eq!(fixture.changes(), vec!["home"]);
    assert_eq!(fixture.router.lifecycle(), RouterLifecycle::Restored);
    assert_eq!(fixture.router.current_route(), RouteId::HOME);
}

#[test]
fn initial_load_with_declared_hash_shows_that_route() {
    let fixture = Fixture::new("#about");
    let calls = Rc::new(RefCell::new(0));
    fixture.router.before_route_navigation({
        let calls = calls.clone();
        move || *calls.borrow_mut() += 1
    });
    fixture.router.after_route_navigation({
        let calls = calls.clone();
        move || *calls.borrow_mut() += 1
    });

    fixture.router.bootstrap();

    assert_eq!(
        fixture.document.journal(),
        vec![mutation("about-view", RouteMarker::Active)]
    );
    assert_eq!(*calls.borrow(), 2);
    assert_eq!(fixture.changes(), vec!["about"]);
}

#[test]
fn initial_load_with_unknown_hash_shows_not_found() {
    let fixture = Fixture::new("nowhere");
    fixture.router.bootstrap();

    assert_eq!(fixture.location.hash(), "pagenotfound");
    assert_eq!(fixture.document.active_views(), vec!["pagenotfound-view"]);
    assert_eq!(fixture.changes(), vec!["pagenotfound"]);

    // the redirect was already handled while loading
    assert_eq!(fixture.router.process_pending(), 0);
    assert_eq!(fixture.document.journal().len(), 1);
}

#[test]
fn navigation_is_observed_after_the_hash_change_is_processed() {
    let fixture = Fixture::booted("");
    let received = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("blog", {
        let received = received.clone();
        move |args| received.borrow_mut().push(args)
    });

    fixture
        .router
        .navigate_to_route("blog", json!({ "data": "x" }));

    assert_eq!(fixture.location.hash(), "blog");
    assert_eq!(fixture.router.current_route(), "blog");
    assert_eq!(fixture.document.active_views(), vec!["home-view"]);
    assert!(fixture.changes().is_empty());

    assert_eq!(fixture.router.process_pending(), 1);

    assert_eq!(
        fixture.document.journal(),
        vec![
            mutation("home-view", RouteMarker::Inactive),
            mutation("blog-view", RouteMarker::Active),
        ]
    );
    assert_eq!(fixture.changes(), vec!["blog"]);
    assert_eq!(
        *received.borrow(),
        vec![NavigationHookArgs {
            data: json!({ "data": "x" }),
            navigation_state: NavigationState::Towards,
        }]
    );
}

#[test]
fn unknown_route_redirects_to_not_found() {
    let fixture = Fixture::booted("");

    fixture.router.navigate_to_route("nonexistent", json!({}));
    assert_eq!(fixture.location.hash(), "pagenotfound");

    fixture.router.process_pending();
    assert_eq!(fixture.document.active_views(), vec!["pagenotfound-view"]);
    assert_eq!(fixture.changes(), vec!["pagenotfound"]);
}

#[test]
fn unknown_hash_on_direct_change_redirects_to_not_found() {
    let fixture = Fixture::booted("");

    fixture.location.set_hash("nowhere");

    // the redirect queues a second change, which is handled in the same pass
    assert_eq!(fixture.router.process_pending(), 2);
    assert_eq!(fixture.location.hash(), "pagenotfound");
    assert_eq!(fixture.document.active_views(), vec!["pagenotfound-view"]);
    assert_eq!(fixture.changes(), vec!["pagenotfound"]);
}

#[test]
fn unknown_hash_on_direct_change_can_be_ignored() {
    let fixture = Fixture::with_config(
        "",
        RouterConfig::new(routes()).unknown_hash_policy(UnknownHashPolicy::Ignore),
    );
    fixture.router.bootstrap();
    fixture.document.take_journal();

    fixture.location.set_hash("nowhere");
    fixture.router.process_pending();

    assert_eq!(fixture.location.hash(), "nowhere");
    assert!(fixture.document.journal().is_empty());
    assert_eq!(fixture.document.active_views(), vec!["home-view"]);
    assert_eq!(fixture.changes(), vec!["home"]);
}

#[test]
fn only_the_first_hook_per_route_is_invoked() {
    let fixture = Fixture::booted("");
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("home", {
        let first = first.clone();
        move |args| first.borrow_mut().push(args.data)
    });
    fixture.router.navigation_hook("home", {
        let second = second.clone();
        move |args| second.borrow_mut().push(args.data)
    });

    fixture.router.navigate_to_route("blog", json!(null));
    fixture.router.process_pending();
    fixture.router.navigate_to_route("home", json!("payload"));
    fixture.router.process_pending();

    assert_eq!(*first.borrow(), vec![json!("payload")]);
    assert!(second.borrow().is_empty());
}

#[test]
fn only_the_first_before_and_after_callbacks_are_invoked() {
    let fixture = Fixture::new("");
    let calls = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        fixture.router.before_route_navigation({
            let calls = calls.clone();
            move || calls.borrow_mut().push(format!("{name} before"))
        });
        fixture.router.after_route_navigation({
            let calls = calls.clone();
            move || calls.borrow_mut().push(format!("{name} after"))
        });
    }

    fixture.router.bootstrap();

    assert_eq!(*calls.borrow(), vec!["first before", "first after"]);
}

#[test]
fn user_driven_navigation_passes_no_data() {
    let fixture = Fixture::booted("");
    let received = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("academics", {
        let received = received.clone();
        move |args| received.borrow_mut().push(args)
    });

    fixture.location.set_hash("academics");
    fixture.router.process_pending();

    assert_eq!(
        *received.borrow(),
        vec![NavigationHookArgs {
            data: json!(null),
            navigation_state: NavigationState::Towards,
        }]
    );
}

#[test]
fn initial_load_hook_is_static() {
    let fixture = Fixture::new("");
    let received = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("home", {
        let received = received.clone();
        move |args: NavigationHookArgs| received.borrow_mut().push(args.navigation_state)
    });

    fixture.router.bootstrap();

    assert_eq!(*received.borrow(), vec![NavigationState::Static]);
    assert_eq!(fixture.router.state().navigation_state, NavigationState::Static);
}

#[test]
fn navigating_to_the_active_route_shows_it_again() {
    let fixture = Fixture::booted("");
    fixture.router.navigate_to_route("blog", json!(null));
    fixture.router.process_pending();
    fixture.document.take_journal();

    let received = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("blog", {
        let received = received.clone();
        move |args: NavigationHookArgs| received.borrow_mut().push(args.data)
    });

    fixture.router.navigate_to_route("blog", json!("again"));
    assert_eq!(fixture.router.process_pending(), 1);

    assert_eq!(
        fixture.document.journal(),
        vec![
            mutation("blog-view", RouteMarker::Inactive),
            mutation("blog-view", RouteMarker::Active),
        ]
    );
    assert_eq!(fixture.document.active_views(), vec!["blog-view"]);
    assert_eq!(*received.borrow(), vec![json!("again")]);
    assert_eq!(fixture.changes(), vec!["blog", "blog"]);
}

#[test]
fn handling_an_unchanged_hash_shows_the_route_again() {
    let fixture = Fixture::booted("about");

    fixture.router.handle_hash_change();

    assert_eq!(
        fixture.document.journal(),
        vec![
            mutation("about-view", RouteMarker::Inactive),
            mutation("about-view", RouteMarker::Active),
        ]
    );
    assert_eq!(fixture.changes(), vec!["about"]);
}

#[test]
fn queued_navigations_are_shown_in_order() {
    let fixture = Fixture::booted("");
    let received = Rc::new(RefCell::new(Vec::new()));
    for route in ["blog", "about"] {
        fixture.router.navigation_hook(route, {
            let received = received.clone();
            move |args: NavigationHookArgs| received.borrow_mut().push((route, args.data))
        });
    }

    fixture.router.navigate_to_route("blog", json!("b"));
    fixture.router.navigate_to_route("about", json!("a"));
    assert_eq!(fixture.router.process_pending(), 2);

    assert_eq!(fixture.changes(), vec!["blog", "about"]);
    assert_eq!(
        *received.borrow(),
        vec![("blog", json!("b")), ("about", json!("a"))]
    );
    assert_eq!(
        fixture.document.journal(),
        vec![
            mutation("home-view", RouteMarker::Inactive),
            mutation("blog-view", RouteMarker::Active),
            mutation("blog-view", RouteMarker::Inactive),
            mutation("about-view", RouteMarker::Active),
        ]
    );
}

#[test]
fn leaving_a_route_does_not_call_its_hook() {
    let fixture = Fixture::booted("blog");
    let received = Rc::new(RefCell::new(Vec::new()));
    fixture.router.navigation_hook("blog", {
        let received = received.clone();
        move |args: NavigationHookArgs| received.borrow_mut().push(args.navigation_state)
    });

    fixture.router.navigate_to_route("about", json!(null));
    fixture.router.process_pending();
    assert!(received.borrow().is_empty());

    fixture.router.navigate_to_route("blog", json!(null));
    fixture.router.process_pending();
    assert_eq!(*received.borrow(), vec![NavigationState::Towards]);
}

#[test]
fn clearing_the_hash_returns_home() {
    let fixture = Fixture::booted("about");

    fixture.location.set_hash("");
    fixture.router.process_pending();

    assert_eq!(
        fixture.document.journal(),
        vec![
            mutation("about-view", RouteMarker::Inactive),
            mutation("home-view", RouteMarker::Active),
        ]
    );
    assert_eq!(fixture.document.active_views(), vec!["home-view"]);
}

#[test]
fn hooks_bracket_the_marker_change() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let document = Rc::new(RecordingDocument {
        inner: MemoryDocument::new(views()),
        events: events.clone(),
    });
    let location = Rc::new(MemoryHashLocation::default());
    let router = Router::new(RouterConfig::new(routes()), document, location).unwrap();
    router.before_route_navigation({
        let events = events.clone();
        move || events.borrow_mut().push(Event::Before)
    });
    router.after_route_navigation({
        let events = events.clone();
        move || events.borrow_mut().push(Event::After)
    });

    router.bootstrap();
    assert_eq!(
        std::mem::take(&mut *events.borrow_mut()),
        vec![
            Event::Before,
            Event::Mutate("home-view".to_string(), RouteMarker::Active),
            Event::After,
        ]
    );

    router.navigate_to_route("blog", json!(null));
    router.process_pending();
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Before,
            Event::Mutate("home-view".to_string(), RouteMarker::Inactive),
            Event::After,
            Event::Mutate("blog-view".to_string(), RouteMarker::Active),
        ]
    );
}

#[test]
fn callbacks_may_navigate() {
    let fixture = Fixture::booted("");
    let router = fixture.router.clone();
    fixture.router.navigation_hook("about", move |_| {
        router.navigate_to_route("academics", json!("redirected"));
    });

    fixture.router.navigate_to_route("about", json!(null));
    assert_eq!(fixture.router.process_pending(), 2);

    assert_eq!(fixture.changes(), vec!["about", "academics"]);
    assert_eq!(fixture.document.active_views(), vec!["academics-view"]);
}

#[test]
fn back_and_forward() {
    let fixture = Fixture::booted("");
    assert!(!fixture.router.go_back());

    for route in ["blog", "about"] {
        fixture.router.navigate_to_route(route, json!(null));
        fixture.router.process_pending();
    }
    assert!(fixture.router.state().can_go_back);

    assert!(fixture.router.go_back());
    fixture.router.process_pending();
    assert_eq!(fixture.document.active_views(), vec!["blog-view"]);

    assert!(fixture.router.go_back());
    fixture.router.process_pending();
    assert_eq!(fixture.document.active_views(), vec!["home-view"]);

    let state = fixture.router.state();
    assert!(!state.can_go_back);
    assert!(state.can_go_forward);

    assert!(fixture.router.go_forward());
    fixture.router.process_pending();
    assert_eq!(fixture.document.active_views(), vec!["blog-view"]);
    assert_eq!(fixture.changes(), vec!["blog", "about", "blog", "home", "blog"]);

    // a fresh navigation drops the forward stack
    fixture.router.navigate_to_route("academics", json!(null));
    fixture.router.process_pending();
    assert!(!fixture.router.state().can_go_forward);
}

#[test]
fn run_loop_handles_hash_changes() {
    let fixture = Fixture::booted("");
    let mut pool = LocalPool::new();
    let router = fixture.router.clone();
    pool.spawner()
        .spawn_local(async move { router.run().await })
        .unwrap();

    pool.run_until_stalled();
    assert!(fixture.changes().is_empty());

    fixture.router.navigate_to_route("academics", json!(null));
    assert_eq!(fixture.document.active_views(), vec!["home-view"]);

    pool.run_until_stalled();
    assert_eq!(fixture.document.active_views(), vec!["academics-view"]);
    assert_eq!(fixture.changes(), vec!["academics"]);
}

#[test]
fn hash_changes_before_bootstrap_are_not_handled() {
    let fixture = Fixture::new("");

    fixture.location.set_hash("blog");
    fixture.router.process_pending();
    assert!(fixture.document.journal().is_empty());
    assert_eq!(fixture.router.lifecycle(), RouterLifecycle::Initializing);

    fixture.router.bootstrap();
    assert_eq!(fixture.document.active_views(), vec!["blog-view"]);
}
