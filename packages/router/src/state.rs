use serde::{Deserialize, Serialize};

use crate::RouteId;

/// The phases a [`Router`](crate::Router) goes through. Phases only ever advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RouterLifecycle {
    /// Routes are being registered.
    #[default]
    Initializing,
    /// The first page is being loaded.
    Loading,
    /// The first page is shown and hash changes are handled.
    Restored,
}

/// The nature of a navigation, handed to navigation hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationState {
    /// The hooked route is being navigated to.
    Towards,
    /// The hooked route is being navigated away from.
    ///
    /// Reserved: the router only calls the hook of the route being shown, so it never produces
    /// this state. It exists so that serialized states from other hosts still deserialize.
    AwayFrom,
    /// The route was shown without a navigation, e.g. on the first page load.
    #[default]
    Static,
}

/// The current routing information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterState {
    /// The route last navigated to.
    pub current_route: RouteId,

    /// The phase the router is in.
    pub lifecycle: RouterLifecycle,

    /// The nature of the last navigation.
    pub navigation_state: NavigationState,

    /// Whether there is a prior route to go back to.
    pub can_go_back: bool,

    /// Whether there is a later route to go forward to.
    pub can_go_forward: bool,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            current_route: RouteId::HOME,
            lifecycle: RouterLifecycle::default(),
            navigation_state: NavigationState::default(),
            can_go_back: false,
            can_go_forward: false,
        }
    }
}
