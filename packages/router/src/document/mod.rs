//! Access to the view containers the router switches between.
//!
//! Every page lives in a container carrying a view attribute (`ns-view="blog-view"`) and a route
//! marker (`ns-route="active"` or `ns-route="inactive"`). At most one container is active at a
//! time. The router only ever touches the document through [`ViewDocument`], so it can run
//! against the real DOM (the `web` feature) or against a [`MemoryDocument`].

use std::fmt;

use crate::DocumentError;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// The attribute naming a view container.
pub const VIEW_ATTRIBUTE: &str = "ns-view";

/// The attribute carrying a container's [`RouteMarker`].
pub const ROUTE_ATTRIBUTE: &str = "ns-route";

/// Whether a view container is currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteMarker {
    /// The container is shown.
    Active,
    /// The container is hidden.
    Inactive,
}

impl RouteMarker {
    /// The attribute value for this marker.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMarker::Active => "active",
            RouteMarker::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RouteMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document operations the router depends on.
pub trait ViewDocument {
    /// The view attribute of the container currently marked active, if any.
    ///
    /// If several containers are marked active, the first one in document order is returned.
    fn active_view(&self) -> Option<String>;

    /// Check whether a container with `view_attribute` exists.
    fn has_view(&self, view_attribute: &str) -> bool;

    /// Set the route marker of the container with `view_attribute`.
    fn set_route_marker(&self, view_attribute: &str, marker: RouteMarker)
        -> Result<(), DocumentError>;
}
