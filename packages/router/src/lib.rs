#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod config;
mod document;
mod error;
mod events;
mod exchange;
mod lifecycle;
mod route;
mod router;
mod state;
mod table;

pub use config::*;
pub use document::*;
pub use error::*;
pub use events::*;
pub use exchange::*;
pub use lifecycle::*;
pub use route::*;
pub use router::*;
pub use state::*;
pub use table::*;

/// Location providers and navigation stacks, re-exported from `hashnav-history`.
pub mod history {
    pub use hashnav_history::*;
}

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::config::{RouterConfig, UnknownHashPolicy};
    pub use crate::document::{MemoryDocument, RouteMarker, ViewDocument};
    pub use crate::events::{EventEmitter, Subscription};
    pub use crate::lifecycle::{Lifecycle, LifecycleEvents};
    pub use crate::route::{HashFragmentKey, RouteDeclaration, RouteId};
    pub use crate::router::{NavigationData, NavigationHookArgs, Router};
    pub use crate::state::{NavigationState, RouterLifecycle, RouterState};
    pub use hashnav_history::{HashLocation, MemoryHashLocation};

    #[cfg(feature = "web")]
    pub use crate::document::WebDocument;
    #[cfg(feature = "web")]
    pub use hashnav_history::WebHashLocation;
}
