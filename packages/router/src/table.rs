use std::collections::{hash_map::Entry, HashMap};

use tracing::debug;

use crate::{HashFragmentKey, RouteDeclaration, RouteId};

#[derive(Clone, Debug)]
struct RouteEntry {
    id: RouteId,
    view_attribute: String,
}

/// A read-only mapping from [`HashFragmentKey`]s to the view containers they show.
///
/// Built once from the declared routes. When two declarations share a location, the first one
/// wins and the later ones are dropped without an error.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    entries: HashMap<HashFragmentKey, RouteEntry>,
}

impl RouteTable {
    /// Build the table from `routes`.
    ///
    /// ```rust
    /// # use hashnav_router::{HashFragmentKey, RouteDeclaration, RouteTable};
    /// let table = RouteTable::build(&[
    ///     RouteDeclaration::new("home", "/home", "home-view"),
    ///     RouteDeclaration::new("home", "/home", "other-view"),
    /// ]);
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.resolve(&HashFragmentKey::new("home")), Some("home-view"));
    /// ```
    pub fn build(routes: &[RouteDeclaration]) -> Self {
        let mut entries = HashMap::with_capacity(routes.len());

        for route in routes {
            match entries.entry(route.location.clone()) {
                Entry::Occupied(_) => {
                    debug!(
                        location = %route.location,
                        id = %route.id,
                        "duplicate route declaration ignored"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(RouteEntry {
                        id: route.id.clone(),
                        view_attribute: route.view_attribute.clone(),
                    });
                }
            }
        }

        Self { entries }
    }

    /// The view attribute shown for `key`, if the key is declared.
    pub fn resolve(&self, key: &HashFragmentKey) -> Option<&str> {
        self.entries
            .get(key)
            .map(|entry| entry.view_attribute.as_str())
    }

    /// The identifier of the route declared at `key`.
    pub fn route_id(&self, key: &HashFragmentKey) -> Option<&RouteId> {
        self.entries.get(key).map(|entry| &entry.id)
    }

    /// Check whether `key` is declared.
    pub fn contains(&self, key: &HashFragmentKey) -> bool {
        self.entries.contains_key(key)
    }

    /// The view attribute shown for the route with identifier `id`.
    ///
    /// The identifier is normalized the same way a fragment read from the location is.
    pub fn view_for_route(&self, id: &RouteId) -> Option<&str> {
        self.resolve(&HashFragmentKey::from(id))
    }

    /// The number of distinct declared locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no route is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every declared location and its view attribute, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&HashFragmentKey, &str)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key, entry.view_attribute.as_str()))
    }
}
