use serde::{Deserialize, Serialize};

use crate::{HashFragmentKey, RouteDeclaration, RouteId, RouterError};

/// What to do when the location changes to a fragment no route is declared for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownHashPolicy {
    /// Point the location at the not-found route, like programmatic navigation does.
    #[default]
    RedirectToNotFound,
    /// Leave the current view in place and notify nobody.
    Ignore,
}

/// Global configuration options for the router.
///
/// This follows the builder pattern:
/// ```rust
/// # use hashnav_router::{RouteDeclaration, RouterConfig, UnknownHashPolicy};
/// let config = RouterConfig::new(vec![
///     RouteDeclaration::new("home", "/home", "home-view"),
///     RouteDeclaration::new("pagenotfound", "/pagenotfound", "pagenotfound-view"),
/// ])
/// .unknown_hash_policy(UnknownHashPolicy::Ignore);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub(crate) routes: Vec<RouteDeclaration>,

    #[serde(default = "default_home_route")]
    pub(crate) home_route: RouteId,

    #[serde(default = "default_not_found_route")]
    pub(crate) not_found_route: RouteId,

    #[serde(default)]
    pub(crate) unknown_hash_policy: UnknownHashPolicy,
}

fn default_home_route() -> RouteId {
    RouteId::HOME
}

fn default_not_found_route() -> RouteId {
    RouteId::PAGE_NOT_FOUND
}

impl RouterConfig {
    /// Create a configuration for `routes` with the default `home` and `pagenotfound` routes.
    pub fn new(routes: Vec<RouteDeclaration>) -> Self {
        Self {
            routes,
            home_route: default_home_route(),
            not_found_route: default_not_found_route(),
            unknown_hash_policy: UnknownHashPolicy::default(),
        }
    }

    /// Parse a configuration from JSON.
    ///
    /// ```rust
    /// # use hashnav_router::{RouteId, RouterConfig};
    /// let config = RouterConfig::from_json(r#"{
    ///     "routes": [
    ///         { "id": "home", "location": "/home", "view_attribute": "home-view" },
    ///         { "id": "pagenotfound", "location": "/pagenotfound", "view_attribute": "pagenotfound-view" }
    ///     ],
    ///     "unknown_hash_policy": "ignore"
    /// }"#).unwrap();
    /// assert_eq!(config.home(), &RouteId::HOME);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RouterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The route shown when the location has no fragment.
    ///
    /// Defaults to [`RouteId::HOME`].
    pub fn home_route(self, route: impl Into<RouteId>) -> Self {
        Self {
            home_route: route.into(),
            ..self
        }
    }

    /// The route programmatic navigation to an unknown route ends up at.
    ///
    /// Defaults to [`RouteId::PAGE_NOT_FOUND`].
    pub fn not_found_route(self, route: impl Into<RouteId>) -> Self {
        Self {
            not_found_route: route.into(),
            ..self
        }
    }

    /// What to do when the location changes to an undeclared fragment.
    ///
    /// Defaults to [`UnknownHashPolicy::RedirectToNotFound`].
    pub fn unknown_hash_policy(self, policy: UnknownHashPolicy) -> Self {
        Self {
            unknown_hash_policy: policy,
            ..self
        }
    }

    /// The declared routes, in declaration order.
    pub fn routes(&self) -> &[RouteDeclaration] {
        &self.routes
    }

    /// The configured home route.
    pub fn home(&self) -> &RouteId {
        &self.home_route
    }

    /// The configured not-found route.
    pub fn not_found(&self) -> &RouteId {
        &self.not_found_route
    }

    /// The configured unknown fragment policy.
    pub fn unknown_hash(&self) -> UnknownHashPolicy {
        self.unknown_hash_policy
    }

    /// Check that the home and not-found routes are declared.
    pub(crate) fn validate(&self) -> Result<(), RouterError> {
        if self.routes.is_empty() {
            return Err(RouterError::EmptyRouteTable);
        }

        let declared = |id: &RouteId| {
            let key = HashFragmentKey::from(id);
            self.routes.iter().any(|route| route.location == key)
        };

        if !declared(&self.home_route) {
            return Err(RouterError::MissingHomeRoute(self.home_route.clone()));
        }
        if !declared(&self.not_found_route) {
            return Err(RouterError::MissingNotFoundRoute(
                self.not_found_route.clone(),
            ));
        }

        Ok(())
    }
}
