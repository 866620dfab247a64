use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// The identifier of a logical route, like `home` or `blog`.
///
/// Programmatic navigation addresses routes by identifier, and the identifier doubles as the
/// fragment written to the location. The set of valid identifiers is the set of declared routes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(Cow<'static, str>);

impl RouteId {
    /// The default route, shown when the location has no fragment.
    pub const HOME: RouteId = RouteId::from_static("home");

    /// The route programmatic navigation falls back to for unknown identifiers.
    pub const PAGE_NOT_FOUND: RouteId = RouteId::from_static("pagenotfound");

    /// Create a [`RouteId`] from a string literal.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create a [`RouteId`] from an owned string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RouteId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RouteId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// The canonical form of a hash fragment, used as the key of a [`RouteTable`].
///
/// A key always starts with exactly one `/`. Raw fragments read from the location (`home`),
/// fragments with their `#` (`#home`) and already canonical keys (`/home`) all normalize to the
/// same key, so a key can never be prefixed twice.
///
/// [`RouteTable`]: crate::RouteTable
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HashFragmentKey(String);

impl HashFragmentKey {
    /// Normalize `fragment` into a key.
    ///
    /// ```rust
    /// # use hashnav_router::HashFragmentKey;
    /// assert_eq!(HashFragmentKey::new("home").as_str(), "/home");
    /// assert_eq!(HashFragmentKey::new("#home").as_str(), "/home");
    /// assert_eq!(HashFragmentKey::new("/home").as_str(), "/home");
    /// assert_eq!(HashFragmentKey::new("#//home").as_str(), "/home");
    /// ```
    pub fn new(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        Self(format!("/{}", fragment.trim_start_matches('/')))
    }

    /// The canonical key, including its leading `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment to write to a location for this key, without the leading `/`.
    pub fn fragment(&self) -> &str {
        &self.0[1..]
    }

    /// Whether this key is the bare `/` produced by an empty fragment.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for HashFragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HashFragmentKey {
    fn from(fragment: String) -> Self {
        Self::new(&fragment)
    }
}

impl From<&str> for HashFragmentKey {
    fn from(fragment: &str) -> Self {
        Self::new(fragment)
    }
}

impl From<&RouteId> for HashFragmentKey {
    fn from(id: &RouteId) -> Self {
        Self::new(id.as_str())
    }
}

impl From<HashFragmentKey> for String {
    fn from(key: HashFragmentKey) -> Self {
        key.0
    }
}

/// A declared route: an identifier, the fragment it lives at and the view container it shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDeclaration {
    /// The identifier used for programmatic navigation and notifications.
    pub id: RouteId,
    /// The fragment this route is shown for.
    pub location: HashFragmentKey,
    /// The view attribute of the container to activate.
    pub view_attribute: String,
}

impl RouteDeclaration {
    /// Declare a route.
    ///
    /// ```rust
    /// # use hashnav_router::RouteDeclaration;
    /// let blog = RouteDeclaration::new("blog", "/blog", "blog-view");
    /// assert_eq!(blog.location.as_str(), "/blog");
    /// ```
    pub fn new(
        id: impl Into<RouteId>,
        location: impl Into<HashFragmentKey>,
        view_attribute: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            view_attribute: view_attribute.into(),
        }
    }
}
