use crate::RouteId;

/// An error that prevents a [`Router`](crate::Router) from being created.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// No route was declared.
    #[error("no routes were declared")]
    EmptyRouteTable,

    /// The default route is not among the declared routes.
    #[error("the home route `{0}` is not declared")]
    MissingHomeRoute(RouteId),

    /// The fallback route is not among the declared routes.
    #[error("the not-found route `{0}` is not declared")]
    MissingNotFoundRoute(RouteId),

    /// The configuration could not be parsed.
    #[error("invalid router configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The document could not be accessed.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// An error raised by a [`ViewDocument`](crate::ViewDocument).
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// No container carries the requested view attribute.
    #[error("no view container is marked `{0}`")]
    ViewNotFound(String),

    /// There is no document to work on.
    #[error("no document is available")]
    NoDocument,

    /// The underlying DOM rejected a mutation.
    #[error("failed to update the document: {0}")]
    Dom(String),
}
