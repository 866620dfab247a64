use std::cell::RefCell;

use tracing::trace;

use super::{RouteMarker, ViewDocument};
use crate::DocumentError;

/// A single marker change applied to a [`MemoryDocument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMutation {
    /// The view attribute of the container that changed.
    pub view: String,
    /// The marker it was given.
    pub marker: RouteMarker,
}

/// A [`ViewDocument`] that keeps its containers in memory.
///
/// Containers keep the order they were created in, which stands in for document order. Every
/// marker change is appended to a journal so tests can check exactly what the router did.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    views: RefCell<Vec<(String, RouteMarker)>>,
    journal: RefCell<Vec<DocumentMutation>>,
}

impl MemoryDocument {
    /// Create a document with one inactive container per view attribute.
    ///
    /// ```rust
    /// # use hashnav_router::{MemoryDocument, RouteMarker, ViewDocument};
    /// let document = MemoryDocument::new(["home-view", "blog-view"]);
    /// assert_eq!(document.active_view(), None);
    /// assert_eq!(document.marker("blog-view"), Some(RouteMarker::Inactive));
    /// ```
    pub fn new<I, S>(views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            views: RefCell::new(
                views
                    .into_iter()
                    .map(|view| (view.into(), RouteMarker::Inactive))
                    .collect(),
            ),
            journal: RefCell::new(Vec::new()),
        }
    }

    /// The marker currently carried by `view`.
    pub fn marker(&self, view: &str) -> Option<RouteMarker> {
        self.views
            .borrow()
            .iter()
            .find(|(name, _)| name == view)
            .map(|(_, marker)| *marker)
    }

    /// Every container currently marked active, in document order.
    pub fn active_views(&self) -> Vec<String> {
        self.views
            .borrow()
            .iter()
            .filter(|(_, marker)| *marker == RouteMarker::Active)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// All marker changes so far, oldest first.
    pub fn journal(&self) -> Vec<DocumentMutation> {
        self.journal.borrow().clone()
    }

    /// Return and clear the journal.
    pub fn take_journal(&self) -> Vec<DocumentMutation> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }
}

impl ViewDocument for MemoryDocument {
    fn active_view(&self) -> Option<String> {
        self.views
            .borrow()
            .iter()
            .find(|(_, marker)| *marker == RouteMarker::Active)
            .map(|(name, _)| name.clone())
    }

    fn has_view(&self, view_attribute: &str) -> bool {
        self.marker(view_attribute).is_some()
    }

    fn set_route_marker(
        &self,
        view_attribute: &str,
        marker: RouteMarker,
    ) -> Result<(), DocumentError> {
        let mut views = self.views.borrow_mut();
        let (_, current) = views
            .iter_mut()
            .find(|(name, _)| name == view_attribute)
            .ok_or_else(|| DocumentError::ViewNotFound(view_attribute.to_string()))?;

        trace!(view = view_attribute, %marker, "setting route marker");
        *current = marker;
        self.journal.borrow_mut().push(DocumentMutation {
            view: view_attribute.to_string(),
            marker,
        });
        Ok(())
    }
}
