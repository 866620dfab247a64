use web_sys::{Document, Element};

use super::{RouteMarker, ViewDocument, ROUTE_ATTRIBUTE, VIEW_ATTRIBUTE};
use crate::DocumentError;

/// A [`ViewDocument`] working on the browser DOM.
///
/// Containers are found with `querySelector`, so the first match in document order wins.
pub struct WebDocument {
    document: Document,
    view_attribute: String,
    route_attribute: String,
}

impl WebDocument {
    /// Use the document of the current window with the default `ns-view` / `ns-route` attributes.
    pub fn new() -> Result<Self, DocumentError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(DocumentError::NoDocument)?;

        Ok(Self {
            document,
            view_attribute: VIEW_ATTRIBUTE.to_string(),
            route_attribute: ROUTE_ATTRIBUTE.to_string(),
        })
    }

    /// Use custom attribute names for the view attribute and the route marker.
    pub fn with_attributes(
        self,
        view_attribute: impl Into<String>,
        route_attribute: impl Into<String>,
    ) -> Self {
        Self {
            view_attribute: view_attribute.into(),
            route_attribute: route_attribute.into(),
            ..self
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn view_selector(&self, view: &str) -> String {
        format!(r#"[{}="{}"]"#, self.view_attribute, view)
    }
}

impl ViewDocument for WebDocument {
    fn active_view(&self) -> Option<String> {
        let selector = format!(
            r#"[{}="{}"]"#,
            self.route_attribute,
            RouteMarker::Active.as_str()
        );
        self.query(&selector)?.get_attribute(&self.view_attribute)
    }

    fn has_view(&self, view_attribute: &str) -> bool {
        self.query(&self.view_selector(view_attribute)).is_some()
    }

    fn set_route_marker(
        &self,
        view_attribute: &str,
        marker: RouteMarker,
    ) -> Result<(), DocumentError> {
        let element = self
            .query(&self.view_selector(view_attribute))
            .ok_or_else(|| DocumentError::ViewNotFound(view_attribute.to_string()))?;

        element
            .set_attribute(&self.route_attribute, marker.as_str())
            .map_err(|e| DocumentError::Dom(format!("{e:?}")))
    }
}
