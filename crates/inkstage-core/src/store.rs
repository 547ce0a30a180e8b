//! The element collection the engine reads and writes.

use crate::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::error::{EngineError, EngineResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Id of the placeholder image every new workspace starts with.
pub const SEED_ELEMENT_ID: &str = "initial-img";

/// Element collection interface.
///
/// The engine never owns elements; it commits through these calls and
/// otherwise only looks elements up by id.
pub trait ElementStore {
    fn add_element(&mut self, element: Element);

    /// Merge `patch` over the element with `id`.
    fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> EngineResult<()>;

    fn remove_element(&mut self, id: &ElementId) -> Option<Element>;

    /// Select an element, or clear the selection with `None`.
    fn select_element(&mut self, id: Option<ElementId>);

    fn selected_id(&self) -> Option<&ElementId>;

    fn get_element(&self, id: &ElementId) -> Option<&Element>;

    fn selected_element(&self) -> Option<&Element> {
        self.selected_id().and_then(|id| self.get_element(id))
    }
}

/// In-memory element collection, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    elements: Vec<Element>,
    selected_id: Option<ElementId>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a workspace holding the seed image placeholder.
    pub fn new() -> Self {
        let seed = Element::create_default(
            ElementKind::Image,
            Point::new(100.0, 100.0),
            Some(SEED_ELEMENT_ID.into()),
        );
        Self {
            elements: vec![seed],
            selected_id: None,
        }
    }

    /// Create a workspace with no elements.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            selected_id: None,
        }
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Replace all elements, dropping a selection that no longer resolves.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        if self.selected_id.as_ref().is_some_and(|id| self.get_element(id).is_none()) {
            self.selected_id = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the workspace to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a workspace from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ElementStore for Workspace {
    fn add_element(&mut self, element: Element) {
        log::debug!("Adding {} element {}", element.kind(), element.id());
        self.elements.push(element);
    }

    fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> EngineResult<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|el| el.id() == id)
            .ok_or_else(|| EngineError::ElementNotFound(id.clone()))?;
        *element = element.update(patch);
        Ok(())
    }

    fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|el| el.id() == id)?;
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        Some(self.elements.remove(index))
    }

    fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_id = id;
    }

    fn selected_id(&self) -> Option<&ElementId> {
        self.selected_id.as_ref()
    }

    fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }
}
