//! Ephemeral elements shown while a gesture is in progress.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::EngineResult;
use crate::store::ElementStore;

/// Where a preview came from, and so how it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOrigin {
    /// A new element drawn by a creation tool.
    Fresh,
    /// A committed element under a transform gesture.
    Existing,
}

/// An element owned by the active gesture.
///
/// `commit` is the only way a preview reaches the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub element: Element,
    pub origin: PreviewOrigin,
}

impl Preview {
    pub fn fresh(element: Element) -> Self {
        Self {
            element,
            origin: PreviewOrigin::Fresh,
        }
    }

    pub fn existing(element: Element) -> Self {
        Self {
            element,
            origin: PreviewOrigin::Existing,
        }
    }

    /// Replace the preview element with `patch` merged over it.
    pub fn apply(&mut self, patch: &ElementPatch) {
        self.element = self.element.update(patch);
    }

    /// Write the preview into `store` and select it.
    ///
    /// Fresh previews are added whole; existing ones only carry their geometry back.
    pub fn commit(self, store: &mut dyn ElementStore) -> EngineResult<ElementId> {
        let id = self.element.id().clone();
        match self.origin {
            PreviewOrigin::Fresh => {
                log::debug!("Committing new {} element {}", self.element.kind(), id);
                store.add_element(self.element);
            }
            PreviewOrigin::Existing => {
                log::debug!("Committing transform of {}", id);
                store.update_element(&id, &ElementPatch::geometry_of(&self.element))?;
            }
        }
        store.select_element(Some(id.clone()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::store::Workspace;
    use kurbo::Point;

    #[test]
    fn test_fresh_commit_adds_and_selects() {
        let mut store = Workspace::empty();
        let element = Element::create_default(ElementKind::Star, Point::ZERO, None);
        let id = Preview::fresh(element.clone()).commit(&mut store).unwrap();

        assert_eq!(&id, element.id());
        assert_eq!(store.get_element(&id), Some(&element));
        assert_eq!(store.selected_id(), Some(&id));
    }

    #[test]
    fn test_existing_commit_updates_geometry_only() {
        let mut store = Workspace::empty();
        let element = Element::create_default(ElementKind::Rectangle, Point::ZERO, Some("r".into()));
        store.add_element(element.clone());

        let mut preview = Preview::existing(element);
        preview.apply(&ElementPatch::new().position(Point::new(40.0, 30.0)).rotation(15.0));
        // Non-geometry edits on the preview are not carried back
        preview.apply(&ElementPatch::new().editing(true));
        preview.commit(&mut store).unwrap();

        let stored = store.get_element(&"r".into()).unwrap();
        assert_eq!(stored.position, Point::new(40.0, 30.0));
        assert!((stored.rotation - 15.0).abs() < f64::EPSILON);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_existing_commit_of_removed_element_fails() {
        let mut store = Workspace::empty();
        let element = Element::create_default(ElementKind::Rectangle, Point::ZERO, None);
        assert!(Preview::existing(element).commit(&mut store).is_err());
        assert!(store.selected_id().is_none());
    }
}
