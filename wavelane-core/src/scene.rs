//! Scene graph holding composited lane glyphs.

use serde::{Deserialize, Serialize};

use crate::{Element, ElementId, ElementKind, LaneError, LaneResult};

/// Marker returned by [`Scene::checkpoint`] for rolling back a failed
/// composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCheckpoint {
    element_count: usize,
    root_count: usize,
    group_lens: Vec<(ElementId, usize)>,
}

/// A scene containing all composited elements.
///
/// Elements live in an arena indexed by [`ElementId`]; groups list their
/// children in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// All elements in insertion order.
    elements: Vec<Element>,
    /// Root-level element IDs (not children of any group).
    root_elements: Vec<ElementId>,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Scene {
    /// Create a new empty scene with the given viewport size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            root_elements: Vec::new(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    fn next_id(&self) -> ElementId {
        ElementId::from_raw(self.elements.len() as u64)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(id: ElementId) -> usize {
        id.raw() as usize
    }

    /// Add an element at the root of the scene.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        let id = self.next_id();
        element.id = id;
        element.parent = None;
        self.root_elements.push(id);
        self.elements.push(element);
        id
    }

    /// Append an element as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not found or is not a group.
    pub fn add_child(&mut self, parent: ElementId, mut element: Element) -> LaneResult<ElementId> {
        let id = self.next_id();
        match self.get_element_mut(parent).map(|p| &mut p.kind) {
            Some(ElementKind::Group { children, .. }) => children.push(id),
            Some(_) => {
                return Err(LaneError::InvalidOperation(format!(
                    "{parent} is not a group"
                )))
            }
            None => return Err(LaneError::ElementNotFound(parent.to_string())),
        }
        element.id = id;
        element.parent = Some(parent);
        self.elements.push(element);
        Ok(id)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(Self::index(id))
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(Self::index(id))
    }

    /// Get all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Get root-level elements (not children of groups).
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> {
        self.root_elements
            .iter()
            .filter_map(|id| self.get_element(*id))
    }

    /// Children of a group in paint order.
    pub fn children(&self, id: ElementId) -> impl Iterator<Item = &Element> {
        self.get_element(id)
            .map(Element::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get_element(*child))
    }

    /// Find a group by its document name.
    #[must_use]
    pub fn find_group(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| {
            matches!(&e.kind, ElementKind::Group { name: Some(n), .. } if n == name)
        })
    }

    /// Set the viewport dimensions.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Capture the current scene shape so later insertions can be undone.
    #[must_use]
    pub fn checkpoint(&self) -> SceneCheckpoint {
        SceneCheckpoint {
            element_count: self.elements.len(),
            root_count: self.root_elements.len(),
            group_lens: self
                .elements
                .iter()
                .filter(|e| e.is_group())
                .map(|e| (e.id, e.children().len()))
                .collect(),
        }
    }

    /// Remove everything inserted since `checkpoint` was taken.
    pub fn rollback(&mut self, checkpoint: &SceneCheckpoint) {
        self.elements.truncate(checkpoint.element_count);
        self.root_elements.truncate(checkpoint.root_count);
        for (id, len) in &checkpoint.group_lens {
            if let Some(ElementKind::Group { children, .. }) =
                self.get_element_mut(*id).map(|e| &mut e.kind)
            {
                children.truncate(*len);
            }
        }
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> LaneResult<String> {
        serde_json::to_string(self).map_err(LaneError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> LaneResult<Self> {
        serde_json::from_str(json).map_err(LaneError::Serialization)
    }
}
