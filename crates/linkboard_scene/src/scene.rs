// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene container: element lookup, view transform, change tracking.
//!
//! The scene owns the element tree (flat, keyed by name) plus the plumbing
//! the connection subsystem consumes: a uniform zoom/pan view transform,
//! change/save notifications, and an explicit deferred-action queue that
//! replaces fire-and-forget zero-delay continuations. Actions pushed during
//! an update pass are drained and applied at the start of the next one, so
//! re-entrant ordering is a property of the queue, not of event-loop timing.

use crate::element::Element;
use egui::{Pos2, Vec2};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Name reserved for the root container element
pub const ROOT_NAME: &str = "root";

/// Error when mutating the scene's element set
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// An element with this name already exists
    #[error("Element name already taken: {0}")]
    DuplicateName(String),

    /// No element with this name exists
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

/// Notification emitted by scene mutations, drained by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// An element's options or geometry changed
    ElementChanged(String),
    /// A persist/save pass was requested
    SaveRequested,
}

/// Work scheduled to run after the current update pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Re-select the connection at (source element name, index) once derived
    /// state has been rebuilt
    Reselect {
        /// Source element name
        source: String,
        /// Index within the source element's connections list
        index: usize,
    },
    /// Force a derived-state rebuild
    Rebuild,
}

/// The canvas scene: a root container and a flat set of named elements.
pub struct Scene {
    root: Element,
    elements: IndexMap<String, Element>,
    /// View pan offset in screen space
    pub pan: Vec2,
    /// Uniform zoom factor applied to the coordinate space
    pub zoom: f32,
    events: Vec<SceneEvent>,
    deferred: VecDeque<DeferredAction>,
}

impl Scene {
    /// Create a scene whose root container spans `canvas_size`
    pub fn new(canvas_size: Vec2) -> Self {
        let root = Element::new(ROOT_NAME)
            .with_center(canvas_size.x * 0.5, canvas_size.y * 0.5)
            .with_size(canvas_size.x, canvas_size.y);
        Self {
            root,
            elements: IndexMap::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            events: Vec::new(),
            deferred: VecDeque::new(),
        }
    }

    /// The root container element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Look up an element by name; the root resolves by its reserved name
    pub fn element(&self, name: &str) -> Option<&Element> {
        if name == self.root.name {
            return Some(&self.root);
        }
        self.elements.get(name)
    }

    /// Look up a mutable element by name
    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        if name == self.root.name {
            return Some(&mut self.root);
        }
        self.elements.get_mut(name)
    }

    /// Iterate all non-root elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Names of all non-root elements, in insertion order
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Number of non-root elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add an element to the scene
    pub fn insert(&mut self, element: Element) -> Result<(), SceneError> {
        if element.name == self.root.name || self.elements.contains_key(&element.name) {
            return Err(SceneError::DuplicateName(element.name));
        }
        self.elements.insert(element.name.clone(), element);
        Ok(())
    }

    /// Remove an element. Connection configs referring to it are left in
    /// place; derivation drops them as dangling.
    pub fn remove(&mut self, name: &str) -> Option<Element> {
        self.elements.shift_remove(name)
    }

    /// Rename an element, keeping its position in the element order.
    /// References by the old name are intentionally not rewritten.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> Result<(), SceneError> {
        let new = new.into();
        if new == self.root.name || self.elements.contains_key(&new) {
            return Err(SceneError::DuplicateName(new));
        }
        let index = self
            .elements
            .get_index_of(old)
            .ok_or_else(|| SceneError::ElementNotFound(old.to_string()))?;
        let Some((_, mut element)) = self.elements.shift_remove_index(index) else {
            return Err(SceneError::ElementNotFound(old.to_string()));
        };
        element.name = new.clone();
        self.elements.shift_insert(index, new, element);
        Ok(())
    }

    /// Convert a screen position to canvas space
    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Convert a canvas position to screen space
    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        (canvas.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    /// Record that an element's persisted state changed
    pub fn notify_changed(&mut self, name: &str) {
        tracing::trace!(element = name, "element changed");
        self.events.push(SceneEvent::ElementChanged(name.to_string()));
    }

    /// Request a persist/save pass from the host
    pub fn request_save(&mut self) {
        self.events.push(SceneEvent::SaveRequested);
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Schedule work for after the current update pass
    pub fn defer(&mut self, action: DeferredAction) {
        self.deferred.push_back(action);
    }

    /// Drain deferred actions in FIFO order
    pub fn take_deferred(&mut self) -> Vec<DeferredAction> {
        self.deferred.drain(..).collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}
