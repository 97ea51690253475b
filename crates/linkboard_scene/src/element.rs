// SPDX-License-Identifier: MIT OR Apache-2.0
//! Element definitions for the canvas scene.

use crate::connection::ConnectionConfig;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable options bag stored on each element.
///
/// Connections are persisted here, on the *source* element; everything else
/// an editor wants to hang off an element goes alongside them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementOptions {
    /// Outgoing connections authored from this element
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// A positioned, sized, rotatable node in the canvas scene.
///
/// The `name` is the foreign key other elements' connection configs refer to.
/// Renaming an element leaves those references dangling on purpose (soft
/// delete semantics - dangling connections are dropped from derived state,
/// not errors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique instance ID
    pub id: ElementId,
    /// Display name, unique within the scene
    pub name: String,
    /// Center position in canvas space
    pub center: Pos2,
    /// Full width/height
    pub size: Vec2,
    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
    /// Mutable options bag
    pub options: ElementOptions,
}

impl Element {
    /// Create a new element at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            center: Pos2::ZERO,
            size: Vec2::new(100.0, 100.0),
            rotation: 0.0,
            options: ElementOptions::default(),
        }
    }

    /// Set the center position
    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center = Pos2::new(x, y);
        self
    }

    /// Set the size
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Vec2::new(w, h);
        self
    }

    /// Set the rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Current rendered box, the input to all anchor geometry
    pub fn bounding_box(&self) -> ElementBox {
        ElementBox {
            center: self.center,
            half: self.size * 0.5,
            rotation: self.rotation,
        }
    }
}

/// Rotated bounding geometry of an element: center, half-extents and the
/// rotation applied around the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    /// Center in canvas space
    pub center: Pos2,
    /// Half-width / half-height
    pub half: Vec2,
    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
}

impl ElementBox {
    /// Create a box from center, full size and rotation
    pub fn new(center: Pos2, size: Vec2, rotation: f32) -> Self {
        Self {
            center,
            half: size * 0.5,
            rotation,
        }
    }
}
