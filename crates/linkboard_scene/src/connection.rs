// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted connection config, stored on the source element.
//!
//! Legacy option shapes (bare color strings, bare numeric sizes) are accepted
//! at the serde boundary and normalized into canonical records there; nothing
//! past deserialization ever sees the legacy forms.

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Engine-enforced cap on intermediate vertices per connection
pub const MAX_VERTICES: usize = 10;

/// A normalized anchor point on an element.
///
/// Each axis spans roughly [-1, 1] with (0, 0) at the element center. For an
/// open connection (no target element) the target anchor instead carries
/// absolute canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal component
    pub x: f32,
    /// Vertical component
    pub y: f32,
}

impl Anchor {
    /// Create an anchor
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An intermediate routing point, expressed as a per-axis fraction (0..1)
/// along the straight line from `source_original` to `target_original`.
///
/// Fractions refer to the cached original endpoints, not the live anchors,
/// so the path tracks element movement while preserving relative routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Fraction along the baseline x axis
    pub x: f32,
    /// Fraction along the baseline y axis
    pub y: f32,
}

impl Vertex {
    /// Create a vertex fraction
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Canonical connection color.
///
/// Deserializes from either the canonical `{ "fixed": "..." }` record or a
/// legacy bare string; only the canonical form is ever written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorConfig {
    /// Fixed color value (theme token or css color)
    pub fixed: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            fixed: "white".to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ColorConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ColorVisitor;

        impl<'de> serde::de::Visitor<'de> for ColorVisitor {
            type Value = ColorConfig;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a color string or a { fixed } record")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ColorConfig {
                    fixed: value.to_string(),
                })
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut fixed = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "fixed" {
                        fixed = Some(map.next_value::<String>()?);
                    } else {
                        map.next_value::<serde::de::IgnoredAny>()?;
                    }
                }
                Ok(ColorConfig {
                    fixed: fixed.unwrap_or_else(|| ColorConfig::default().fixed),
                })
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

/// Canonical connection line size.
///
/// Deserializes from either the canonical record or a legacy bare number.
/// A legacy bare number is replaced by the default range, matching the
/// historical fixup rather than preserving the number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeConfig {
    /// Fixed line width
    pub fixed: f32,
    /// Lower bound for data-driven sizing
    pub min: f32,
    /// Upper bound for data-driven sizing
    pub max: f32,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            fixed: 2.0,
            min: 1.0,
            max: 10.0,
        }
    }
}

impl<'de> Deserialize<'de> for SizeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SizeVisitor;

        impl<'de> serde::de::Visitor<'de> for SizeVisitor {
            type Value = SizeConfig;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a bare number or a { fixed, min, max } record")
            }

            fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(SizeConfig::default())
            }

            fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(SizeConfig::default())
            }

            fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(SizeConfig::default())
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut size = SizeConfig::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "fixed" => size.fixed = map.next_value()?,
                        "min" => size.min = map.next_value()?,
                        "max" => size.max = map.next_value()?,
                        _ => {
                            map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(size)
            }
        }

        deserializer.deserialize_any(SizeVisitor)
    }
}

/// Arrow direction rendered on the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    /// Arrowhead at the target end
    #[default]
    Forward,
    /// Arrowhead at the source end
    Reverse,
    /// Arrowheads at both ends
    Both,
    /// No arrowheads
    None,
}

/// Dash pattern of the connection line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Continuous line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
}

/// Line style, opaque to the geometry engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    /// Dash pattern
    #[serde(default)]
    pub kind: LineKind,
    /// Animate the dash offset
    #[serde(default)]
    pub animate: bool,
}

/// Persisted, user-authored connection record.
///
/// Lives in the *source* element's options; `target_name` is a soft reference
/// into the scene by element name. `None` means the target is the parent
/// container and `target` carries absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Normalized anchor on the source element
    pub source: Anchor,
    /// Normalized anchor on the target element, or absolute coordinates for
    /// an open connection
    pub target: Anchor,
    /// Target element name; `None` targets the parent container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Line color
    #[serde(default)]
    pub color: ColorConfig,
    /// Line size
    #[serde(default)]
    pub size: SizeConfig,
    /// Corner radius for vertex routing, straight corners when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Arrow direction
    #[serde(default)]
    pub direction: ArrowDirection,
    /// Line style
    #[serde(default)]
    pub line_style: LineStyle,
    /// Intermediate routing points, capped at [`MAX_VERTICES`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Vertex>,
    /// Absolute source endpoint captured when vertices were last authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_original: Option<Pos2>,
    /// Absolute target endpoint captured when vertices were last authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_original: Option<Pos2>,
}

impl ConnectionConfig {
    /// Create a connection with default styling
    pub fn new(source: Anchor, target: Anchor, target_name: Option<String>) -> Self {
        Self {
            source,
            target,
            target_name,
            color: ColorConfig::default(),
            size: SizeConfig::default(),
            radius: None,
            direction: ArrowDirection::default(),
            line_style: LineStyle::default(),
            vertices: Vec::new(),
            source_original: None,
            target_original: None,
        }
    }

    /// Whether another vertex may be added
    pub fn can_add_vertex(&self) -> bool {
        self.vertices.len() < MAX_VERTICES
    }

    /// Insert a vertex at `index`, refusing beyond the cap or out of bounds.
    /// Returns whether the vertex was inserted.
    pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> bool {
        if !self.can_add_vertex() || index > self.vertices.len() {
            return false;
        }
        self.vertices.insert(index, vertex);
        true
    }
}
