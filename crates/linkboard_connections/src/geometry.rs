// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure anchor/coordinate geometry.
//!
//! Everything here is stateless: conversions between normalized per-element
//! anchors and absolute canvas coordinates under rotation, endpoint
//! resolution for a connection config, and the usual Euclidean helpers.

use egui::{Pos2, Vec2};
use linkboard_scene::{Anchor, ConnectionConfig, ElementBox};

/// Substitute for an exactly-zero denominator in fraction math.
///
/// Shape preservation degrades gracefully instead of producing NaN when a
/// baseline axis or half-extent collapses to zero.
pub const ZERO_GUARD: f32 = 0.001;

fn non_zero(v: f32) -> f32 {
    if v == 0.0 {
        ZERO_GUARD
    } else {
        v
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Absolute canvas point for a normalized anchor on a rotated element.
///
/// The normalized offset is scaled by the half-extents, rotated by the
/// element's rotation, then translated to the element center. Exact inverse
/// of [`canvas_to_anchor`].
pub fn anchor_to_canvas(bbox: &ElementBox, anchor: Anchor) -> Pos2 {
    let local = Vec2::new(anchor.x * bbox.half.x, anchor.y * bbox.half.y);
    bbox.center + rotate(local, bbox.rotation)
}

/// Normalized anchor for an absolute canvas point on a rotated element.
pub fn canvas_to_anchor(bbox: &ElementBox, point: Pos2) -> Anchor {
    let local = rotate(point - bbox.center, -bbox.rotation);
    Anchor::new(
        local.x / non_zero(bbox.half.x),
        local.y / non_zero(bbox.half.y),
    )
}

/// Resolve a connection's current absolute endpoints.
///
/// The source anchor is always normalized against the source box. The target
/// anchor is normalized against `target_box` when the config names a target
/// and the box is available; otherwise it is treated as already-absolute
/// free coordinates (open connection).
pub fn resolve_endpoints(
    source_box: &ElementBox,
    target_box: Option<&ElementBox>,
    config: &ConnectionConfig,
) -> (Pos2, Pos2) {
    let from = anchor_to_canvas(source_box, config.source);
    let to = match (&config.target_name, target_box) {
        (Some(_), Some(bbox)) => anchor_to_canvas(bbox, config.target),
        _ => Pos2::new(config.target.x, config.target.y),
    };
    (from, to)
}

/// Angle of the segment from `a` to `b`, in radians
pub fn angle_between(a: Pos2, b: Pos2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Euclidean distance between two points
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    (b - a).length()
}

/// Midpoint of the segment from `a` to `b`
pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Normalize an angle difference into (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    }
    while a <= -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}
