// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vertex routing: baseline fraction math and path segment construction.

use crate::geometry::{angle_between, distance, midpoint, wrap_angle, ZERO_GUARD};
use egui::{Pos2, Vec2};
use linkboard_scene::{ConnectionConfig, Vertex};

/// One drawing command of a connection path.
///
/// A renderer turns these into whatever its surface wants (SVG path data,
/// painter line segments, tessellated meshes); the geometry engine only
/// promises the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a subpath
    MoveTo(Pos2),
    /// Straight segment
    LineTo(Pos2),
    /// Quadratic curve through `control`
    QuadTo {
        /// Control point (the rounded vertex itself)
        control: Pos2,
        /// Arc exit point
        to: Pos2,
    },
}

/// Absolute position of a vertex fraction on the given baseline
pub fn vertex_to_canvas(vertex: Vertex, baseline_from: Pos2, baseline_to: Pos2) -> Pos2 {
    Pos2::new(
        baseline_from.x + vertex.x * (baseline_to.x - baseline_from.x),
        baseline_from.y + vertex.y * (baseline_to.y - baseline_from.y),
    )
}

/// Fraction of an absolute point along the given baseline, per axis.
///
/// A zero-length baseline axis is substituted with [`ZERO_GUARD`] so the
/// result stays finite.
pub fn fraction_along(point: Pos2, baseline_from: Pos2, baseline_to: Pos2) -> Vertex {
    let mut dx = baseline_to.x - baseline_from.x;
    let mut dy = baseline_to.y - baseline_from.y;
    if dx == 0.0 {
        dx = ZERO_GUARD;
    }
    if dy == 0.0 {
        dy = ZERO_GUARD;
    }
    Vertex::new((point.x - baseline_from.x) / dx, (point.y - baseline_from.y) / dy)
}

/// Full polyline of a connection: live source endpoint, each vertex resolved
/// against the originals baseline, live target endpoint.
///
/// Absent originals fall back to the live endpoints, which is exact for
/// configs whose vertices were authored at the current positions.
pub fn connection_points(config: &ConnectionConfig, from: Pos2, to: Pos2) -> Vec<Pos2> {
    let baseline_from = config.source_original.unwrap_or(from);
    let baseline_to = config.target_original.unwrap_or(to);
    let mut points = Vec::with_capacity(config.vertices.len() + 2);
    points.push(from);
    for vertex in &config.vertices {
        points.push(vertex_to_canvas(*vertex, baseline_from, baseline_to));
    }
    points.push(to);
    points
}

/// Build path segments through `points`, rounding interior vertices when a
/// corner radius is given.
///
/// For each interior vertex the arc half-length is `radius * tan(delta/2)`,
/// where delta is the turn angle, clamped to half of the shorter adjacent
/// segment so arcs on short segments never overlap. The corner is emitted as
/// a line to the arc entry followed by a quadratic curve through the vertex.
pub fn build_path(points: &[Pos2], radius: Option<f32>) -> Vec<PathSegment> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let mut segments = vec![PathSegment::MoveTo(*first)];

    let radius = radius.filter(|r| *r > 0.0);
    let (Some(radius), true) = (radius, points.len() >= 3) else {
        for point in rest {
            segments.push(PathSegment::LineTo(*point));
        }
        return segments;
    };

    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let vertex = points[i];
        let next = points[i + 1];

        let len_in = distance(prev, vertex);
        let len_out = distance(vertex, next);
        let angle_in = angle_between(prev, vertex);
        let angle_out = angle_between(vertex, next);
        let delta = wrap_angle(angle_out - angle_in);

        let mut half_arc = (radius * (delta * 0.5).tan()).abs();
        half_arc = half_arc.min(len_in * 0.5).min(len_out * 0.5);

        if half_arc <= f32::EPSILON || len_in <= f32::EPSILON || len_out <= f32::EPSILON {
            // Locally straight or degenerate corner
            segments.push(PathSegment::LineTo(vertex));
            continue;
        }

        let dir_in = Vec2::angled(angle_in);
        let dir_out = Vec2::angled(angle_out);
        let entry = vertex - dir_in * half_arc;
        let exit = vertex + dir_out * half_arc;
        segments.push(PathSegment::LineTo(entry));
        segments.push(PathSegment::QuadTo {
            control: vertex,
            to: exit,
        });
    }

    if let Some(last) = points.last() {
        segments.push(PathSegment::LineTo(*last));
    }
    segments
}

/// Midpoint of every segment of a polyline, where the editor places its
/// vertex "add" handles.
pub fn segment_midpoints(points: &[Pos2]) -> Vec<Pos2> {
    points.windows(2).map(|w| midpoint(w[0], w[1])).collect()
}
