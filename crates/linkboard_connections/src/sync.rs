// SPDX-License-Identifier: MIT OR Apache-2.0
//! Movement synchronization: keeping cached originals and vertex fractions
//! consistent when elements move.
//!
//! Vertex fractions are interpreted against the cached original endpoints,
//! so whenever an original is rewritten every fraction must be remapped to
//! keep the absolute vertex position unchanged (shape-preserving move).

use crate::geometry::resolve_endpoints;
use crate::path::{fraction_along, vertex_to_canvas};
use crate::state::{ConnectionKey, ConnectionState};
use linkboard_scene::Scene;

/// A visual handle participating in a group move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTarget {
    /// An element's own handle, by name
    Element(String),
    /// A connection's own visual representation
    ConnectionHandle(ConnectionKey),
}

/// Update connections touching `moved` after it moved on its own.
///
/// Only the moved side's cached original is rewritten; the other side stays
/// frozen so the path keeps flowing from wherever its vertices were authored.
pub fn after_individual_move(scene: &mut Scene, moved: &str, states: &[ConnectionState]) {
    for state in states {
        let moved_is_source = state.key.source == moved;
        let moved_is_target = state.target_name == moved;
        if !moved_is_source && !moved_is_target {
            continue;
        }
        resync_connection(scene, state, moved_is_source, moved_is_target);
    }
}

fn resync_connection(
    scene: &mut Scene,
    state: &ConnectionState,
    update_source: bool,
    update_target: bool,
) {
    let Some((from, to)) = current_endpoints(scene, state) else {
        return;
    };
    let Some(config) = state.config_mut(scene) else {
        return;
    };

    let old_from = config.source_original.unwrap_or(from);
    let old_to = config.target_original.unwrap_or(to);
    let new_from = if update_source { from } else { old_from };
    let new_to = if update_target { to } else { old_to };

    for vertex in &mut config.vertices {
        let absolute = vertex_to_canvas(*vertex, old_from, old_to);
        *vertex = fraction_along(absolute, new_from, new_to);
    }
    if update_source {
        config.source_original = Some(new_from);
    }
    if update_target {
        config.target_original = Some(new_to);
    }
}

/// Update connections after a multi-selection moved as a group.
///
/// A connection whose own handle is part of the selection is skipped - its
/// drag handling repositions it. When both endpoints' element handles moved
/// together the connection moved rigidly, so both originals are rewritten
/// without touching vertex fractions. With only one (or neither) endpoint in
/// the selection the originals stay frozen; a lone endpoint move flows
/// through [`after_individual_move`] instead.
pub fn after_group_move(scene: &mut Scene, targets: &[MoveTarget], states: &[ConnectionState]) {
    for state in states {
        if targets
            .iter()
            .any(|t| matches!(t, MoveTarget::ConnectionHandle(key) if *key == state.key))
        {
            continue;
        }

        let source_moved = targets
            .iter()
            .any(|t| matches!(t, MoveTarget::Element(name) if *name == state.key.source));
        let target_moved = targets
            .iter()
            .any(|t| matches!(t, MoveTarget::Element(name) if *name == state.target_name));
        if !(source_moved && target_moved) {
            continue;
        }

        let Some((from, to)) = current_endpoints(scene, state) else {
            continue;
        };
        let Some(config) = state.config_mut(scene) else {
            continue;
        };
        config.source_original = Some(from);
        config.target_original = Some(to);
    }
}

/// Current absolute endpoints of a derived connection, if its elements'
/// boxes are still available.
pub fn current_endpoints(
    scene: &Scene,
    state: &ConnectionState,
) -> Option<(egui::Pos2, egui::Pos2)> {
    let source = scene.element(&state.key.source)?;
    let config = source.options.connections.get(state.key.index)?;
    let target_box = match &config.target_name {
        Some(name) => Some(scene.element(name)?.bounding_box()),
        None => None,
    };
    Some(resolve_endpoints(
        &source.bounding_box(),
        target_box.as_ref(),
        config,
    ))
}
