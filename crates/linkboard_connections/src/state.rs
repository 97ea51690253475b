// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derived connection state.
//!
//! The derived list is ephemeral: it is discarded and rebuilt wholesale on
//! every update pass. Identity across rebuilds is the `(source name, index)`
//! pair, never object identity.

use egui::Pos2;
use linkboard_scene::{ConnectionConfig, Element, ElementId, Scene, Vertex};

/// Stable identity of a connection across derived-state rebuilds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    /// Source element name
    pub source: String,
    /// Index within the source element's connections list
    pub index: usize,
}

impl ConnectionKey {
    /// Create a key
    pub fn new(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

/// One derived connection: resolved endpoints plus denormalized copies of
/// the config fields the editor reads most.
///
/// The persisted config itself stays on the source element; [`Self::config`]
/// and [`Self::config_mut`] resolve it through the scene on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionState {
    /// Re-match identity
    pub key: ConnectionKey,
    /// Resolved source element ID
    pub source_id: ElementId,
    /// Resolved target element ID
    pub target_id: ElementId,
    /// Resolved target element name (the root container for open targets)
    pub target_name: String,
    /// Copy of the config's vertices
    pub vertices: Vec<Vertex>,
    /// Copy of the config's cached source endpoint
    pub source_original: Option<Pos2>,
    /// Copy of the config's cached target endpoint
    pub target_original: Option<Pos2>,
}

impl ConnectionState {
    /// The originating persisted config, if it still exists
    pub fn config<'a>(&self, scene: &'a Scene) -> Option<&'a ConnectionConfig> {
        scene
            .element(&self.key.source)?
            .options
            .connections
            .get(self.key.index)
    }

    /// Mutable access to the originating persisted config
    pub fn config_mut<'a>(&self, scene: &'a mut Scene) -> Option<&'a mut ConnectionConfig> {
        scene
            .element_mut(&self.key.source)?
            .options
            .connections
            .get_mut(self.key.index)
    }

    /// Resolved source element
    pub fn source<'a>(&self, scene: &'a Scene) -> Option<&'a Element> {
        scene.element(&self.key.source)
    }

    /// Resolved target element
    pub fn target<'a>(&self, scene: &'a Scene) -> Option<&'a Element> {
        scene.element(&self.target_name)
    }
}

/// Build the current connection list from the element graph.
///
/// Targets are resolved by name, falling back to the root container when the
/// config names none. A `target_name` that no longer resolves drops the
/// connection from the derived list silently - soft deletion of the target
/// does not require cascading cleanup of every source's config.
pub fn derive_connections(scene: &Scene) -> Vec<ConnectionState> {
    let mut states = Vec::new();
    for element in scene.elements() {
        for (index, config) in element.options.connections.iter().enumerate() {
            let target = match &config.target_name {
                Some(name) => match scene.element(name) {
                    Some(target) => target,
                    None => {
                        tracing::trace!(
                            source = %element.name,
                            target = %name,
                            "dropping connection with dangling target"
                        );
                        continue;
                    }
                },
                None => scene.root(),
            };
            states.push(ConnectionState {
                key: ConnectionKey::new(element.name.clone(), index),
                source_id: element.id,
                target_id: target.id,
                target_name: target.name.clone(),
                vertices: config.vertices.clone(),
                source_original: config.source_original,
                target_original: config.target_original,
            });
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkboard_scene::Anchor;

    fn linked_scene() -> Scene {
        let mut scene = Scene::default();
        let mut a = Element::new("a").with_center(100.0, 100.0).with_size(50.0, 50.0);
        a.options.connections.push(ConnectionConfig::new(
            Anchor::new(1.0, 0.0),
            Anchor::new(-1.0, 0.0),
            Some("b".to_string()),
        ));
        a.options.connections.push(ConnectionConfig::new(
            Anchor::new(0.0, 1.0),
            Anchor::new(400.0, 300.0),
            None,
        ));
        scene.insert(a).unwrap();
        scene
            .insert(Element::new("b").with_center(300.0, 100.0).with_size(50.0, 50.0))
            .unwrap();
        scene
    }

    #[test]
    fn test_derivation_resolves_targets_in_order() {
        let scene = linked_scene();
        let states = derive_connections(&scene);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].key, ConnectionKey::new("a", 0));
        assert_eq!(states[0].target_name, "b");
        assert_eq!(states[1].key, ConnectionKey::new("a", 1));
        assert_eq!(states[1].target_name, linkboard_scene::ROOT_NAME);
    }

    #[test]
    fn test_derivation_idempotent() {
        let scene = linked_scene();
        let first = derive_connections(&scene);
        let second = derive_connections(&scene);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dangling_target_dropped() {
        let mut scene = linked_scene();
        let before = derive_connections(&scene).len();
        scene.remove("b");
        let states = derive_connections(&scene);
        // Exactly the one dangling connection disappears.
        assert_eq!(states.len(), before - 1);
        assert!(states.iter().all(|s| s.target_name != "b"));
    }

    #[test]
    fn test_config_round_trip_through_key() {
        let mut scene = linked_scene();
        let states = derive_connections(&scene);
        let state = states[0].clone();

        let config = state.config(&scene).unwrap();
        assert_eq!(config.target_name.as_deref(), Some("b"));

        state.config_mut(&mut scene).unwrap().radius = Some(8.0);
        assert_eq!(state.config(&scene).unwrap().radius, Some(8.0));
    }
}
