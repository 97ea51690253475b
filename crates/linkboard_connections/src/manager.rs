// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection coordinator: derived-state ownership, selection lifecycle,
//! out-of-band edits and deletion.

use crate::selection::SelectionObservable;
use crate::state::{derive_connections, ConnectionKey, ConnectionState};
use linkboard_scene::{ConnectionConfig, DeferredAction, Scene};

/// Owns the derived connection list and the selection.
///
/// `update_state` is the single rebuild entry point: it drains the scene's
/// deferred-action queue, re-derives the list and re-matches the selection by
/// `(source, index)`. A selection that no longer matches anything is left
/// stale rather than cleared.
pub struct Connections {
    states: Vec<ConnectionState>,
    selection: SelectionObservable,
    /// Explicit gate for selection changes, threaded here instead of a
    /// module-level toggle. Hosts flip it off while e.g. a tree view drives
    /// its own selection callbacks.
    pub selection_enabled: bool,
}

impl Connections {
    /// Create an empty coordinator
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            selection: SelectionObservable::new(),
            selection_enabled: true,
        }
    }

    /// Current derived connection list
    pub fn states(&self) -> &[ConnectionState] {
        &self.states
    }

    /// Currently selected connection
    pub fn selected(&self) -> Option<&ConnectionState> {
        self.selection.current()
    }

    /// Install the selection subscriber (editor side panel)
    pub fn subscribe(&mut self, subscriber: impl FnMut(Option<&ConnectionState>) + 'static) {
        self.selection.subscribe(subscriber);
    }

    /// Select a connection, or clear with `None`. No-op while selection is
    /// disabled or when the value is unchanged.
    pub fn select(&mut self, state: Option<&ConnectionState>) {
        if !self.selection_enabled {
            return;
        }
        self.selection.select(state.cloned());
    }

    /// Rebuild derived state from the element graph.
    ///
    /// Called after any out-of-band structural edit (element add/remove/
    /// rename) and after every committed gesture.
    pub fn update_state(&mut self, scene: &mut Scene) {
        let deferred = scene.take_deferred();
        self.states = derive_connections(scene);
        tracing::trace!(connections = self.states.len(), "derived state rebuilt");

        let reselect = deferred.iter().rev().find_map(|action| match action {
            DeferredAction::Reselect { source, index } => {
                Some(ConnectionKey::new(source.clone(), *index))
            }
            DeferredAction::Rebuild => None,
        });
        let key = match (&reselect, self.selection.current()) {
            (Some(key), _) => Some(key.clone()),
            (None, Some(current)) => Some(current.key.clone()),
            (None, None) => None,
        };
        if let Some(key) = key {
            if let Some(state) = self.find(&key).cloned() {
                self.selection.select(Some(state));
            }
            // No match: selection stays stale on purpose.
        }
    }

    /// Find a derived state by key
    pub fn find(&self, key: &ConnectionKey) -> Option<&ConnectionState> {
        self.states.iter().find(|s| s.key == *key)
    }

    /// Apply a style edit from the editor panel to the persisted config,
    /// then notify, save and rebuild.
    pub fn apply_edit(&mut self, scene: &mut Scene, key: &ConnectionKey, updated: ConnectionConfig) {
        let Some(config) = scene
            .element_mut(&key.source)
            .and_then(|e| e.options.connections.get_mut(key.index))
        else {
            return;
        };
        *config = updated;
        scene.notify_changed(&key.source);
        scene.request_save();
        self.update_state(scene);
    }

    /// Delete the currently selected connection.
    ///
    /// Ignored while the host reports focus in a text input, and when
    /// nothing is selected. Removes the config from the source element,
    /// notifies, clears the selection and rebuilds.
    pub fn delete_selected(&mut self, scene: &mut Scene, in_text_input: bool) {
        if in_text_input {
            return;
        }
        let Some(key) = self.selection.current().map(|s| s.key.clone()) else {
            return;
        };
        let Some(element) = scene.element_mut(&key.source) else {
            return;
        };
        if key.index >= element.options.connections.len() {
            return;
        }
        element.options.connections.remove(key.index);
        tracing::debug!(source = %key.source, index = key.index, "connection deleted");
        scene.notify_changed(&key.source);
        scene.request_save();
        self.selection.select(None);
        self.update_state(scene);
    }
}

impl Default for Connections {
    fn default() -> Self {
        Self::new()
    }
}
