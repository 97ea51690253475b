// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-slot connection selection with one subscriber.

use crate::state::{ConnectionKey, ConnectionState};

type Subscriber = Box<dyn FnMut(Option<&ConnectionState>)>;

/// Holds the currently selected connection, if any.
///
/// Last write wins; publishing an unchanged value is a no-op. A single
/// subscriber (the editor side panel) receives every effective change.
#[derive(Default)]
pub struct SelectionObservable {
    current: Option<ConnectionState>,
    subscriber: Option<Subscriber>,
}

impl SelectionObservable {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the subscriber, replacing any previous one. The subscriber is
    /// immediately called with the current value.
    pub fn subscribe(&mut self, mut subscriber: impl FnMut(Option<&ConnectionState>) + 'static) {
        subscriber(self.current.as_ref());
        self.subscriber = Some(Box::new(subscriber));
    }

    /// The currently selected connection
    pub fn current(&self) -> Option<&ConnectionState> {
        self.current.as_ref()
    }

    /// Whether the connection with this key is selected
    pub fn is_selected(&self, key: &ConnectionKey) -> bool {
        self.current.as_ref().is_some_and(|state| state.key == *key)
    }

    /// Publish a new selection. Structurally identical values are dropped
    /// without notifying the subscriber.
    pub fn select(&mut self, value: Option<ConnectionState>) {
        if self.current == value {
            return;
        }
        self.current = value;
        if let Some(subscriber) = &mut self.subscriber {
            subscriber(self.current.as_ref());
        }
    }
}
