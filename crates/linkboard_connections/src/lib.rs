// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection subsystem for the Linkboard canvas.
//!
//! This crate computes, maintains and mutates directional visual links
//! between elements of a [`linkboard_scene::Scene`]:
//! - Anchor geometry under rotation and scale
//! - Derived connection state, rebuilt on demand from the element graph
//! - Movement synchronization that keeps vertex routing visually stable
//! - An interactive drag controller for creating connections and editing
//!   vertices
//! - A single-slot selection observable for the editor side panel
//!
//! ## Architecture
//!
//! Persisted state lives exclusively in each source element's options bag;
//! everything here is either pure geometry or ephemeral derived state keyed
//! by `(source element name, index)`.

pub mod drag;
pub mod geometry;
pub mod manager;
pub mod path;
pub mod selection;
pub mod state;
pub mod sync;

pub use drag::{DragController, DragMode, PreviewSink};
pub use manager::Connections;
pub use path::{build_path, connection_points, segment_midpoints, PathSegment};
pub use selection::SelectionObservable;
pub use state::{derive_connections, ConnectionKey, ConnectionState};
pub use sync::{after_group_move, after_individual_move, MoveTarget};
