// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene model for the Linkboard canvas.
//!
//! This crate provides the data layer the connection subsystem operates on:
//! - Named, positioned, rotatable elements with a mutable options bag
//! - The persisted connection config stored on each source element
//! - A scene container with name lookup, view transforms, change tracking
//!   and a deferred-action queue

pub mod connection;
pub mod element;
pub mod scene;

pub use connection::{
    Anchor, ArrowDirection, ColorConfig, ConnectionConfig, LineKind, LineStyle, SizeConfig,
    Vertex, MAX_VERTICES,
};
pub use element::{Element, ElementBox, ElementId, ElementOptions};
pub use scene::{DeferredAction, Scene, SceneError, SceneEvent, ROOT_NAME};
