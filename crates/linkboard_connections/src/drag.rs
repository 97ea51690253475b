// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive drag editing: connection creation, vertex drag/insert.
//!
//! The controller is a plain state machine fed by the host's pointer events.
//! Live feedback goes through a [`PreviewSink`]; the host owns whatever
//! rendering sits behind it and is responsible for routing pointer-move/up
//! events to the controller for the whole gesture. Every `pointer_up` path
//! clears the preview, whether or not anything was committed.
//!
//! Pointer positions arrive in screen space and are converted through the
//! scene's view transform; positions handed to the sink stay in screen space.

use crate::geometry::{angle_between, canvas_to_anchor, distance, resolve_endpoints, wrap_angle};
use crate::path::{build_path, connection_points, fraction_along, PathSegment};
use crate::state::ConnectionKey;
use egui::{CursorIcon, Modifiers, Pos2};
use linkboard_scene::{Anchor, ConnectionConfig, ElementBox, Scene};

/// Pointer travel (screen px) before a press becomes a drawing gesture
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Ratio tolerance for orthogonal vertex snapping
pub const SNAP_RATIO: f32 = 0.05;

/// Turn angle (radians) under which a dragged vertex is considered redundant
pub const STRAIGHT_TOLERANCE: f32 = 0.05;

/// Live-feedback surface the controller draws into during a gesture.
///
/// Implementations render however they like (SVG attributes, egui painter,
/// nothing at all in tests); only the state transitions and the committed
/// config are part of the contract.
pub trait PreviewSink {
    /// Show the straight preview line of a connection being drawn
    fn set_line(&mut self, from: Pos2, to: Pos2);
    /// Show the preview path of a vertex edit
    fn set_path(&mut self, segments: &[PathSegment]);
    /// Update the pointer cursor
    fn set_cursor(&mut self, cursor: CursorIcon);
    /// Remove all preview feedback
    fn clear(&mut self);
}

/// Current gesture of the drag controller
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragMode {
    /// No gesture in progress
    #[default]
    Idle,
    /// Drawing a new connection from `source`
    Drawing {
        /// Source element name
        source: String,
        /// Press position (screen space)
        start: Pos2,
        /// Whether the movement threshold has been exceeded
        active: bool,
    },
    /// Relocating an existing vertex
    VertexDragging {
        /// Connection being edited
        key: ConnectionKey,
        /// Index of the dragged vertex
        vertex_index: usize,
    },
    /// Inserting a vertex from a segment midpoint handle
    VertexAdding {
        /// Connection being edited
        key: ConnectionKey,
        /// Segment the new vertex lands in (also its insertion index)
        segment_index: usize,
    },
}

/// Outcome of evaluating a vertex drop position
struct VertexDrop {
    /// Snapped candidate in canvas space
    position: Pos2,
    /// Whether the vertex has become redundant and should be removed
    remove: bool,
    /// Cursor reflecting the snap axis
    cursor: CursorIcon,
}

/// Stateful handler for mouse-driven connection editing.
pub struct DragController {
    mode: DragMode,
    hovered: Option<String>,
}

impl DragController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self {
            mode: DragMode::Idle,
            hovered: None,
        }
    }

    /// Current gesture state
    pub fn mode(&self) -> &DragMode {
        &self.mode
    }

    /// Element currently under the pointer
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Pointer entered an element. While idle this records the tentative
    /// source; while drawing it records the tentative target.
    pub fn hover_enter(&mut self, name: &str) {
        self.hovered = Some(name.to_string());
    }

    /// Pointer left an element
    pub fn hover_leave(&mut self, name: &str) {
        if self.hovered.as_deref() == Some(name) {
            self.hovered = None;
        }
    }

    /// Rotated box for the anchor-highlight overlay over the hovered element
    pub fn anchor_highlight(&self, scene: &Scene) -> Option<ElementBox> {
        let element = scene.element(self.hovered.as_deref()?)?;
        Some(element.bounding_box())
    }

    /// Press on the hovered element's anchor to start drawing a connection.
    /// Without a resolvable source this is a silent no-op. Drawing mode is
    /// not registered as active until the pointer travels past
    /// [`DRAG_THRESHOLD`], so a plain click never commits a connection.
    pub fn begin_connection(&mut self, preview: &mut dyn PreviewSink, pos: Pos2) {
        if self.mode != DragMode::Idle {
            return;
        }
        let Some(source) = self.hovered.clone() else {
            return;
        };
        preview.set_line(pos, pos);
        self.mode = DragMode::Drawing {
            source,
            start: pos,
            active: false,
        };
    }

    /// Press on an existing vertex handle
    pub fn begin_vertex_drag(&mut self, key: ConnectionKey, vertex_index: usize) {
        if self.mode == DragMode::Idle {
            self.mode = DragMode::VertexDragging { key, vertex_index };
        }
    }

    /// Press on a segment-midpoint add handle
    pub fn begin_vertex_add(&mut self, key: ConnectionKey, segment_index: usize) {
        if self.mode == DragMode::Idle {
            self.mode = DragMode::VertexAdding { key, segment_index };
        }
    }

    /// Pointer moved during a gesture
    pub fn pointer_move(
        &mut self,
        scene: &Scene,
        preview: &mut dyn PreviewSink,
        pos: Pos2,
        modifiers: Modifiers,
    ) {
        match &mut self.mode {
            DragMode::Idle => {}
            DragMode::Drawing { start, active, .. } => {
                if !*active && distance(*start, pos) > DRAG_THRESHOLD {
                    *active = true;
                }
                preview.set_line(*start, pos);
            }
            DragMode::VertexDragging { key, vertex_index } => {
                let key = key.clone();
                let vertex_index = *vertex_index;
                let canvas = scene.screen_to_canvas(pos);
                if let Some((drop, points)) =
                    evaluate_vertex_drop(scene, &key, vertex_index, canvas, modifiers)
                {
                    self.show_path_preview(scene, preview, &key, &points);
                    preview.set_cursor(drop.cursor);
                }
            }
            DragMode::VertexAdding { key, segment_index } => {
                let key = key.clone();
                let segment_index = *segment_index;
                let canvas = scene.screen_to_canvas(pos);
                if let Some(points) = points_with_insertion(scene, &key, segment_index, canvas) {
                    self.show_path_preview(scene, preview, &key, &points);
                }
            }
        }
    }

    /// Pointer released: commit the gesture if it got far enough.
    ///
    /// Returns the key of the connection that was created or edited.
    pub fn pointer_up(
        &mut self,
        scene: &mut Scene,
        preview: &mut dyn PreviewSink,
        pos: Pos2,
        modifiers: Modifiers,
    ) -> Option<ConnectionKey> {
        let mode = std::mem::take(&mut self.mode);
        preview.clear();
        match mode {
            DragMode::Idle => None,
            DragMode::Drawing { source, start, active } => {
                if !active {
                    return None;
                }
                self.commit_connection(scene, &source, start, pos)
            }
            DragMode::VertexDragging { key, vertex_index } => {
                self.commit_vertex_drop(scene, &key, vertex_index, pos, modifiers)
            }
            DragMode::VertexAdding { key, segment_index } => {
                self.commit_vertex_insert(scene, &key, segment_index, pos)
            }
        }
    }

    fn commit_connection(
        &mut self,
        scene: &mut Scene,
        source: &str,
        start: Pos2,
        end: Pos2,
    ) -> Option<ConnectionKey> {
        let source_box = scene.element(source)?.bounding_box();
        let start_canvas = scene.screen_to_canvas(start);
        let end_canvas = scene.screen_to_canvas(end);
        let source_anchor = canvas_to_anchor(&source_box, start_canvas);

        let target_element = self
            .hovered
            .as_deref()
            .and_then(|name| scene.element(name));
        let (target_anchor, target_name) = match target_element {
            Some(target) => (
                canvas_to_anchor(&target.bounding_box(), end_canvas),
                Some(target.name.clone()),
            ),
            None => (Anchor::new(end_canvas.x, end_canvas.y), None),
        };

        let config = ConnectionConfig::new(source_anchor, target_anchor, target_name.clone());
        let element = scene.element_mut(source)?;
        element.options.connections.push(config);
        let key = ConnectionKey::new(source, element.options.connections.len() - 1);

        tracing::debug!(source, target = ?target_name, "connection committed");
        scene.notify_changed(source);
        scene.request_save();
        Some(key)
    }

    fn commit_vertex_drop(
        &mut self,
        scene: &mut Scene,
        key: &ConnectionKey,
        vertex_index: usize,
        pos: Pos2,
        modifiers: Modifiers,
    ) -> Option<ConnectionKey> {
        let canvas = scene.screen_to_canvas(pos);
        let (drop, _) = evaluate_vertex_drop(scene, key, vertex_index, canvas, modifiers)?;
        let (from, to) = endpoints_for_key(scene, key)?;
        let config = config_mut(scene, key)?;

        if drop.remove {
            config.vertices.remove(vertex_index);
            tracing::debug!(source = %key.source, index = key.index, vertex_index, "vertex removed");
        } else {
            let baseline_from = config.source_original.unwrap_or(from);
            let baseline_to = config.target_original.unwrap_or(to);
            let fraction = fraction_along(drop.position, baseline_from, baseline_to);
            *config.vertices.get_mut(vertex_index)? = fraction;
        }

        scene.notify_changed(&key.source);
        scene.request_save();
        Some(key.clone())
    }

    fn commit_vertex_insert(
        &mut self,
        scene: &mut Scene,
        key: &ConnectionKey,
        segment_index: usize,
        pos: Pos2,
    ) -> Option<ConnectionKey> {
        let canvas = scene.screen_to_canvas(pos);
        let (from, to) = endpoints_for_key(scene, key)?;
        let config = config_mut(scene, key)?;
        if !config.can_add_vertex() {
            return None;
        }

        // The first vertex establishes the reference baseline all future
        // fraction math is done against.
        if config.vertices.is_empty() {
            config.source_original = Some(from);
            config.target_original = Some(to);
        }
        let baseline_from = config.source_original.unwrap_or(from);
        let baseline_to = config.target_original.unwrap_or(to);
        let fraction = fraction_along(canvas, baseline_from, baseline_to);
        let index = segment_index.min(config.vertices.len());
        if !config.insert_vertex(index, fraction) {
            return None;
        }

        tracing::debug!(source = %key.source, index = key.index, vertex_index = index, "vertex inserted");
        scene.notify_changed(&key.source);
        scene.request_save();
        Some(key.clone())
    }

    fn show_path_preview(
        &self,
        scene: &Scene,
        preview: &mut dyn PreviewSink,
        key: &ConnectionKey,
        canvas_points: &[Pos2],
    ) {
        let radius = config_ref(scene, key).and_then(|c| c.radius);
        let screen_points: Vec<Pos2> = canvas_points
            .iter()
            .map(|p| scene.canvas_to_screen(*p))
            .collect();
        let segments = build_path(&screen_points, radius.map(|r| r * scene.zoom));
        preview.set_path(&segments);
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

fn config_ref<'a>(scene: &'a Scene, key: &ConnectionKey) -> Option<&'a ConnectionConfig> {
    scene.element(&key.source)?.options.connections.get(key.index)
}

fn config_mut<'a>(scene: &'a mut Scene, key: &ConnectionKey) -> Option<&'a mut ConnectionConfig> {
    scene
        .element_mut(&key.source)?
        .options
        .connections
        .get_mut(key.index)
}

fn endpoints_for_key(scene: &Scene, key: &ConnectionKey) -> Option<(Pos2, Pos2)> {
    let source = scene.element(&key.source)?;
    let config = source.options.connections.get(key.index)?;
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

/// Polyline of the connection with the dragged vertex replaced by the
/// (snapped) candidate, plus the drop verdict.
fn evaluate_vertex_drop(
    scene: &Scene,
    key: &ConnectionKey,
    vertex_index: usize,
    canvas_pos: Pos2,
    modifiers: Modifiers,
) -> Option<(VertexDrop, Vec<Pos2>)> {
    let config = config_ref(scene, key)?;
    if vertex_index >= config.vertices.len() {
        return None;
    }
    let (from, to) = endpoints_for_key(scene, key)?;
    let mut points = connection_points(config, from, to);
    let point_index = vertex_index + 1;
    let prev = points[point_index - 1];
    let next = points[point_index + 1];

    let mut candidate = canvas_pos;
    let mut snapped_x = false;
    let mut snapped_y = false;
    // Ctrl suppresses both snapping and auto-removal.
    if !modifiers.ctrl {
        for neighbor in [prev, next] {
            let dist = distance(candidate, neighbor).max(f32::EPSILON);
            if (candidate.x - neighbor.x).abs() / dist < SNAP_RATIO {
                candidate.x = neighbor.x;
                snapped_x = true;
            }
            if (candidate.y - neighbor.y).abs() / dist < SNAP_RATIO {
                candidate.y = neighbor.y;
                snapped_y = true;
            }
        }
    }

    let cursor = match (snapped_x, snapped_y) {
        (true, true) => CursorIcon::Move,
        (true, false) => CursorIcon::ResizeColumn,
        (false, true) => CursorIcon::ResizeRow,
        (false, false) => CursorIcon::Default,
    };

    // The vertex is redundant when the path through the candidate is
    // locally straight.
    let turn = wrap_angle(angle_between(candidate, next) - angle_between(prev, candidate));
    let remove = !modifiers.ctrl && turn.abs() < STRAIGHT_TOLERANCE;

    points[point_index] = candidate;
    if remove {
        points.remove(point_index);
    }
    Some((
        VertexDrop {
            position: candidate,
            remove,
            cursor,
        },
        points,
    ))
}

/// Polyline of the connection with a candidate vertex inserted in
/// `segment_index`, for the add-handle preview.
fn points_with_insertion(
    scene: &Scene,
    key: &ConnectionKey,
    segment_index: usize,
    canvas_pos: Pos2,
) -> Option<Vec<Pos2>> {
    let config = config_ref(scene, key)?;
    let (from, to) = endpoints_for_key(scene, key)?;
    let mut points = connection_points(config, from, to);
    let index = (segment_index + 1).min(points.len() - 1);
    points.insert(index, canvas_pos);
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkboard_scene::{Element, SceneEvent, Vertex, MAX_VERTICES};

    #[derive(Default)]
    struct RecordingPreview {
        lines: Vec<(Pos2, Pos2)>,
        paths: Vec<Vec<PathSegment>>,
        cursors: Vec<CursorIcon>,
        clears: usize,
    }

    impl PreviewSink for RecordingPreview {
        fn set_line(&mut self, from: Pos2, to: Pos2) {
            self.lines.push((from, to));
        }
        fn set_path(&mut self, segments: &[PathSegment]) {
            self.paths.push(segments.to_vec());
        }
        fn set_cursor(&mut self, cursor: CursorIcon) {
            self.cursors.push(cursor);
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn scene_two_boxes(target_center_y: f32) -> Scene {
        let mut scene = Scene::default();
        scene
            .insert(Element::new("a").with_center(100.0, 100.0).with_size(50.0, 50.0))
            .unwrap();
        scene
            .insert(
                Element::new("b")
                    .with_center(300.0, target_center_y)
                    .with_size(50.0, 50.0),
            )
            .unwrap();
        scene
    }

    /// Scene with one a->b connection holding a single vertex bent off the
    /// baseline from (125,100) to (275,200).
    fn scene_with_vertex() -> (Scene, ConnectionKey) {
        let mut scene = scene_two_boxes(200.0);
        let mut config = ConnectionConfig::new(
            Anchor::new(1.0, 0.0),
            Anchor::new(-1.0, 0.0),
            Some("b".to_string()),
        );
        config.vertices = vec![Vertex::new(0.5, 0.8)];
        config.source_original = Some(Pos2::new(125.0, 100.0));
        config.target_original = Some(Pos2::new(275.0, 200.0));
        scene
            .element_mut("a")
            .unwrap()
            .options
            .connections
            .push(config);
        (scene, ConnectionKey::new("a", 0))
    }

    #[test]
    fn test_click_below_threshold_commits_nothing() {
        let mut scene = scene_two_boxes(100.0);
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.hover_enter("a");
        controller.begin_connection(&mut preview, Pos2::new(125.0, 100.0));
        controller.pointer_move(
            &scene,
            &mut preview,
            Pos2::new(127.0, 101.0),
            Modifiers::default(),
        );
        let committed = controller.pointer_up(
            &mut scene,
            &mut preview,
            Pos2::new(127.0, 101.0),
            Modifiers::default(),
        );

        assert!(committed.is_none());
        assert!(scene.element("a").unwrap().options.connections.is_empty());
        assert_eq!(preview.clears, 1);
        assert_eq!(*controller.mode(), DragMode::Idle);
    }

    #[test]
    fn test_drag_creates_connection_to_hovered_target() {
        let mut scene = scene_two_boxes(100.0);
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.hover_enter("a");
        controller.begin_connection(&mut preview, Pos2::new(125.0, 100.0));
        controller.pointer_move(
            &scene,
            &mut preview,
            Pos2::new(200.0, 100.0),
            Modifiers::default(),
        );
        controller.hover_enter("b");
        let key = controller
            .pointer_up(
                &mut scene,
                &mut preview,
                Pos2::new(275.0, 100.0),
                Modifiers::default(),
            )
            .unwrap();

        assert_eq!(key, ConnectionKey::new("a", 0));
        let config = &scene.element("a").unwrap().options.connections[0];
        assert_eq!(config.target_name.as_deref(), Some("b"));
        assert!(approx(config.source.x, 1.0) && approx(config.source.y, 0.0));
        assert!(approx(config.target.x, -1.0) && approx(config.target.y, 0.0));

        let events = scene.take_events();
        assert!(events.contains(&SceneEvent::ElementChanged("a".to_string())));
        assert!(events.contains(&SceneEvent::SaveRequested));
        assert_eq!(preview.clears, 1);
    }

    #[test]
    fn test_drag_to_empty_space_creates_open_connection() {
        let mut scene = scene_two_boxes(100.0);
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.hover_enter("a");
        controller.begin_connection(&mut preview, Pos2::new(125.0, 100.0));
        controller.hover_leave("a");
        controller.pointer_move(
            &scene,
            &mut preview,
            Pos2::new(400.0, 300.0),
            Modifiers::default(),
        );
        let key = controller
            .pointer_up(
                &mut scene,
                &mut preview,
                Pos2::new(400.0, 300.0),
                Modifiers::default(),
            )
            .unwrap();

        let config = &scene.element("a").unwrap().options.connections[key.index];
        assert!(config.target_name.is_none());
        assert!(approx(config.target.x, 400.0) && approx(config.target.y, 300.0));
    }

    #[test]
    fn test_drag_respects_view_transform() {
        let mut scene = scene_two_boxes(100.0);
        scene.zoom = 2.0;
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.hover_enter("a");
        controller.begin_connection(&mut preview, Pos2::new(250.0, 200.0));
        controller.pointer_move(
            &scene,
            &mut preview,
            Pos2::new(400.0, 200.0),
            Modifiers::default(),
        );
        controller.hover_enter("b");
        controller
            .pointer_up(
                &mut scene,
                &mut preview,
                Pos2::new(550.0, 200.0),
                Modifiers::default(),
            )
            .unwrap();

        let config = &scene.element("a").unwrap().options.connections[0];
        assert!(approx(config.source.x, 1.0) && approx(config.source.y, 0.0));
        assert!(approx(config.target.x, -1.0) && approx(config.target.y, 0.0));
    }

    #[test]
    fn test_drag_without_source_is_a_no_op() {
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();
        controller.begin_connection(&mut preview, Pos2::new(10.0, 10.0));
        assert_eq!(*controller.mode(), DragMode::Idle);
        assert!(preview.lines.is_empty());
    }

    #[test]
    fn test_vertex_auto_removed_when_path_straightens() {
        let (mut scene, key) = scene_with_vertex();
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_drag(key.clone(), 0);
        // Exactly on the straight line between the endpoints.
        let committed = controller.pointer_up(
            &mut scene,
            &mut preview,
            Pos2::new(200.0, 150.0),
            Modifiers::default(),
        );

        assert_eq!(committed, Some(key.clone()));
        assert!(scene.element("a").unwrap().options.connections[0]
            .vertices
            .is_empty());
        assert_eq!(preview.clears, 1);
    }

    #[test]
    fn test_vertex_relocated_when_still_bent() {
        let (mut scene, key) = scene_with_vertex();
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_drag(key.clone(), 0);
        controller
            .pointer_up(
                &mut scene,
                &mut preview,
                Pos2::new(150.0, 180.0),
                Modifiers::default(),
            )
            .unwrap();

        let vertices = &scene.element("a").unwrap().options.connections[0].vertices;
        assert_eq!(vertices.len(), 1);
        assert!(approx(vertices[0].x, (150.0 - 125.0) / 150.0));
        assert!(approx(vertices[0].y, 0.8));
    }

    #[test]
    fn test_modifier_disables_auto_removal() {
        let (mut scene, key) = scene_with_vertex();
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_drag(key, 0);
        let modifiers = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        controller
            .pointer_up(&mut scene, &mut preview, Pos2::new(200.0, 150.0), modifiers)
            .unwrap();

        let vertices = &scene.element("a").unwrap().options.connections[0].vertices;
        assert_eq!(vertices.len(), 1);
        assert!(approx(vertices[0].x, 0.5));
        assert!(approx(vertices[0].y, 0.5));
    }

    #[test]
    fn test_vertex_snaps_to_vertical_alignment() {
        let (mut scene, key) = scene_with_vertex();
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_drag(key, 0);
        // 1px off a vertical line through the source endpoint.
        let pos = Pos2::new(126.0, 180.0);
        controller.pointer_move(&scene, &mut preview, pos, Modifiers::default());
        assert!(preview.cursors.contains(&CursorIcon::ResizeColumn));

        controller
            .pointer_up(&mut scene, &mut preview, pos, Modifiers::default())
            .unwrap();
        let vertices = &scene.element("a").unwrap().options.connections[0].vertices;
        assert!(approx(vertices[0].x, 0.0));
    }

    #[test]
    fn test_vertex_add_captures_baseline_on_first_vertex() {
        let mut scene = scene_two_boxes(200.0);
        scene
            .element_mut("a")
            .unwrap()
            .options
            .connections
            .push(ConnectionConfig::new(
                Anchor::new(1.0, 0.0),
                Anchor::new(-1.0, 0.0),
                Some("b".to_string()),
            ));
        let key = ConnectionKey::new("a", 0);
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_add(key.clone(), 0);
        controller.pointer_move(
            &scene,
            &mut preview,
            Pos2::new(200.0, 150.0),
            Modifiers::default(),
        );
        assert_eq!(preview.paths.len(), 1);
        controller
            .pointer_up(
                &mut scene,
                &mut preview,
                Pos2::new(200.0, 150.0),
                Modifiers::default(),
            )
            .unwrap();

        let config = &scene.element("a").unwrap().options.connections[0];
        assert_eq!(config.source_original, Some(Pos2::new(125.0, 100.0)));
        assert_eq!(config.target_original, Some(Pos2::new(275.0, 200.0)));
        assert_eq!(config.vertices.len(), 1);
        assert!(approx(config.vertices[0].x, 0.5));
        assert!(approx(config.vertices[0].y, 0.5));
    }

    #[test]
    fn test_vertex_add_refused_at_cap() {
        let (mut scene, key) = scene_with_vertex();
        {
            let config = &mut scene.element_mut("a").unwrap().options.connections[0];
            while config.can_add_vertex() {
                let len = config.vertices.len();
                config.insert_vertex(len, Vertex::new(0.1, 0.1));
            }
        }
        let mut preview = RecordingPreview::default();
        let mut controller = DragController::new();

        controller.begin_vertex_add(key, 1);
        let committed = controller.pointer_up(
            &mut scene,
            &mut preview,
            Pos2::new(210.0, 160.0),
            Modifiers::default(),
        );

        assert!(committed.is_none());
        assert_eq!(
            scene.element("a").unwrap().options.connections[0].vertices.len(),
            MAX_VERTICES
        );
        assert_eq!(preview.clears, 1);
    }

    #[test]
    fn test_anchor_highlight_follows_hover() {
        let scene = scene_two_boxes(100.0);
        let mut controller = DragController::new();
        assert!(controller.anchor_highlight(&scene).is_none());
        controller.hover_enter("b");
        let bbox = controller.anchor_highlight(&scene).unwrap();
        assert_eq!(bbox.center, Pos2::new(300.0, 100.0));
        controller.hover_leave("b");
        assert!(controller.anchor_highlight(&scene).is_none());
    }
}
