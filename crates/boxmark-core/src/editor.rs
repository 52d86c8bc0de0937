//! Editor state: the rectangle collection, selection, active tool and the
//! in-flight gesture, plus event dispatch to the engines.

use crate::config::EditorConfig;
use crate::geometry::{Bounds, LayoutMetrics, ScaleFactors};
use crate::input::{EditorEvent, KeyEvent, PointerButton, PointerEvent};
use crate::rectangle::{Annotation, Rectangle, RectangleId};
use crate::selection::{DragSession, Handle, HandleKind, get_handles, hit_test_handles};
use crate::shortcuts::{EditorCommand, ShortcutRegistry};
use crate::tools::{Draft, ToolKind, apply_move, apply_resize};
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Size};

/// The gesture currently in flight. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// A rectangle is being drawn; it is not part of the collection yet.
    Drafting(Draft),
    /// The whole rectangle is being dragged.
    Moving(DragSession),
    /// One handle of the selected rectangle is being dragged.
    Resizing(DragSession),
}

/// Runtime editor state.
#[derive(Debug, Clone)]
pub struct Editor {
    pub config: EditorConfig,
    pub viewport: Viewport,
    rectangles: Vec<Rectangle>,
    /// Baseline the editor restores to and diffs against.
    baseline: Vec<Rectangle>,
    /// Annotations received before layout was measured.
    pending_annotations: Option<Vec<Annotation>>,
    selected: Option<RectangleId>,
    mode: EditorMode,
    tool: ToolKind,
    show_zoom_controls: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an empty, unmeasured editor.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            viewport: Viewport::new(&config),
            config,
            rectangles: Vec::new(),
            baseline: Vec::new(),
            pending_annotations: None,
            selected: None,
            mode: EditorMode::Idle,
            tool: ToolKind::default(),
            show_zoom_controls: false,
        }
    }

    // --- Queries ---

    /// The committed collection, bottom-most first.
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn baseline(&self) -> &[Rectangle] {
        &self.baseline
    }

    pub fn get_rectangle(&self, id: RectangleId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id() == id)
    }

    pub fn selected(&self) -> Option<RectangleId> {
        self.selected
    }

    pub fn selected_rectangle(&self) -> Option<&Rectangle> {
        self.selected.and_then(|id| self.get_rectangle(id))
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            EditorMode::Drafting(draft) => Some(draft),
            _ => None,
        }
    }

    /// Normalized layout bounds of the draft, for drawing.
    pub fn draft_preview(&self) -> Option<Bounds> {
        self.draft().map(|draft| draft.preview(self.viewport.zoom))
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.mode, EditorMode::Moving(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.mode, EditorMode::Resizing(_))
    }

    pub fn show_zoom_controls(&self) -> bool {
        self.show_zoom_controls
    }

    /// Whether detail popovers may be shown.
    pub fn shows_details(&self) -> bool {
        self.tool == ToolKind::Move && !self.is_moving() && !self.is_resizing()
    }

    /// Current effective scale, once layout is measured.
    pub fn effective_scale(&self) -> Option<ScaleFactors> {
        self.viewport.effective_scale()
    }

    /// Whether the collection differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        self.rectangles != self.baseline
    }

    /// Top-most rectangle under a layout point.
    pub fn rectangle_at(&self, point: Point) -> Option<RectangleId> {
        self.rectangles
            .iter()
            .rev()
            .find(|r| r.hit_test(point))
            .map(Rectangle::id)
    }

    /// Handles of the selected rectangle, in layout coordinates.
    pub fn handles(&self) -> Vec<Handle> {
        self.selected_rectangle()
            .map(|r| get_handles(&r.bounds))
            .unwrap_or_default()
    }

    /// Layout-space squares to draw for the selected rectangle's handles.
    ///
    /// Handles keep a constant on-screen size, so they shrink in layout
    /// pixels as the zoom grows.
    pub fn handle_boxes(&self) -> Vec<(HandleKind, Rect)> {
        let half = self.config.handle_size / self.viewport.zoom / 2.0;
        self.handles()
            .into_iter()
            .map(|h| {
                let rect = Rect::new(
                    h.position.x - half,
                    h.position.y - half,
                    h.position.x + half,
                    h.position.y + half,
                );
                (h.kind, rect)
            })
            .collect()
    }

    // --- Collection edits ---

    /// Install a baseline. Materialised now if layout is measured, otherwise
    /// as soon as it is.
    pub fn load_annotations(&mut self, annotations: Vec<Annotation>) {
        match self.viewport.metrics() {
            Some(metrics) => {
                self.pending_annotations = None;
                self.install_baseline(&annotations, &metrics);
            }
            None => {
                log::debug!(
                    "Deferring {} annotations until layout is measured",
                    annotations.len()
                );
                self.rectangles.clear();
                self.baseline.clear();
                self.selected = None;
                self.pending_annotations = Some(annotations);
            }
        }
    }

    fn install_baseline(&mut self, annotations: &[Annotation], metrics: &LayoutMetrics) {
        self.baseline = annotations
            .iter()
            .filter_map(|annotation| {
                let rect = Rectangle::from_annotation(annotation, metrics);
                if rect.is_none() {
                    log::warn!(
                        "Skipping annotation with unusable natural size {:?}",
                        annotation.natural_size
                    );
                }
                rect
            })
            .collect();
        self.rectangles = self.baseline.clone();
        self.selected = None;
        self.drop_stale_session();
        log::info!("Installed {} baseline rectangles", self.baseline.len());
    }

    fn materialise_pending(&mut self) {
        let Some(metrics) = self.viewport.metrics() else {
            return;
        };
        if let Some(annotations) = self.pending_annotations.take() {
            self.install_baseline(&annotations, &metrics);
        }
    }

    /// Select a rectangle. Returns false if it does not exist.
    pub fn select(&mut self, id: RectangleId) -> bool {
        if self.get_rectangle(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the selection. Returns true if something was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Append a copy of a rectangle with a fresh id and select it.
    pub fn duplicate(&mut self, id: RectangleId) -> Option<RectangleId> {
        let copy = self.get_rectangle(id)?.duplicate();
        let new_id = copy.id();
        self.rectangles.push(copy);
        self.selected = Some(new_id);
        log::debug!("Duplicated rectangle {id} as {new_id}");
        Some(new_id)
    }

    /// Remove a rectangle and clear the selection.
    pub fn delete(&mut self, id: RectangleId) -> bool {
        let before = self.rectangles.len();
        self.rectangles.retain(|r| r.id() != id);
        if self.rectangles.len() == before {
            return false;
        }
        self.selected = None;
        self.drop_stale_session();
        log::debug!("Deleted rectangle {id}");
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    /// Set a rectangle's name. The score is kept.
    pub fn set_name(&mut self, id: RectangleId, name: impl Into<String>) -> bool {
        match self.rectangles.iter_mut().find(|r| r.id() == id) {
            Some(rect) => {
                rect.name = Some(name.into());
                true
            }
            None => false,
        }
    }

    /// Set a rectangle's description. The score is kept.
    pub fn set_description(&mut self, id: RectangleId, description: impl Into<String>) -> bool {
        match self.rectangles.iter_mut().find(|r| r.id() == id) {
            Some(rect) => {
                rect.description = Some(description.into());
                true
            }
            None => false,
        }
    }

    /// Replace the collection with the baseline and deselect.
    pub fn restore(&mut self) {
        self.rectangles = self.baseline.clone();
        self.selected = None;
        self.drop_stale_session();
    }

    /// Remove every rectangle and deselect.
    pub fn clear_all(&mut self) {
        self.rectangles.clear();
        self.selected = None;
        self.drop_stale_session();
    }

    /// Deselect and hand out the collection for export.
    pub fn prepare_export(&mut self) -> &[Rectangle] {
        self.selected = None;
        &self.rectangles
    }

    /// Switch tool. Deselects and drops any draft.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if matches!(self.mode, EditorMode::Drafting(_)) {
            self.mode = EditorMode::Idle;
        }
        self.selected = None;
        self.tool = tool;
    }

    pub fn toggle_zoom_controls(&mut self) {
        self.show_zoom_controls = !self.show_zoom_controls;
    }

    /// End a move or resize whose rectangle no longer exists.
    fn drop_stale_session(&mut self) {
        let stale = match &self.mode {
            EditorMode::Moving(session) | EditorMode::Resizing(session) => {
                !self.rectangles.iter().any(|r| r.id() == session.rectangle_id)
            }
            _ => false,
        };
        if stale {
            log::debug!("Dropping drag session on a removed rectangle");
            self.mode = EditorMode::Idle;
        }
    }

    // --- Gestures ---

    /// Arm a move session on a rectangle, selecting it.
    pub fn begin_move(&mut self, id: RectangleId, client: Point) -> bool {
        if !matches!(self.mode, EditorMode::Idle) || !self.select(id) {
            return false;
        }
        log::debug!("Begin move of {id}");
        self.mode = EditorMode::Moving(DragSession::new(id, None, client));
        true
    }

    /// Arm a resize session on one handle of a rectangle, selecting it.
    pub fn begin_resize(&mut self, id: RectangleId, handle: HandleKind, client: Point) -> bool {
        if !matches!(self.mode, EditorMode::Idle) || !self.select(id) {
            return false;
        }
        log::debug!("Begin resize of {id} via {handle:?}");
        self.mode = EditorMode::Resizing(DragSession::new(id, Some(handle), client));
        true
    }

    /// Dispatch an event. Returns true if editor state changed.
    pub fn handle_event(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::Pointer(pointer) => self.handle_pointer(pointer),
            EditorEvent::ContainerResized(size) => self.handle_container_resized(size),
            EditorEvent::ImageLoaded(size) => {
                if !self.viewport.set_natural_size(size) {
                    return false;
                }
                log::debug!("Image natural size {size:?}");
                self.rescale_real_coordinates();
                self.materialise_pending();
                true
            }
            EditorEvent::ContainerMoved(origin) => {
                self.viewport.container_origin = origin;
                true
            }
            EditorEvent::Zoom { scale, center } => {
                self.viewport.zoom_to(scale, center);
                true
            }
            EditorEvent::Pan(delta) => {
                self.viewport.pan(delta);
                true
            }
            EditorEvent::DoubleClick(center) => {
                self.viewport.double_click(center);
                true
            }
            EditorEvent::Key(key) => self.handle_key(&key),
        }
    }

    /// Run the command bound to a key, if any.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        match ShortcutRegistry::lookup(event) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    pub fn execute(&mut self, command: EditorCommand) {
        log::debug!("Executing {command:?}");
        match command {
            EditorCommand::Cancel => {
                if matches!(self.mode, EditorMode::Drafting(_)) {
                    self.mode = EditorMode::Idle;
                }
                self.selected = None;
            }
            EditorCommand::DeleteSelected => {
                self.delete_selected();
            }
            EditorCommand::SelectTool(tool) => self.set_tool(tool),
            EditorCommand::ToggleZoomControls => self.toggle_zoom_controls(),
            EditorCommand::Restore => self.restore(),
            EditorCommand::ClearAll => self.clear_all(),
            EditorCommand::Deselect => {
                self.deselect();
            }
        }
    }

    fn handle_container_resized(&mut self, size: Size) -> bool {
        if !self.viewport.set_container_size(size) {
            return false;
        }
        let Some(container) = self.viewport.container_size() else {
            return false;
        };
        log::debug!("Container resized to {container:?}");
        for rect in self.rectangles.iter_mut().chain(self.baseline.iter_mut()) {
            rect.relayout(container);
        }
        self.materialise_pending();
        true
    }

    /// Re-derive real geometry from the displayed bounds after the natural
    /// image size changed.
    fn rescale_real_coordinates(&mut self) {
        let Some(metrics) = self.viewport.metrics() else {
            return;
        };
        for rect in self.rectangles.iter_mut().chain(self.baseline.iter_mut()) {
            rect.rescale_real(&metrics);
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
        }
    }

    fn pointer_down(&mut self, position: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary || !matches!(self.mode, EditorMode::Idle) {
            return false;
        }
        let Some(metrics) = self.viewport.metrics() else {
            return false;
        };

        match self.tool {
            ToolKind::Create => {
                let inside = self
                    .viewport
                    .container_client_box()
                    .is_some_and(|rect| rect.contains(position));
                if !inside {
                    return false;
                }
                let anchor = self.viewport.client_to_zoomed_offset(position);
                log::debug!("Begin draft at {anchor:?}");
                self.mode = EditorMode::Drafting(Draft::begin(anchor, &metrics));
                true
            }
            ToolKind::Move => {
                let layout = self.viewport.client_to_layout(position);
                let tolerance = self.config.handle_hit_tolerance / metrics.zoom;
                let handle = self.selected_rectangle().and_then(|r| {
                    hit_test_handles(&r.bounds, layout, tolerance).map(|h| (r.id(), h))
                });
                if let Some((id, handle)) = handle {
                    return self.begin_resize(id, handle, position);
                }
                match self.rectangle_at(layout) {
                    Some(id) => self.begin_move(id, position),
                    None => self.deselect(),
                }
            }
        }
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        let Some(metrics) = self.viewport.metrics() else {
            return false;
        };
        match &mut self.mode {
            EditorMode::Idle => false,
            EditorMode::Drafting(draft) => {
                draft.update(self.viewport.client_to_zoomed_offset(position), &metrics);
                true
            }
            EditorMode::Moving(session) | EditorMode::Resizing(session) => {
                let delta = session.advance(position) / metrics.zoom;
                let Some(rect) = self
                    .rectangles
                    .iter_mut()
                    .find(|r| r.id() == session.rectangle_id)
                else {
                    return false;
                };
                let bounds = match session.handle {
                    Some(handle) => apply_resize(rect.bounds, handle, delta, metrics.container),
                    None => apply_move(rect.bounds, delta, metrics.container),
                };
                log::trace!("Drag delta {delta:?} -> {bounds:?}");
                rect.commit_geometry(bounds, &metrics);
                true
            }
        }
    }

    fn pointer_up(&mut self, position: Point, button: PointerButton) -> bool {
        match std::mem::take(&mut self.mode) {
            EditorMode::Idle => false,
            EditorMode::Drafting(draft) if button != PointerButton::Primary => {
                self.mode = EditorMode::Drafting(draft);
                false
            }
            EditorMode::Drafting(mut draft) => {
                let Some(metrics) = self.viewport.metrics() else {
                    return true;
                };
                draft.update(self.viewport.client_to_zoomed_offset(position), &metrics);
                if let Some(rect) = draft.finish(&metrics, self.config.min_rectangle_size) {
                    let id = rect.id();
                    log::debug!("Created rectangle {id} at {:?}", rect.bounds);
                    self.rectangles.push(rect);
                    self.selected = Some(id);
                    self.tool = ToolKind::Move;
                }
                true
            }
            EditorMode::Moving(session) | EditorMode::Resizing(session) => {
                log::debug!("End drag of {}", session.rectangle_id);
                true
            }
        }
    }
}
