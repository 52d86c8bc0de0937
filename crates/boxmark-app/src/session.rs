//! Recorded sessions and their replay.

use crate::{AppError, AppResult};
use boxmark_core::{
    Annotation, Editor, EditorConfig, EditorEvent, KeyEvent, Modifiers, PointerButton,
    PointerEvent, Rectangle, RectangleId, ScaleFactors, ToolKind,
};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded interaction session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    /// Rendered container size, reported before any event.
    pub container: Option<Size>,
    /// Natural image size, reported before any event.
    pub image: Option<Size>,
    /// Client position of the container.
    pub container_origin: Option<Point>,
    pub annotations: Vec<Annotation>,
    pub events: Vec<SessionEvent>,
}

/// One recorded event, in a flat tagged form that is easy to write by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    ContainerResized {
        width: f64,
        height: f64,
    },
    ImageLoaded {
        width: f64,
        height: f64,
    },
    ContainerMoved {
        x: f64,
        y: f64,
    },
    Zoom {
        scale: f64,
        x: f64,
        y: f64,
    },
    Pan {
        dx: f64,
        dy: f64,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Toolbar tool switch.
    SetTool {
        tool: ToolKind,
    },
    /// Rename the selected rectangle.
    SetName {
        name: String,
    },
    /// Describe the selected rectangle.
    SetDescription {
        description: String,
    },
    /// Context-menu duplicate of the selected rectangle.
    Duplicate,
    /// Context-menu delete of the selected rectangle.
    Delete,
}

impl SessionEvent {
    /// The core event this maps to, if it is an input event rather than a
    /// direct editor operation.
    pub fn to_editor_event(&self) -> Option<EditorEvent> {
        let event: EditorEvent = match self {
            SessionEvent::PointerDown { x, y, button } => PointerEvent::Down {
                position: Point::new(*x, *y),
                button: *button,
            }
            .into(),
            SessionEvent::PointerMove { x, y } => PointerEvent::Move {
                position: Point::new(*x, *y),
            }
            .into(),
            SessionEvent::PointerUp { x, y, button } => PointerEvent::Up {
                position: Point::new(*x, *y),
                button: *button,
            }
            .into(),
            SessionEvent::ContainerResized { width, height } => {
                EditorEvent::ContainerResized(Size::new(*width, *height))
            }
            SessionEvent::ImageLoaded { width, height } => {
                EditorEvent::ImageLoaded(Size::new(*width, *height))
            }
            SessionEvent::ContainerMoved { x, y } => {
                EditorEvent::ContainerMoved(Point::new(*x, *y))
            }
            SessionEvent::Zoom { scale, x, y } => EditorEvent::Zoom {
                scale: *scale,
                center: Point::new(*x, *y),
            },
            SessionEvent::Pan { dx, dy } => EditorEvent::Pan(Vec2::new(*dx, *dy)),
            SessionEvent::DoubleClick { x, y } => {
                EditorEvent::DoubleClick(Point::new(*x, *y))
            }
            SessionEvent::Key { key, modifiers } => {
                KeyEvent::with_modifiers(key.clone(), *modifiers).into()
            }
            SessionEvent::SetTool { .. }
            | SessionEvent::SetName { .. }
            | SessionEvent::SetDescription { .. }
            | SessionEvent::Duplicate
            | SessionEvent::Delete => return None,
        };
        Some(event)
    }

    /// Apply the event to an editor.
    pub fn apply(&self, editor: &mut Editor) {
        if let Some(event) = self.to_editor_event() {
            editor.handle_event(event);
            return;
        }
        let selected = editor.selected();
        match (self, selected) {
            (SessionEvent::SetTool { tool }, _) => editor.set_tool(*tool),
            (SessionEvent::SetName { name }, Some(id)) => {
                editor.set_name(id, name.clone());
            }
            (SessionEvent::SetDescription { description }, Some(id)) => {
                editor.set_description(id, description.clone());
            }
            (SessionEvent::Duplicate, Some(id)) => {
                editor.duplicate(id);
            }
            (SessionEvent::Delete, Some(id)) => {
                editor.delete(id);
            }
            (event, None) => log::debug!("Ignoring {event:?} without a selection"),
            _ => {}
        }
    }
}

impl Session {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Session(format!("Failed to parse session: {e}")))
    }

    /// Load a session file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let session = Self::from_json(&json)?;
        log::info!(
            "Loaded session from {} ({} annotations, {} events)",
            path.display(),
            session.annotations.len(),
            session.events.len()
        );
        Ok(session)
    }
}

/// What the host reports after a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutput {
    pub rectangles: Vec<Rectangle>,
    pub selected: Option<RectangleId>,
    pub tool: ToolKind,
    pub dirty: bool,
    pub effective_scale: Option<ScaleFactors>,
}

impl ReplayOutput {
    pub fn from_editor(editor: &Editor) -> Self {
        Self {
            rectangles: editor.rectangles().to_vec(),
            selected: editor.selected(),
            tool: editor.tool(),
            dirty: editor.is_dirty(),
            effective_scale: editor.effective_scale(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Replay a session through a fresh editor.
pub fn replay(session: &Session, config: EditorConfig) -> ReplayOutput {
    let mut editor = Editor::new(config);
    if let Some(origin) = session.container_origin {
        editor.handle_event(EditorEvent::ContainerMoved(origin));
    }
    if let Some(size) = session.container {
        editor.handle_event(EditorEvent::ContainerResized(size));
    }
    if let Some(size) = session.image {
        editor.handle_event(EditorEvent::ImageLoaded(size));
    }
    editor.load_annotations(session.annotations.clone());

    for event in &session.events {
        event.apply(&mut editor);
    }
    log::debug!("Replayed {} events", session.events.len());
    ReplayOutput::from_editor(&editor)
}
