//! Input events consumed by the editor.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: PointerButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => *position,
        }
    }
}

/// Key-down event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the host (`"Escape"`, `"Delete"`, `"1"`).
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Everything the host can tell the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    Pointer(PointerEvent),
    /// The container's rendered size changed.
    ContainerResized(Size),
    /// The image finished loading; carries its natural size.
    ImageLoaded(Size),
    /// The container's unzoomed top-left corner moved in client space.
    ContainerMoved(Point),
    /// Pinch, wheel or slider zoom to an absolute scale around a client point.
    Zoom { scale: f64, center: Point },
    /// Pan by a client delta.
    Pan(Vec2),
    /// Double-click zoom toggle around a client point.
    DoubleClick(Point),
    Key(KeyEvent),
}

impl From<PointerEvent> for EditorEvent {
    fn from(event: PointerEvent) -> Self {
        EditorEvent::Pointer(event)
    }
}

impl From<KeyEvent> for EditorEvent {
    fn from(event: KeyEvent) -> Self {
        EditorEvent::Key(event)
    }
}
