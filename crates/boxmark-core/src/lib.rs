//! Boxmark Core Library
//!
//! Platform-agnostic state and geometry for the Boxmark region-of-interest
//! editor: rectangles over an image, edited under pan and zoom.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod rectangle;
pub mod selection;
pub mod shortcuts;
pub mod tools;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorMode};
pub use geometry::{Bounds, LayoutMetrics, ScaleFactors, clamp_between, normalize};
pub use input::{EditorEvent, KeyEvent, Modifiers, PointerButton, PointerEvent};
pub use rectangle::{Annotation, Rectangle, RectangleId, ScoreBand};
pub use selection::{Corner, DragSession, Edge, Handle, HandleKind};
pub use shortcuts::{EditorCommand, Shortcut, ShortcutRegistry};
pub use tools::{Draft, ToolKind};
pub use viewport::Viewport;
