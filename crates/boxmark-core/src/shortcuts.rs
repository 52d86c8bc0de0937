//! Keyboard shortcut registry and documentation.

use crate::input::KeyEvent;
use crate::tools::ToolKind;

/// Editor action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Drop the draft and the selection.
    Cancel,
    DeleteSelected,
    /// Switch tool and deselect.
    SelectTool(ToolKind),
    ToggleZoomControls,
    /// Replace the collection with the baseline.
    Restore,
    ClearAll,
    Deselect,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: EditorCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: EditorCommand, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts. None of them take modifiers.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Escape", EditorCommand::Cancel, "Cancel drawing and deselect"),
            Shortcut::new("Delete", EditorCommand::DeleteSelected, "Delete selected rectangle"),
            Shortcut::new("Backspace", EditorCommand::DeleteSelected, "Delete selected rectangle"),
            Shortcut::new("1", EditorCommand::SelectTool(ToolKind::Move), "Move tool"),
            Shortcut::new("2", EditorCommand::SelectTool(ToolKind::Create), "Create tool"),
            Shortcut::new("3", EditorCommand::ToggleZoomControls, "Show or hide zoom controls"),
            Shortcut::new("4", EditorCommand::Restore, "Restore original annotations"),
            Shortcut::new("5", EditorCommand::ClearAll, "Remove all rectangles"),
            Shortcut::new("6", EditorCommand::Deselect, "Deselect"),
        ]
    }

    /// Find the command bound to a key press. Keys with modifiers held are ignored.
    pub fn lookup(event: &KeyEvent) -> Option<EditorCommand> {
        if event.modifiers.any() {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.key == event.key)
            .map(|shortcut| shortcut.command)
    }

    /// Human-readable listing, one shortcut per line.
    pub fn describe() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("  {:12} {}", shortcut.key, shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
