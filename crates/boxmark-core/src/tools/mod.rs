//! Tool system: the creation, move and resize engines.

mod create;
mod resize;
mod translate;

pub use create::Draft;
pub use resize::apply_resize;
pub use translate::apply_move;

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Select, drag and resize existing rectangles.
    Move,
    /// Draw new rectangles.
    #[default]
    Create,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_create() {
        assert_eq!(ToolKind::default(), ToolKind::Create);
    }

    #[test]
    fn test_tool_serde_names() {
        assert_eq!(serde_json::to_string(&ToolKind::Move).unwrap(), "\"move\"");
        let tool: ToolKind = serde_json::from_str("\"create\"").unwrap();
        assert_eq!(tool, ToolKind::Create);
    }
}
