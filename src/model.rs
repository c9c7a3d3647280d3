use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TypeBlockError};

// ────────────────────────────────────────────────────────────────────────────
// Workspace – the set of blocks currently placed in the editor
// ────────────────────────────────────────────────────────────────────────────

/// Snapshot of the blocks present in a host editor workspace.
///
/// The host owns the real blocks; this is the read-only view the matching
/// code works on. It can be loaded from JSON, which is what the CLI does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<BlockDescriptor>,
}

impl Workspace {
    pub fn new(blocks: Vec<BlockDescriptor>) -> Self {
        Self { blocks }
    }

    /// Parse a workspace from a JSON document of the form `{"blocks": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a workspace JSON file from disk.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TypeBlockError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Look up a block by its id.
    pub fn find(&self, id: &str) -> Option<&BlockDescriptor> {
        self.blocks.iter().find(|b| b.id == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block descriptor
// ────────────────────────────────────────────────────────────────────────────

/// A position on the workspace surface (workspace coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Whether a component property block reads or writes the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Set,
    Get,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Set => f.write_str("set"),
            Accessor::Get => f.write_str("get"),
        }
    }
}

/// Palette category of a literal block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralCategory {
    Text,
    Variables,
}

/// The kind of a block together with exactly the fields its label is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// `set Button1.Text` / `get Button1.Text`
    PropertyAccessor {
        accessor: Accessor,
        instance_name: String,
        property_name: String,
    },
    /// `when Button1.Click`
    EventHandler {
        instance_name: String,
        event_name: String,
    },
    /// `call Player1.Start`
    MethodCall {
        instance_name: String,
        method_name: String,
    },
    /// A text or variable block whose first field carries the display text.
    Literal {
        category: LiteralCategory,
        #[serde(default)]
        text: String,
    },
    /// Anything else; labelled by its last field.
    Generic,
}

/// A block instance as seen by the type-blocking panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Host-assigned block id.
    pub id: String,
    /// Canonical block type used to instantiate a block of this kind
    /// (e.g. `"component_event"`, `"math_number"`).
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(flatten)]
    pub kind: BlockKind,
    /// Display text of the first field of each input row, in row order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Top-left corner of the block on the workspace surface.
    #[serde(default)]
    pub position: Point,
    #[serde(default = "default_deletable")]
    pub deletable: bool,
}

fn default_deletable() -> bool {
    true
}

impl BlockDescriptor {
    /// Create a descriptor with no fields at the origin.
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            kind,
            fields: Vec::new(),
            position: Point::default(),
            deletable: true,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn undeletable(mut self) -> Self {
        self.deletable = false;
        self
    }

    /// Display text of the last input row, if any.
    pub fn last_field(&self) -> Option<&str> {
        self.fields.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_json_flattened_kind() {
        let json = r#"{
            "blocks": [
                {"id": "1", "type": "component_event", "kind": "event_handler",
                 "instance_name": "Button1", "event_name": "Click",
                 "position": {"x": 10, "y": 20}},
                {"id": "2", "type": "math_number", "kind": "generic", "fields": ["42"]},
                {"id": "3", "type": "text", "kind": "literal", "category": "text",
                 "text": "Hello", "deletable": false}
            ]
        }"#;
        let ws = Workspace::from_json_str(json).unwrap();
        assert_eq!(ws.blocks.len(), 3);
        assert_eq!(ws.blocks[0].position, Point::new(10, 20));
        assert!(matches!(ws.blocks[0].kind, BlockKind::EventHandler { .. }));
        assert_eq!(ws.blocks[1].last_field(), Some("42"));
        assert!(ws.blocks[1].deletable);
        assert!(!ws.blocks[2].deletable);
        assert_eq!(ws.find("3").map(|b| b.block_type.as_str()), Some("text"));
    }

    #[test]
    fn test_accessor_display() {
        assert_eq!(Accessor::Set.to_string(), "set");
        assert_eq!(Accessor::Get.to_string(), "get");
    }
}
