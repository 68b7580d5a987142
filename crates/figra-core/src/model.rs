//! Design-document tree model.
//!
//! The shapes mirror the Figma REST node JSON (`type`, `id`, `name`,
//! `absoluteBoundingBox`, `children`). Every field is optional on the wire;
//! missing values fall back to defaults so that a single malformed node never
//! fails the decode of a whole file.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Decode JSON of any nesting depth.
///
/// The serde_json recursion limit is off and `serde_stacker` grows the stack
/// as nesting deepens.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] for malformed JSON, wrong
/// field types or trailing characters.
pub fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Structural kind of a node, as far as selection cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// `FRAME`: a candidate screen.
    Frame,
    /// `DOCUMENT` or `CANVAS`: the file root and its pages.
    Container,
    /// Any other node type. Walked through like a container.
    Other(String),
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl NodeKind {
    /// Whether the frame selector treats this node as a candidate.
    #[must_use]
    pub const fn is_frame(&self) -> bool {
        matches!(self, Self::Frame)
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FRAME" => Self::Frame,
            "DOCUMENT" | "CANVAS" => Self::Container,
            _ => Self::Other(value),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Frame => "FRAME".to_string(),
            NodeKind::Container => "CANVAS".to_string(),
            NodeKind::Other(raw) => raw,
        }
    }
}

/// Absolute bounding box of a node. Any coordinate may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl BoundingBox {
    /// `width * height`, or 0 when either side is missing.
    #[must_use]
    pub fn area(&self) -> f64 {
        match (self.width, self.height) {
            (Some(width), Some(height)) => width * height,
            _ => 0.0,
        }
    }
}

/// One node of a design-document tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentNode {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "absoluteBoundingBox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a childless node without a bounding box.
    pub fn new(kind: NodeKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            bounding_box: None,
            children: Vec::new(),
        }
    }

    /// Shorthand for a `FRAME` node.
    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Frame, id, name)
    }

    /// Shorthand for a `CANVAS` (page) node.
    pub fn page(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Container, id, name)
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox {
            x: Some(0.0),
            y: Some(0.0),
            width: Some(width),
            height: Some(height),
        });
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Area used for ranking frames. Missing and zero-sized boxes both give 0.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.bounding_box.as_ref().map_or(0.0, BoundingBox::area)
    }

    /// Decode a node (and its subtree) from Figma JSON, at any depth.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTree`] if the payload is not a JSON object
    /// with the expected field types.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(decode_json(json)?)
    }
}

// Unlinks descendants onto a heap stack so dropping never recurses.
impl Drop for DocumentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A node picked by one of the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedEntry {
    /// Sanitized, pass-unique token usable as a file name.
    pub safe_name: String,
    /// Opaque node id used for rendering and links.
    pub node_id: String,
    /// Trimmed original label, for human-facing text.
    pub raw_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "id": "0:0",
        "name": "Document",
        "type": "DOCUMENT",
        "children": [
            {
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [
                    {
                        "id": "1:2",
                        "name": "Screen: Login",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": 0, "y": 0, "width": 375, "height": 812 },
                        "children": [
                            { "id": "1:3", "name": "Title", "type": "TEXT" }
                        ]
                    },
                    { "id": "1:4", "name": "Loose", "type": "GROUP", "absoluteBoundingBox": { "x": 1, "y": 2 } }
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_figma_node_json() {
        let root = DocumentNode::from_json(FIXTURE).unwrap();
        assert_eq!(root.kind, NodeKind::Container);
        let page = &root.children[0];
        let frame = &page.children[0];
        assert_eq!(frame.kind, NodeKind::Frame);
        assert_eq!(frame.name, "Screen: Login");
        assert!((frame.area() - 375.0 * 812.0).abs() < f64::EPSILON);
        assert_eq!(frame.children[0].kind, NodeKind::Other("TEXT".into()));
    }

    #[test]
    fn incomplete_box_has_zero_area() {
        let root = DocumentNode::from_json(FIXTURE).unwrap();
        let group = &root.children[0].children[1];
        assert!(group.bounding_box.is_some());
        assert!(group.area().abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let node = DocumentNode::from_json(r#"{"children": [{}]}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Other(String::new()));
        assert!(node.id.is_empty());
        assert!(node.name.is_empty());
        assert!(node.bounding_box.is_none());
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = DocumentNode::from_json(r#""just a string""#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTree(_)));
    }

    fn nested_groups(depth: usize) -> String {
        let mut json = String::from(r#"{"id": "f", "name": "Screen Deep", "type": "FRAME"}"#);
        for i in 0..depth {
            json = format!(
                r#"{{"id": "g{i}", "name": "", "type": "GROUP", "children": [{json}]}}"#
            );
        }
        json
    }

    #[test]
    fn decodes_trees_deeper_than_serde_default_limit() {
        let mut node = DocumentNode::from_json(&nested_groups(300)).unwrap();
        let mut depth = 0;
        while let Some(child) = node.children.pop() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 300);
        assert_eq!(node.id, "f");
    }

    #[test]
    fn very_deep_trees_decode_and_drop() {
        let root = DocumentNode::from_json(&nested_groups(20_000)).unwrap();
        assert_eq!(root.id, "g19999");
        drop(root);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(DocumentNode::from_json(r#"{"id": "1"} x"#).is_err());
    }

    #[test]
    fn only_frames_are_frame_like() {
        assert!(NodeKind::from("FRAME".to_string()).is_frame());
        assert!(!NodeKind::from("CANVAS".to_string()).is_frame());
        assert!(!NodeKind::from("COMPONENT".to_string()).is_frame());
    }
}
