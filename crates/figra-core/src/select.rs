//! Frame and element selection over a design-document tree.
//!
//! Both passes walk the tree in pre-order with an explicit stack, so tree
//! depth is bounded by heap memory rather than the call stack. A node that is
//! rejected (blank name, missing id, filtered out) is never a barrier: its
//! children are still visited.

use crate::model::{DocumentNode, SelectedEntry};
use crate::naming::{NameRegistry, sanitize};
use crate::policy::{ElementPolicy, FramePolicy};

/// Pre-order, depth-first iterator over a forest of nodes.
struct PreOrder<'a> {
    stack: Vec<&'a DocumentNode>,
}

impl<'a> PreOrder<'a> {
    fn new(roots: &'a [DocumentNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a DocumentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Trimmed label and its lowercase match key, or `None` if the node cannot be
/// selected at all.
fn candidate_name(node: &DocumentNode) -> Option<(&str, String)> {
    let raw = node.name.trim();
    if raw.is_empty() {
        return None;
    }
    if node.id.is_empty() {
        tracing::debug!(name = raw, "skipping node without id");
        return None;
    }
    Some((raw, raw.to_lowercase()))
}

/// Select the most prominent frames of a document.
///
/// Every `FRAME` node anywhere under `root` (including nested frames) is a
/// candidate. Survivors of `policy` are named against one registry for the
/// whole call, ranked by area (descending, stable on document order) and cut
/// to `policy.limit`.
#[must_use]
pub fn select_frames(root: &DocumentNode, policy: &FramePolicy) -> Vec<SelectedEntry> {
    if policy.limit == 0 {
        return Vec::new();
    }

    let mut names = NameRegistry::new();
    let mut ranked: Vec<(SelectedEntry, f64)> = Vec::new();

    for node in PreOrder::new(std::slice::from_ref(root)) {
        if !node.kind.is_frame() {
            continue;
        }
        let Some((raw, lower)) = candidate_name(node) else {
            continue;
        };
        if !policy.accepts(&lower) {
            tracing::trace!(id = %node.id, name = raw, "frame filtered out");
            continue;
        }

        let entry = SelectedEntry {
            safe_name: names.register(&sanitize(&lower)),
            node_id: node.id.clone(),
            raw_name: raw.to_string(),
        };
        ranked.push((entry, node.area()));
    }

    let candidates = ranked.len();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(policy.limit);
    tracing::debug!(candidates, selected = ranked.len(), "frame pass complete");

    ranked.into_iter().map(|(entry, _)| entry).collect()
}

/// Select the interior elements of one frame, in document order.
///
/// The walk starts at the frame's children; the frame itself is never an
/// element. Any node type qualifies. Names are unique within this call only.
#[must_use]
pub fn select_elements(frame: &DocumentNode, policy: &ElementPolicy) -> Vec<SelectedEntry> {
    let mut names = NameRegistry::new();
    let mut elements = Vec::new();

    for node in PreOrder::new(&frame.children) {
        let Some((raw, lower)) = candidate_name(node) else {
            continue;
        };
        if !policy.accepts(&lower) {
            continue;
        }
        elements.push(SelectedEntry {
            safe_name: names.register(&sanitize(&lower)),
            node_id: node.id.clone(),
            raw_name: raw.to_string(),
        });
    }

    tracing::debug!(frame = %frame.id, selected = elements.len(), "element pass complete");
    elements
}
