//! # figra-core
//!
//! Core types and selection logic for figra.
//!
//! This crate provides the synchronous, I/O-free part of the tool:
//! - The design-document tree model deserialized from Figma JSON
//! - Name sanitization and per-pass collision handling
//! - The frame selector (area-ranked, limited) and the element selector
//!   (document order)
//! - Selection policies built from lowercase filter lists
//! - Cross-cutting error types
//!
//! Fetching trees and rendering images belongs to `figra-figma`; publishing
//! test cases belongs to `figra-jira` and the CLI sinks.

pub mod errors;
pub mod model;
pub mod naming;
pub mod policy;
pub mod select;

pub use errors::CoreError;
pub use model::{BoundingBox, DocumentNode, NodeKind, SelectedEntry, decode_json};
pub use naming::{NameRegistry, sanitize};
pub use policy::{ElementPolicy, FramePolicy};
pub use select::{select_elements, select_frames};
