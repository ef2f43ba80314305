//! Slate Core Library
//!
//! Platform-agnostic interaction logic for the Slate canvas editor:
//! rubber-band selection, the shared transform widget, and the editable
//! text authoring flow. Rendering and windowing live outside this crate;
//! they talk to this core through the [`stage`] node store and the
//! [`input`] event vocabulary.

pub mod editor;
pub mod geometry;
pub mod input;
pub mod selection;
pub mod stage;
pub mod text_tool;
pub mod transformer;

pub use editor::{Editor, ToolKind};
pub use input::{HitTarget, MouseButton, PointerEvent};
pub use selection::SelectionEngine;
pub use stage::{Node, NodeId, NodeKind, Stage};
pub use text_tool::{TextNode, TextRegion, TextTool};
pub use transformer::{HandleRegion, Transformer};
