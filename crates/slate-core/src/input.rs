//! Pointer event vocabulary delivered by the rendering engine.

use crate::stage::NodeId;
use crate::transformer::HandleRegion;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What the rendering engine's hit test reports under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// The empty canvas background (the stage itself).
    Background,
    /// A rendered shape node.
    Shape(NodeId),
    /// A rendered text node.
    Text(NodeId),
    /// One of the transform widget's named hit regions.
    Handle(HandleRegion),
}

impl HitTarget {
    /// True if the target is the bare canvas background.
    pub fn is_background(&self) -> bool {
        matches!(self, Self::Background)
    }

    /// True if the target owns its own drag behavior and a selection
    /// sweep must not start on top of it.
    pub fn owns_drag(&self) -> bool {
        !self.is_background()
    }
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are `Option` because the engine may report no pointer
/// position (pointer outside canvas bounds); such events degrade to
/// no-ops downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Option<Point>,
        button: MouseButton,
        target: HitTarget,
    },
    Move {
        position: Option<Point>,
        button: MouseButton,
    },
    Up {
        button: MouseButton,
    },
    /// A click/tap resolved by the engine (press and release on the
    /// same target).
    Click {
        position: Option<Point>,
        target: HitTarget,
    },
}
