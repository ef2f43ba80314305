//! Shared resize/rotate transform widget controller.
//!
//! One transformer exists per editor, created once at initialization and
//! re-targeted as the selection changes. Its visual configuration is fixed
//! at construction; only the bound target list and visibility vary.

use crate::stage::{NodeId, Stage};
use kurbo::{Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Anchor handle size in pixels.
pub const ANCHOR_SIZE: f64 = 8.0;
/// Anchor corner radius in pixels.
pub const ANCHOR_CORNER_RADIUS: f64 = 4.0;
/// Anchor and border stroke width in pixels.
pub const STROKE_WIDTH: f64 = 1.0;
/// Minimum width a resize may produce; narrower boxes are clamped.
pub const MIN_WIDTH: f64 = 30.0;
/// Width and height resize independently; no aspect lock.
pub const KEEP_RATIO: bool = false;

/// Anchor fill color (white).
pub fn anchor_fill() -> Color {
    Color::from_rgba8(0xff, 0xff, 0xff, 0xff)
}

/// Anchor and border stroke color (#333333).
pub fn stroke_color() -> Color {
    Color::from_rgba8(0x33, 0x33, 0x33, 0xff)
}

/// The nine named hit regions of the transform widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleRegion {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Rotation handle, positioned outside the box.
    Rotater,
}

impl HandleRegion {
    /// All nine regions.
    pub const ALL: [HandleRegion; 9] = [
        HandleRegion::TopLeft,
        HandleRegion::TopCenter,
        HandleRegion::TopRight,
        HandleRegion::MiddleLeft,
        HandleRegion::MiddleRight,
        HandleRegion::BottomLeft,
        HandleRegion::BottomCenter,
        HandleRegion::BottomRight,
        HandleRegion::Rotater,
    ];

    /// The eight resize anchors enabled on the widget (everything but the
    /// rotation handle).
    pub fn enabled_anchors() -> impl Iterator<Item = HandleRegion> {
        Self::ALL.into_iter().filter(|region| region.is_anchor())
    }

    /// Region name as tagged on the widget's hit areas.
    pub fn name(&self) -> &'static str {
        match self {
            HandleRegion::TopLeft => "top-left",
            HandleRegion::TopCenter => "top-center",
            HandleRegion::TopRight => "top-right",
            HandleRegion::MiddleLeft => "middle-left",
            HandleRegion::MiddleRight => "middle-right",
            HandleRegion::BottomLeft => "bottom-left",
            HandleRegion::BottomCenter => "bottom-center",
            HandleRegion::BottomRight => "bottom-right",
            HandleRegion::Rotater => "rotater",
        }
    }

    /// True for the eight resize anchors, false for the rotation handle.
    pub fn is_anchor(&self) -> bool {
        !matches!(self, HandleRegion::Rotater)
    }
}

/// Clamp a proposed resize box to the minimum width.
///
/// The clamp widens the box in place (keeping its origin); it never
/// rejects the resize. Height is unconstrained.
pub fn clamp_bound_box(proposed: Rect) -> Rect {
    let width = (proposed.x1 - proposed.x0).max(MIN_WIDTH);
    Rect::new(proposed.x0, proposed.y0, proposed.x0 + width, proposed.y1)
}

/// Apply an anchor drag to a bounding box.
///
/// Corner anchors move two edges, edge-midpoint anchors move one. The
/// result is normalized (a drag past the opposite edge flips the box
/// rather than inverting it) and clamped to [`MIN_WIDTH`]. The rotation
/// handle does not resize and returns the box unchanged.
pub fn apply_anchor_resize(bounds: Rect, anchor: HandleRegion, delta: Vec2) -> Rect {
    let (x0, y0, x1, y1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let (new_x0, new_y0, new_x1, new_y1) = match anchor {
        HandleRegion::TopLeft => (x0 + delta.x, y0 + delta.y, x1, y1),
        HandleRegion::TopCenter => (x0, y0 + delta.y, x1, y1),
        HandleRegion::TopRight => (x0, y0 + delta.y, x1 + delta.x, y1),
        HandleRegion::MiddleLeft => (x0 + delta.x, y0, x1, y1),
        HandleRegion::MiddleRight => (x0, y0, x1 + delta.x, y1),
        HandleRegion::BottomLeft => (x0 + delta.x, y0, x1, y1 + delta.y),
        HandleRegion::BottomCenter => (x0, y0, x1, y1 + delta.y),
        HandleRegion::BottomRight => (x0, y0, x1 + delta.x, y1 + delta.y),
        HandleRegion::Rotater => return bounds,
    };

    let (x0, x1) = if new_x0 < new_x1 { (new_x0, new_x1) } else { (new_x1, new_x0) };
    let (y0, y1) = if new_y0 < new_y1 { (new_y0, new_y1) } else { (new_y1, new_y0) };

    clamp_bound_box(Rect::new(x0, y0, x1, y1))
}

/// The shared transform widget: a target binding plus a visibility flag.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    /// Nodes the widget's handles currently operate on.
    targets: Vec<NodeId>,
    /// Whether the widget is drawn.
    visible: bool,
}

impl Transformer {
    /// Create the widget, detached and hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes currently bound to the widget.
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Whether the widget is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Bind the widget to exactly the given nodes and show it.
    pub fn attach(&mut self, selection: &[NodeId], stage: &mut Stage) {
        self.targets.clear();
        self.targets.extend_from_slice(selection);
        self.visible = true;
        stage.request_redraw();
    }

    /// Bind the widget to nothing and hide it. Detaching an already
    /// detached widget is harmless.
    pub fn detach(&mut self, stage: &mut Stage) {
        self.targets.clear();
        self.visible = false;
        stage.request_redraw();
    }

    /// Resize every bound target's box via one anchor. Targets that have
    /// left the stage are skipped.
    pub fn resize_targets(&self, anchor: HandleRegion, delta: Vec2, stage: &mut Stage) {
        for &id in &self.targets {
            if let Some(bounds) = stage.bounds(id) {
                stage.set_bounds(id, apply_anchor_resize(bounds, anchor, delta));
            }
        }
        stage.request_redraw();
    }
}
