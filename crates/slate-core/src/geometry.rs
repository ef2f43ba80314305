//! Axis-aligned rectangle helpers for drag gestures and sweep hit testing.

use kurbo::{Point, Rect};

/// Normalized rectangle spanning two drag points.
///
/// The result has its origin at the component-wise minimum of the two
/// points, so a drag in any direction yields non-negative extents.
pub fn span_rect(a: Point, b: Point) -> Rect {
    Rect::new(
        a.x.min(b.x),
        a.y.min(b.y),
        a.x.max(b.x),
        a.y.max(b.y),
    )
}

/// Whether two axis-aligned rectangles overlap.
///
/// Edge-touching rectangles count as overlapping; containment is not
/// required. Both inputs are assumed normalized (`x0 <= x1`, `y0 <= y1`).
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
