//! Rubber-band selection engine.
//!
//! Owns the press-move-release sweep gesture and the ordered set of
//! selected nodes. Membership in the set is the single source of truth
//! for "is this node selected"; nodes carry no selection flag of their
//! own.

use crate::geometry::{rects_intersect, span_rect};
use crate::input::{HitTarget, MouseButton};
use crate::stage::{NodeId, NodeKind, Stage};
use crate::transformer::Transformer;
use kurbo::{Point, Rect};
use peniko::Color;

/// Fill of the in-progress selection rectangle (translucent blue).
pub fn selection_fill() -> Color {
    Color::from_rgba8(0, 0, 255, 77)
}

/// Sweep gesture state.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Dragging {
        /// Pointer position at press.
        start: Point,
        /// Live rubber-band rectangle, recomputed on every move.
        rect: Rect,
        /// Hidden until the first move; a click without movement never
        /// shows a rectangle and never selects.
        visible: bool,
    },
}

/// The selection engine: sweep gesture plus selection set.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    /// Selected nodes in discovery order. Duplicate-free.
    selected: Vec<NodeId>,
    gesture: Gesture,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionEngine {
    /// Create an engine with nothing selected and no sweep active.
    pub fn new() -> Self {
        Self {
            selected: Vec::new(),
            gesture: Gesture::Idle,
        }
    }

    /// Selected node ids, in discovery order.
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// Membership query; the only definition of "selected".
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Append a node to the selection. Already-selected nodes stay where
    /// they are.
    pub fn select_node(&mut self, id: NodeId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Remove a node from the selection. Unknown ids are a no-op.
    pub fn deselect_node(&mut self, id: NodeId) {
        self.selected.retain(|&node_id| node_id != id);
    }

    /// Empty the selection, hide the transformer, request a redraw.
    pub fn clear_selection(&mut self, transformer: &mut Transformer, stage: &mut Stage) {
        self.selected.clear();
        transformer.detach(stage);
    }

    /// True while a sweep gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// The rubber-band rectangle to draw, once it has become visible.
    /// Renderers fill it with [`selection_fill`]. `None` while idle or
    /// before the first move of a sweep.
    pub fn sweep_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Dragging { rect, visible: true, .. } => Some(rect),
            _ => None,
        }
    }

    /// Pointer press: maybe start a sweep.
    ///
    /// Secondary buttons never start a sweep. Presses on shapes, text
    /// nodes, or transformer handles pass through to those targets' own
    /// drag behavior. A press with no reported position is a no-op.
    pub fn on_pointer_down(
        &mut self,
        position: Option<Point>,
        button: MouseButton,
        target: HitTarget,
    ) {
        if button != MouseButton::Left {
            return;
        }
        if target.owns_drag() {
            return;
        }
        let Some(start) = position else {
            return;
        };

        self.gesture = Gesture::Dragging {
            start,
            rect: Rect::from_origin_size(start, (0.0, 0.0)),
            visible: false,
        };
    }

    /// Pointer move: grow the rubber band.
    ///
    /// No-op unless a sweep is active and the primary button is held.
    /// The rectangle becomes the normalized span between the press point
    /// and the current pointer position.
    pub fn on_pointer_move(
        &mut self,
        position: Option<Point>,
        button: MouseButton,
        stage: &mut Stage,
    ) {
        let Gesture::Dragging { start, rect, visible } = &mut self.gesture else {
            return;
        };
        if button != MouseButton::Left {
            return;
        }
        let Some(current) = position else {
            return;
        };

        *rect = span_rect(*start, current);
        *visible = true;
        stage.request_redraw();
    }

    /// Pointer release: finish the sweep.
    ///
    /// Every stage node of kind shape or text whose bounds overlap the
    /// final rectangle joins the selection (any overlap counts, including
    /// edge-touching). The transformer then attaches to the result and
    /// the rubber band is discarded.
    pub fn on_pointer_up(
        &mut self,
        button: MouseButton,
        stage: &mut Stage,
        transformer: &mut Transformer,
    ) {
        if !self.is_dragging() || button != MouseButton::Left {
            return;
        }
        self.complete_sweep(stage, transformer);
    }

    /// Click resolved on the stage: a click on the bare background clears
    /// the selection.
    pub fn on_stage_click(
        &mut self,
        target: HitTarget,
        stage: &mut Stage,
        transformer: &mut Transformer,
    ) {
        if target.is_background() {
            self.clear_selection(transformer, stage);
        }
    }

    /// Finish an in-flight sweep at its last observed rectangle. Used on
    /// mode exit; a no-op when idle.
    pub fn finalize_sweep(&mut self, stage: &mut Stage, transformer: &mut Transformer) {
        if self.is_dragging() {
            self.complete_sweep(stage, transformer);
        }
    }

    fn complete_sweep(&mut self, stage: &mut Stage, transformer: &mut Transformer) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let Gesture::Dragging { rect, visible, .. } = gesture else {
            return;
        };

        // A never-shown rectangle is a click without movement: it
        // intersects nothing and leaves the prior selection unchanged.
        if visible {
            let hits: Vec<NodeId> = stage
                .nodes()
                .filter(|node| matches!(node.kind, NodeKind::Shape | NodeKind::Text))
                .filter(|node| rects_intersect(rect, node.bounds))
                .map(|node| node.id)
                .collect();
            for id in hits {
                self.select_node(id);
            }
            log::debug!(
                "sweep complete: rect {:?}, {} node(s) selected",
                rect,
                self.selected.len()
            );
        }

        transformer.attach(&self.selected, stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(
        engine: &mut SelectionEngine,
        stage: &mut Stage,
        transformer: &mut Transformer,
        from: Point,
        to: Point,
    ) {
        engine.on_pointer_down(Some(from), MouseButton::Left, HitTarget::Background);
        engine.on_pointer_move(Some(to), MouseButton::Left, stage);
        engine.on_pointer_up(MouseButton::Left, stage, transformer);
    }

    #[test]
    fn test_sweep_selects_overlapping_nodes() {
        let mut stage = Stage::new();
        let inside = stage.add_node(NodeKind::Shape, Rect::new(20.0, 20.0, 30.0, 30.0));
        let outside = stage.add_node(NodeKind::Shape, Rect::new(200.0, 200.0, 210.0, 210.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        drag(
            &mut engine,
            &mut stage,
            &mut tr,
            Point::new(10.0, 10.0),
            Point::new(100.0, 100.0),
        );

        assert_eq!(engine.selected(), &[inside]);
        assert!(engine.is_selected(inside));
        assert!(!engine.is_selected(outside));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_sweep_includes_partial_overlap() {
        let mut stage = Stage::new();
        // Straddles the sweep boundary; any overlap counts.
        let partial = stage.add_node(NodeKind::Text, Rect::new(90.0, 90.0, 150.0, 150.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        drag(
            &mut engine,
            &mut stage,
            &mut tr,
            Point::new(10.0, 10.0),
            Point::new(100.0, 100.0),
        );

        assert_eq!(engine.selected(), &[partial]);
    }

    #[test]
    fn test_sweep_attaches_transformer() {
        let mut stage = Stage::new();
        let a = stage.add_node(NodeKind::Shape, Rect::new(0.0, 0.0, 50.0, 50.0));
        let b = stage.add_node(NodeKind::Text, Rect::new(60.0, 60.0, 90.0, 90.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        drag(
            &mut engine,
            &mut stage,
            &mut tr,
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        );

        assert_eq!(tr.targets(), engine.selected());
        assert_eq!(tr.targets(), &[a, b]);
        assert!(tr.is_visible());
    }

    #[test]
    fn test_reverse_direction_drag() {
        let mut stage = Stage::new();
        let node = stage.add_node(NodeKind::Shape, Rect::new(20.0, 20.0, 30.0, 30.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        // Drag from bottom-right to top-left over the same area.
        drag(
            &mut engine,
            &mut stage,
            &mut tr,
            Point::new(100.0, 100.0),
            Point::new(10.0, 10.0),
        );

        assert_eq!(engine.selected(), &[node]);
    }

    #[test]
    fn test_zero_size_drag_selects_nothing() {
        let mut stage = Stage::new();
        let prior = stage.add_node(NodeKind::Shape, Rect::new(20.0, 20.0, 30.0, 30.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();
        engine.select_node(prior);

        // Press and release without movement, at a background point that
        // still falls inside the node's bounding box (possible when the
        // box is larger than the drawn shape). The degenerate rectangle
        // must select nothing.
        engine.on_pointer_down(Some(Point::new(25.0, 25.0)), MouseButton::Left, HitTarget::Background);
        engine.on_pointer_up(MouseButton::Left, &mut stage, &mut tr);

        assert_eq!(engine.selected(), &[prior]);
        assert_eq!(tr.targets(), &[prior]);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_sweep_rect_visibility() {
        let mut stage = Stage::new();
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        assert!(engine.sweep_rect().is_none());

        engine.on_pointer_down(Some(Point::new(10.0, 10.0)), MouseButton::Left, HitTarget::Background);
        // Hidden until the first move.
        assert!(engine.sweep_rect().is_none());

        engine.on_pointer_move(Some(Point::new(40.0, 30.0)), MouseButton::Left, &mut stage);
        let rect = engine.sweep_rect().unwrap();
        assert!((rect.x0 - 10.0).abs() < f64::EPSILON);
        assert!((rect.width() - 30.0).abs() < f64::EPSILON);
        assert!((rect.height() - 20.0).abs() < f64::EPSILON);

        engine.on_pointer_up(MouseButton::Left, &mut stage, &mut tr);
        assert!(engine.sweep_rect().is_none());
    }

    #[test]
    fn test_secondary_buttons_never_sweep() {
        let mut stage = Stage::new();
        stage.add_node(NodeKind::Shape, Rect::new(20.0, 20.0, 30.0, 30.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        engine.on_pointer_down(Some(Point::new(0.0, 0.0)), MouseButton::Right, HitTarget::Background);
        assert!(!engine.is_dragging());

        // A right-button release must not end an active left-button sweep.
        engine.on_pointer_down(Some(Point::new(0.0, 0.0)), MouseButton::Left, HitTarget::Background);
        engine.on_pointer_move(Some(Point::new(50.0, 50.0)), MouseButton::Left, &mut stage);
        engine.on_pointer_up(MouseButton::Right, &mut stage, &mut tr);
        assert!(engine.is_dragging());

        engine.on_pointer_up(MouseButton::Left, &mut stage, &mut tr);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_press_on_node_passes_through() {
        let mut engine = SelectionEngine::new();
        let id = NodeId::new();

        engine.on_pointer_down(Some(Point::new(0.0, 0.0)), MouseButton::Left, HitTarget::Shape(id));
        assert!(!engine.is_dragging());

        engine.on_pointer_down(
            Some(Point::new(0.0, 0.0)),
            MouseButton::Left,
            HitTarget::Handle(crate::transformer::HandleRegion::BottomRight),
        );
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_missing_position_is_noop() {
        let mut stage = Stage::new();
        let mut engine = SelectionEngine::new();

        engine.on_pointer_down(None, MouseButton::Left, HitTarget::Background);
        assert!(!engine.is_dragging());

        engine.on_pointer_down(Some(Point::new(0.0, 0.0)), MouseButton::Left, HitTarget::Background);
        let before = stage.redraw_requests();
        engine.on_pointer_move(None, MouseButton::Left, &mut stage);
        assert_eq!(stage.redraw_requests(), before);
    }

    #[test]
    fn test_select_node_is_duplicate_free() {
        let mut engine = SelectionEngine::new();
        let a = NodeId::new();
        let b = NodeId::new();

        engine.select_node(a);
        engine.select_node(b);
        engine.select_node(a);

        assert_eq!(engine.selected(), &[a, b]);

        engine.deselect_node(a);
        assert_eq!(engine.selected(), &[b]);
        assert!(!engine.is_selected(a));
    }

    #[test]
    fn test_stage_click_on_background_clears() {
        let mut stage = Stage::new();
        let node = stage.add_node(NodeKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        engine.select_node(node);
        tr.attach(engine.selected(), &mut stage);

        engine.on_stage_click(HitTarget::Background, &mut stage, &mut tr);

        assert!(engine.selected().is_empty());
        assert!(tr.targets().is_empty());
        assert!(!tr.is_visible());
    }

    #[test]
    fn test_stage_click_on_node_keeps_selection() {
        let mut stage = Stage::new();
        let node = stage.add_node(NodeKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        engine.select_node(node);
        engine.on_stage_click(HitTarget::Shape(node), &mut stage, &mut tr);

        assert_eq!(engine.selected(), &[node]);
    }

    #[test]
    fn test_finalize_sweep_commits_in_flight_drag() {
        let mut stage = Stage::new();
        let node = stage.add_node(NodeKind::Shape, Rect::new(20.0, 20.0, 30.0, 30.0));
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        engine.on_pointer_down(Some(Point::new(0.0, 0.0)), MouseButton::Left, HitTarget::Background);
        engine.on_pointer_move(Some(Point::new(60.0, 60.0)), MouseButton::Left, &mut stage);

        engine.finalize_sweep(&mut stage, &mut tr);

        assert!(!engine.is_dragging());
        assert_eq!(engine.selected(), &[node]);
        assert_eq!(tr.targets(), &[node]);
    }

    #[test]
    fn test_finalize_sweep_when_idle_is_noop() {
        let mut stage = Stage::new();
        let mut engine = SelectionEngine::new();
        let mut tr = Transformer::new();

        let before = stage.redraw_requests();
        engine.finalize_sweep(&mut stage, &mut tr);
        assert_eq!(stage.redraw_requests(), before);
        assert!(!tr.is_visible());
    }
}
