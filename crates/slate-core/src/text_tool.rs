//! Dual-representation text authoring.
//!
//! A logical piece of text is either *in edit* (a [`TextRegion`] backed by
//! an editable overlay widget) or *committed* (a rendered text node on the
//! stage), never both. The two whole-collection conversions below move
//! items between the representations; there is no per-item commit.

use crate::input::HitTarget;
use crate::stage::{NodeId, NodeKind, Stage};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default font size for committed text, in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
/// Approximate glyph width as a fraction of font size. The renderer
/// refreshes bounds after real layout; this is only the initial estimate.
const CHAR_WIDTH_FACTOR: f64 = 0.55;
/// Line height as a multiple of font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A pending text entry: anchor position plus live string content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Anchor position (top-left) in canvas coordinates.
    pub position: Point,
    /// Live content, mutated while editing.
    pub content: String,
}

/// A committed, rendered, selectable piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    /// Anchor position (top-left) in canvas coordinates.
    pub position: Point,
    /// Final text at commit time.
    pub text: String,
}

/// Estimate the bounding rect of rendered text from its character count.
fn approximate_bounds(position: Point, text: &str) -> Rect {
    let max_line_len = text
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count().max(1);
    let width = max_line_len as f64 * CHAR_WIDTH_FACTOR * DEFAULT_FONT_SIZE;
    let height = line_count as f64 * LINE_HEIGHT_FACTOR * DEFAULT_FONT_SIZE;
    Rect::from_origin_size(position, (width, height))
}

/// Coordinator for the in-edit regions and the committed text nodes.
#[derive(Debug, Clone, Default)]
pub struct TextTool {
    /// Everything currently being authored, in creation order.
    regions: Vec<TextRegion>,
    /// Committed text keyed by the stage node carrying it.
    committed: Vec<(NodeId, TextNode)>,
}

impl TextTool {
    /// Create a coordinator with nothing in edit and nothing committed.
    pub fn new() -> Self {
        Self::default()
    }

    /// In-edit regions, in creation order.
    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    /// Committed text nodes, in commit order.
    pub fn committed(&self) -> impl Iterator<Item = &TextNode> {
        self.committed.iter().map(|(_, node)| node)
    }

    /// Stage ids of the committed text nodes.
    pub fn committed_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.committed.iter().map(|(id, _)| *id)
    }

    /// Number of committed text nodes.
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }

    /// A click on the bare background opens a new empty region at the
    /// click position. Clicks on nodes, or with no reported position,
    /// are no-ops.
    pub fn on_stage_click(&mut self, position: Option<Point>, target: HitTarget) {
        if !target.is_background() {
            return;
        }
        let Some(position) = position else {
            return;
        };

        self.regions.push(TextRegion {
            position,
            content: String::new(),
        });
    }

    /// Replace the content of the region at `index`. Out-of-range
    /// indices degrade to a no-op.
    pub fn edit(&mut self, index: usize, content: impl Into<String>) {
        match self.regions.get_mut(index) {
            Some(region) => region.content = content.into(),
            None => log::warn!("edit on nonexistent text region {index}"),
        }
    }

    /// Commit every in-edit region to a rendered text node.
    ///
    /// Each region becomes a stage node at its last-known position
    /// carrying its content; the region list drains completely. One
    /// redraw is requested for the whole transition.
    pub fn commit_all(&mut self, stage: &mut Stage) {
        for region in self.regions.drain(..) {
            let bounds = approximate_bounds(region.position, &region.content);
            let id = stage.add_node(NodeKind::Text, bounds);
            self.committed.push((
                id,
                TextNode {
                    position: region.position,
                    text: region.content,
                },
            ));
        }
        log::debug!("committed text regions, {} node(s) rendered", self.committed.len());
        stage.request_redraw();
    }

    /// Reopen every committed text node for editing.
    ///
    /// The inverse of [`commit_all`](Self::commit_all): each node leaves
    /// the stage and becomes a region again, position and text carried
    /// over. Returns the ids removed from the stage so the caller can
    /// drop them from any selection.
    pub fn reopen_all(&mut self, stage: &mut Stage) -> Vec<NodeId> {
        let mut removed = Vec::with_capacity(self.committed.len());
        for (id, node) in self.committed.drain(..) {
            stage.remove_node(id);
            removed.push(id);
            self.regions.push(TextRegion {
                position: node.position,
                content: node.text,
            });
        }
        log::debug!("reopened {} text node(s) for editing", removed.len());
        stage.request_redraw();
        removed
    }
}
