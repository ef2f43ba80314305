//! Stage node store: the interaction core's view of the render surface.
//!
//! The real rendering engine owns drawing; this store tracks the nodes it
//! renders (identity, kind, bounding rect, z-order) and collects explicit
//! redraw requests. Redraws are requested, never implied by mutation, so
//! batching stays the caller's responsibility.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Stable identity of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh node id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind tag on a rendered node, mirroring the engine's name tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Shape,
    Text,
}

/// A rendered, selectable node on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Axis-aligned bounding rect in canvas coordinates.
    pub bounds: Rect,
}

/// Node store for one render layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stage {
    /// All nodes, keyed by ID.
    nodes: HashMap<NodeId, Node>,
    /// Z-order of nodes (back to front).
    z_order: Vec<NodeId>,
    /// Count of redraw requests issued so far.
    #[serde(skip)]
    redraw_requests: u64,
}

impl Stage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node on top of the z-order and return its id.
    pub fn add_node(&mut self, kind: NodeKind, bounds: Rect) -> NodeId {
        let id = NodeId::new();
        self.z_order.push(id);
        self.nodes.insert(id, Node { id, kind, bounds });
        id
    }

    /// Remove a node. Returns `None` (a no-op) for unknown ids.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.z_order.retain(|&node_id| node_id != id);
        self.nodes.remove(&id)
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Bounding rect of a node, if it exists.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.bounds)
    }

    /// Overwrite a node's bounding rect. Unknown ids are a no-op.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounds = bounds;
        }
    }

    /// Iterate nodes back to front.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Iterate nodes of one kind, back to front.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |node| node.kind == kind)
    }

    /// Number of nodes on the stage.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    /// True if the stage holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Ask the rendering engine for a redraw of this layer.
    pub fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    /// Total redraw requests issued so far.
    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }
}
