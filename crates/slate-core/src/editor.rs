//! Tool mode switching and pointer event routing.
//!
//! Events reach only the active tool's handlers; switching modes is the
//! register/deregister boundary, so two modes can never react to the same
//! input. The editor also pairs every selection mutation it performs with
//! the matching transformer attach/detach, keeping the widget's targets
//! equal to the selection set at every exit point.

use crate::input::PointerEvent;
use crate::selection::SelectionEngine;
use crate::stage::{NodeId, Stage};
use crate::text_tool::{TextRegion, TextTool};
use crate::transformer::Transformer;
use serde::{Deserialize, Serialize};

/// Available tool modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Text,
}

/// The interaction editor: one stage, one selection engine, one shared
/// transformer, one text coordinator.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    stage: Stage,
    tool: ToolKind,
    selection: SelectionEngine,
    // Created once here, independent of tool mode; never re-created per
    // selection.
    transformer: Transformer,
    text: TextTool,
}

impl Editor {
    /// Create an editor in select mode with an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage this editor drives.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage access, for collaborators that add or move nodes.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The currently active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// The shared transform widget.
    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Switch tool modes, finalizing any in-flight work first: leaving
    /// select completes a mid-drag sweep at its last observed rectangle,
    /// leaving text commits all in-edit regions.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        match self.tool {
            ToolKind::Select => {
                self.selection.finalize_sweep(&mut self.stage, &mut self.transformer);
            }
            ToolKind::Text => {
                self.text.commit_all(&mut self.stage);
            }
        }
        log::debug!("tool change: {:?} -> {:?}", self.tool, tool);
        self.tool = tool;
    }

    /// Route a pointer event to the active tool.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match self.tool {
            ToolKind::Select => match event {
                PointerEvent::Down {
                    position,
                    button,
                    target,
                } => self.selection.on_pointer_down(position, button, target),
                PointerEvent::Move { position, button } => {
                    self.selection.on_pointer_move(position, button, &mut self.stage)
                }
                PointerEvent::Up { button } => {
                    self.selection
                        .on_pointer_up(button, &mut self.stage, &mut self.transformer)
                }
                PointerEvent::Click { target, .. } => {
                    self.selection
                        .on_stage_click(target, &mut self.stage, &mut self.transformer)
                }
            },
            // Text mode listens only for stage clicks.
            ToolKind::Text => {
                if let PointerEvent::Click { position, target } = event {
                    self.text.on_stage_click(position, target);
                }
            }
        }
    }

    // --- selection surface ---

    /// Selected node ids, in discovery order.
    pub fn selected(&self) -> &[NodeId] {
        self.selection.selected()
    }

    /// Whether a node is in the selection set.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.is_selected(id)
    }

    /// Add a node to the selection set.
    pub fn select_node(&mut self, id: NodeId) {
        self.selection.select_node(id);
    }

    /// Remove a node from the selection set.
    pub fn deselect_node(&mut self, id: NodeId) {
        self.selection.deselect_node(id);
    }

    /// Empty the selection and hide the transformer.
    pub fn clear_selection(&mut self) {
        self.selection
            .clear_selection(&mut self.transformer, &mut self.stage);
    }

    /// Attach the transformer to the current selection and show it.
    pub fn show_transformer(&mut self) {
        self.transformer
            .attach(self.selection.selected(), &mut self.stage);
    }

    // --- text surface ---

    /// In-edit text regions, in creation order.
    pub fn text_regions(&self) -> &[TextRegion] {
        self.text.regions()
    }

    /// The text coordinator (committed nodes, ids).
    pub fn text(&self) -> &TextTool {
        &self.text
    }

    /// Replace the content of the in-edit region at `index`.
    pub fn edit_text(&mut self, index: usize, content: impl Into<String>) {
        self.text.edit(index, content);
    }

    /// Commit every in-edit region to a rendered text node.
    pub fn commit_text(&mut self) {
        self.text.commit_all(&mut self.stage);
    }

    /// Reopen every committed text node for editing. Reopened nodes leave
    /// the stage, so they are also dropped from the selection and the
    /// transformer is re-synced to the survivors.
    pub fn reopen_text(&mut self) {
        let removed = self.text.reopen_all(&mut self.stage);
        let mut pruned = false;
        for id in removed {
            if self.selection.is_selected(id) {
                self.selection.deselect_node(id);
                pruned = true;
            }
        }
        if pruned {
            if self.selection.selected().is_empty() {
                self.transformer.detach(&mut self.stage);
            } else {
                self.transformer
                    .attach(self.selection.selected(), &mut self.stage);
            }
        }
    }
}
