//! Current-editing-context stack for entering and exiting nested layers.

use super::layers::layers_at_context;
use super::model::EditorState;

/// Stack of layer ids identifying the nested composition being edited.
/// Empty means the base composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextNavigator {
    path: Vec<String>,
}

impl ContextNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_path(&self) -> &[String] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Enters the layer with `id` (only if it exists at the current depth)
    /// or, with `None`, pops back to the parent composition. Returns whether
    /// the path changed; unknown ids and popping at root are no-ops.
    pub fn switch_context(&mut self, state: &EditorState, target: Option<&str>) -> bool {
        match target {
            Some(id) => {
                let Some(current) = layers_at_context(state, &self.path) else {
                    tracing::warn!(path = ?self.path, "context path is stale; ignoring switch");
                    return false;
                };
                if current.iter().any(|layer| layer.id == id) {
                    self.path.push(id.to_string());
                    tracing::debug!(id, depth = self.path.len(), "entered layer context");
                    true
                } else {
                    tracing::debug!(id, "no layer with this id at the current depth");
                    false
                }
            }
            None => self.path.pop().is_some(),
        }
    }

    /// Truncates the path at the first id that no longer resolves, e.g.
    /// after an undo removed the layer being edited.
    pub fn truncate_unresolvable(&mut self, state: &EditorState) {
        for depth in 0..self.path.len() {
            if layers_at_context(state, &self.path[..=depth]).is_none() {
                tracing::debug!(depth, "truncating stale context path");
                self.path.truncate(depth);
                return;
            }
        }
    }

    /// Layer names along the current path, stopping at the last resolvable
    /// node.
    pub fn breadcrumbs(&self, state: &EditorState) -> Vec<String> {
        super::layers::breadcrumbs(state, &self.path)
    }
}
