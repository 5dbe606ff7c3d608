//! Layer-tree access and mutation addressed by a context path.
//!
//! A context path is the chain of layer ids from the root composition down
//! to the nested composition currently being edited; an empty path means
//! the root. All mutation is copy-on-write: callers get a fresh
//! [`EditorState`] and the input tree is left untouched.

use super::error::{StateError, StateResult};
use super::model::{EditorState, Layer};

/// Layer list at `path`, or `None` when the path no longer resolves.
pub fn layers_at_context<'a>(state: &'a EditorState, path: &[String]) -> Option<&'a [Layer]> {
    let mut layers: &[Layer] = &state.layers;
    for id in path {
        let layer = layers.iter().find(|layer| &layer.id == id)?;
        layers = &layer.transforms.layers;
    }
    Some(layers)
}

/// Runs `mutate` against the nested composition addressed by `path` on a
/// clone of `state`.
pub fn at_context(
    state: &EditorState,
    path: &[String],
    mutate: impl FnOnce(&mut EditorState),
) -> StateResult<EditorState> {
    let mut next = state.clone();
    let mut target: &mut EditorState = &mut next;
    for id in path {
        let layer = target
            .layers
            .iter_mut()
            .find(|layer| &layer.id == id)
            .ok_or_else(|| StateError::UnresolvedContext {
                path: path.to_vec(),
            })?;
        target = &mut layer.transforms;
    }
    mutate(target);
    Ok(next)
}

/// Appends `layer` to the layer list at `path`, assigning a fresh
/// sibling-unique id (and a default name when none was given). Returns the
/// new state together with the assigned id.
pub fn add_layer(
    state: &EditorState,
    path: &[String],
    layer: Layer,
) -> StateResult<(EditorState, String)> {
    let mut assigned = String::new();
    let next = at_context(state, path, |target| {
        let index = next_layer_index(&target.layers);
        let mut layer = layer;
        layer.id = format!("layer-{index}");
        if layer.name.is_empty() {
            layer.name = format!("Layer {index}");
        }
        assigned = layer.id.clone();
        target.layers.push(layer);
    })?;
    tracing::debug!(id = %assigned, depth = path.len(), "layer added");
    Ok((next, assigned))
}

/// Applies `mutate` to the layer with `id` inside the list at `path`.
pub fn update_layer(
    state: &EditorState,
    path: &[String],
    id: &str,
    mutate: impl FnOnce(&mut Layer),
) -> StateResult<EditorState> {
    let mut found = false;
    let next = at_context(state, path, |target| {
        if let Some(layer) = target.layers.iter_mut().find(|layer| layer.id == id) {
            mutate(layer);
            found = true;
        }
    })?;
    if found {
        Ok(next)
    } else {
        Err(StateError::UnknownLayer { id: id.to_string() })
    }
}

/// Removes the layer with `id` from the list at `path`.
pub fn remove_layer(state: &EditorState, path: &[String], id: &str) -> StateResult<EditorState> {
    let mut found = false;
    let next = at_context(state, path, |target| {
        let before = target.layers.len();
        target.layers.retain(|layer| layer.id != id);
        found = target.layers.len() != before;
    })?;
    if found {
        Ok(next)
    } else {
        Err(StateError::UnknownLayer { id: id.to_string() })
    }
}

/// Moves the layer with `id` to `index` within its sibling list, clamping
/// `index` to the list length.
pub fn move_layer(
    state: &EditorState,
    path: &[String],
    id: &str,
    index: usize,
) -> StateResult<EditorState> {
    let mut found = false;
    let next = at_context(state, path, |target| {
        if let Some(from) = target.layers.iter().position(|layer| layer.id == id) {
            let layer = target.layers.remove(from);
            let to = index.min(target.layers.len());
            target.layers.insert(to, layer);
            found = true;
        }
    })?;
    if found {
        Ok(next)
    } else {
        Err(StateError::UnknownLayer { id: id.to_string() })
    }
}

/// Layer names along `path`, for breadcrumb display. Resolution stops at
/// the first unresolvable id instead of erroring, so a path left stale by a
/// concurrent deletion still yields the resolvable prefix.
pub fn breadcrumbs(state: &EditorState, path: &[String]) -> Vec<String> {
    let mut names = Vec::with_capacity(path.len());
    let mut layers: &[Layer] = &state.layers;
    for id in path {
        match layers.iter().find(|layer| &layer.id == id) {
            Some(layer) => {
                names.push(display_name(layer));
                layers = &layer.transforms.layers;
            }
            None => break,
        }
    }
    names
}

fn display_name(layer: &Layer) -> String {
    if layer.name.is_empty() {
        layer.id.clone()
    } else {
        layer.name.clone()
    }
}

fn next_layer_index(siblings: &[Layer]) -> u32 {
    let mut index = siblings
        .iter()
        .filter_map(|layer| {
            layer
                .id
                .strip_prefix("layer-")
                .and_then(|suffix| suffix.parse::<u32>().ok())
        })
        .max()
        .map_or(1, |max| max + 1);
    // Ids loaded from documents may not follow the generated pattern.
    while siblings.iter().any(|layer| layer.id == format!("layer-{index}")) {
        index += 1;
    }
    index
}
