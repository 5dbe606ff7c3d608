//! One editing session: the explicit context object the UI talks to.
//!
//! Every editor surface gets its own [`EditorSession`] instance, so
//! multiple editors can coexist without hidden shared state. UI controls
//! dispatch actions, the session applies the pure update at the current
//! context, records the commit in history, schedules the debounced URL
//! re-encode, and notifies subscribers.

pub mod debounce;

use std::time::Instant;

use crate::config::EngineConfig;
use crate::geometry::Size;
use crate::history::HistoryManager;
use crate::remote::{FileMetadata, RenderPayload, RequestToken, RequestTokens};
use crate::state::{
    layers, update, BlendMode, ContextNavigator, CropBox, Dimensions, EditorState, Effect, Layer,
    Output, Position, Rotation, StateResult,
};
use crate::template::{self, DimensionMode, Template};
use crate::urlstate;
use crate::viewport::ZoomSelector;

pub use debounce::Debouncer;

type Subscriber = Box<dyn Fn(&EditorState)>;

/// A committed edit. All layer-targeted actions address the layer list of
/// the composition currently being edited.
#[derive(Debug, Clone)]
pub enum EditorAction {
    SetCrop(CropBox),
    SetAutoTrim(bool),
    SetRotation(Rotation),
    RotateClockwise,
    ToggleHorizontalFlip,
    ToggleVerticalFlip,
    SetFill(Option<String>),
    SetEffects(Vec<Effect>),
    SetDimensions(Dimensions),
    SetOutput(Output),
    SetLayerAlpha { id: String, alpha: u8 },
    SetLayerBlendMode { id: String, blend_mode: BlendMode },
    SetLayerPosition { id: String, x: Position, y: Position },
    RenameLayer { id: String, name: String },
    RemoveLayer { id: String },
    MoveLayer { id: String, index: usize },
}

pub struct EditorSession {
    state: EditorState,
    original: Size,
    history: HistoryManager,
    navigator: ContextNavigator,
    zoom: ZoomSelector,
    url_updates: Debouncer<String>,
    tokens: RequestTokens,
    subscribers: Vec<Subscriber>,
}

impl EditorSession {
    /// Opens a fresh session for an image with the given metadata.
    pub fn open(metadata: FileMetadata, config: &EngineConfig) -> Self {
        Self::with_state(EditorState::default(), metadata, config)
    }

    /// Opens a session from a location, preferring the `state` query
    /// parameter and falling back to the legacy fragment, then to defaults.
    pub fn restore(query: &str, fragment: &str, metadata: FileMetadata, config: &EngineConfig) -> Self {
        let state = urlstate::state_from_location(query, fragment).unwrap_or_default();
        Self::with_state(state, metadata, config)
    }

    pub fn with_state(state: EditorState, metadata: FileMetadata, config: &EngineConfig) -> Self {
        Self {
            history: HistoryManager::with_capacity(state.clone(), config.history_capacity),
            state,
            original: Size::new(metadata.width, metadata.height),
            navigator: ContextNavigator::new(),
            zoom: ZoomSelector::new(),
            url_updates: Debouncer::new(config.url_debounce()),
            tokens: RequestTokens::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn original_size(&self) -> Size {
        self.original
    }

    pub fn context_path(&self) -> &[String] {
        self.navigator.context_path()
    }

    pub fn context_depth(&self) -> usize {
        self.navigator.depth()
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        self.navigator.breadcrumbs(&self.state)
    }

    /// Layer list of the composition being edited; empty when the context
    /// path has gone stale.
    pub fn current_layers(&self) -> &[Layer] {
        layers::layers_at_context(&self.state, self.navigator.context_path()).unwrap_or(&[])
    }

    pub fn switch_context(&mut self, target: Option<&str>) -> bool {
        self.navigator.switch_context(&self.state, target)
    }

    pub fn zoom(&mut self) -> &mut ZoomSelector {
        &mut self.zoom
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&EditorState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Applies `action` at the current context and commits the result.
    pub fn dispatch(&mut self, action: EditorAction) -> StateResult<()> {
        tracing::debug!(?action, depth = self.navigator.depth(), "dispatch editor action");
        let next = self.apply(&action)?;
        self.commit(next);
        Ok(())
    }

    /// Applies `action` without committing, for transient updates while a
    /// continuous control is being dragged. Call [`Self::commit_preview`]
    /// on release to batch the whole drag into one history entry.
    pub fn preview(&mut self, action: EditorAction) -> StateResult<()> {
        let next = self.apply(&action)?;
        self.state = next;
        self.notify();
        Ok(())
    }

    pub fn commit_preview(&mut self) {
        if *self.history.current() == self.state {
            return;
        }
        let state = self.state.clone();
        self.commit(state);
    }

    /// Adds a layer to the current context, returning the assigned id.
    pub fn add_layer(&mut self, layer: Layer) -> StateResult<String> {
        let (next, id) = layers::add_layer(&self.state, self.navigator.context_path(), layer)?;
        self.commit(next);
        Ok(id)
    }

    /// Toggles the visual crop overlay. UI-only: not committed to history
    /// and never serialized.
    pub fn set_visual_crop(&mut self, enabled: bool) {
        self.state = update::set_visual_crop(&self.state, enabled);
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore_snapshot(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore_snapshot(snapshot);
        true
    }

    /// Takes the debounced URL re-encode once its quiet period elapsed.
    pub fn poll_url_update(&mut self, now: Instant) -> Option<String> {
        self.url_updates.poll(now)
    }

    pub fn render_payload(&self) -> RenderPayload {
        RenderPayload::from(&self.state)
    }

    /// Issues the token for a new render call, superseding any in flight.
    pub fn begin_render(&mut self) -> RequestToken {
        self.tokens.issue()
    }

    /// Passes a render result through only when its token is still current.
    pub fn accept_render<T>(&self, token: RequestToken, result: T) -> Option<T> {
        self.tokens.accept(token, result)
    }

    /// Snapshots the current state into a named template.
    pub fn save_template(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        dimension_mode: DimensionMode,
    ) -> Template {
        let current = Size::new(
            self.state.dimensions.width.unwrap_or(self.original.width),
            self.state.dimensions.height.unwrap_or(self.original.height),
        );
        template::save(&self.state, name, description, dimension_mode, current)
    }

    /// Replaces the session state with one loaded from a template.
    pub fn apply_template_state(&mut self, state: EditorState) {
        self.commit(state);
        self.navigator.truncate_unresolvable(&self.state);
    }

    fn apply(&self, action: &EditorAction) -> StateResult<EditorState> {
        let state = &self.state;
        let path = self.navigator.context_path();
        match action {
            EditorAction::SetCrop(crop) => update::set_crop(state, path, *crop, self.original),
            EditorAction::SetAutoTrim(enabled) => update::set_auto_trim(state, path, *enabled),
            EditorAction::SetRotation(rotation) => update::set_rotation(state, path, *rotation),
            EditorAction::RotateClockwise => update::rotate_cw(state, path),
            EditorAction::ToggleHorizontalFlip => update::toggle_h_flip(state, path),
            EditorAction::ToggleVerticalFlip => update::toggle_v_flip(state, path),
            EditorAction::SetFill(fill) => update::set_fill(state, path, fill.clone()),
            EditorAction::SetEffects(effects) => update::set_effects(state, path, effects.clone()),
            EditorAction::SetDimensions(dimensions) => {
                update::set_dimensions(state, path, *dimensions)
            }
            EditorAction::SetOutput(output) => update::set_output(state, path, *output),
            EditorAction::SetLayerAlpha { id, alpha } => {
                update::set_layer_alpha(state, path, id, *alpha)
            }
            EditorAction::SetLayerBlendMode { id, blend_mode } => {
                update::set_layer_blend_mode(state, path, id, *blend_mode)
            }
            EditorAction::SetLayerPosition { id, x, y } => {
                update::set_layer_position(state, path, id, *x, *y)
            }
            EditorAction::RenameLayer { id, name } => {
                update::rename_layer(state, path, id, name.clone())
            }
            EditorAction::RemoveLayer { id } => layers::remove_layer(state, path, id),
            EditorAction::MoveLayer { id, index } => layers::move_layer(state, path, id, *index),
        }
    }

    fn commit(&mut self, next: EditorState) {
        self.state = next;
        self.history.commit(self.state.clone());
        self.navigator.truncate_unresolvable(&self.state);
        self.url_updates
            .schedule(urlstate::encode(&self.state), Instant::now());
        self.notify();
    }

    fn restore_snapshot(&mut self, snapshot: EditorState) {
        self.state = snapshot;
        self.navigator.truncate_unresolvable(&self.state);
        self.url_updates
            .schedule(urlstate::encode(&self.state), Instant::now());
        self.notify();
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}
