//! Layer-based image transform editing engine.
//!
//! A pure state model for composing cropped, rotated, and filtered images
//! with nested blendable layers, plus the viewport mapper used to
//! auto-place new layers, a fit-relative zoom selector, linear undo/redo,
//! and two serialization codecs (versioned templates and a compact
//! URL-embeddable encoding). Pixel-level rendering is delegated to a
//! remote renderer behind [`remote::RenderClient`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod logging;
pub mod remote;
pub mod session;
pub mod state;
pub mod template;
pub mod urlstate;
pub mod viewport;

pub use error::{EngineError, EngineResult};
pub use session::{EditorAction, EditorSession};
pub use state::EditorState;
