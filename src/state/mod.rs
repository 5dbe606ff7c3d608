pub mod context;
pub mod error;
pub mod layers;
pub mod model;
pub mod update;

pub use context::ContextNavigator;
pub use error::{StateError, StateResult};
pub use model::{
    Anchor, BlendMode, CropBox, Dimensions, EditorState, Effect, Layer, Output, OutputFormat,
    Position, ResizeMode, Rotation, ALPHA_MAX,
};
