//! Boundary to the remote renderer and file-metadata services.
//!
//! The core produces the transform-parameters payload and hands it to a
//! [`RenderClient`]; it never retries on its own. In-flight calls are
//! superseded rather than raced: each request carries a token, and a
//! result whose token is no longer current is discarded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{
    BlendMode, CropBox, Dimensions, EditorState, Effect, Layer, Output, Position,
};

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("render request for {image_id} failed: {detail}")]
    RequestFailed { image_id: String, detail: String },

    #[error("file metadata lookup for {image_id} failed: {detail}")]
    MetadataFailed { image_id: String, detail: String },
}

/// Dimensions of the image being edited, supplied by the metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub width: u32,
    pub height: u32,
}

/// The transform-parameters payload consumed by the remote renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub crop: CropBox,
    pub auto_trim: bool,
    pub rotation: u16,
    pub h_flip: bool,
    pub v_flip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    pub dimensions: Dimensions,
    pub output: Output,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerPayload>,
}

/// One layer in the render payload; `parameters` nests recursively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPayload {
    pub id: String,
    pub x: Position,
    pub y: Position,
    pub alpha: u8,
    pub blend_mode: BlendMode,
    pub parameters: Box<RenderPayload>,
}

impl From<&EditorState> for RenderPayload {
    fn from(state: &EditorState) -> Self {
        Self {
            crop: state.crop,
            auto_trim: state.auto_trim,
            rotation: state.rotation.degrees(),
            h_flip: state.h_flip,
            v_flip: state.v_flip,
            fill: state.fill.clone(),
            effects: state.effects.clone(),
            dimensions: state.dimensions,
            output: state.output,
            layers: state.layers.iter().map(LayerPayload::from).collect(),
        }
    }
}

impl From<&Layer> for LayerPayload {
    fn from(layer: &Layer) -> Self {
        Self {
            id: layer.id.clone(),
            x: layer.x,
            y: layer.y,
            alpha: layer.alpha,
            blend_mode: layer.blend_mode,
            parameters: Box::new(RenderPayload::from(layer.transforms.as_ref())),
        }
    }
}

/// Remote renderer seam. Implementations perform the network call; errors
/// come back to the caller untouched.
pub trait RenderClient {
    /// Turns one payload into a renderable image URL.
    fn render_url(&self, image_id: &str, payload: &RenderPayload) -> RemoteResult<String>;

    /// Bulk variant; the default maps [`Self::render_url`] over the slice.
    fn render_urls(
        &self,
        image_id: &str,
        payloads: &[RenderPayload],
    ) -> RemoteResult<Vec<String>> {
        payloads
            .iter()
            .map(|payload| self.render_url(image_id, payload))
            .collect()
    }
}

/// Metadata-service seam supplying the dimensions of the edited image.
pub trait MetadataClient {
    fn file_metadata(&self, image_id: &str) -> RemoteResult<FileMetadata>;
}

/// Token tagging one in-flight remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Generation counter for superseding in-flight calls: issuing a new token
/// invalidates every earlier one, so a late result can be recognized as
/// stale and dropped instead of racing the newer call.
#[derive(Debug, Default)]
pub struct RequestTokens {
    issued: u64,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Passes `result` through only when `token` is still current.
    pub fn accept<T>(&self, token: RequestToken, result: T) -> Option<T> {
        if self.is_current(token) {
            Some(result)
        } else {
            tracing::debug!(token = token.0, current = self.issued, "discarding stale result");
            None
        }
    }
}
