//! Versioned save/load of named, reusable transform bundles.
//!
//! Loading never blocks on a partially invalid document: structural parse
//! failure is the only hard stop, and even then the outcome is a value, not
//! an error. Everything else degrades with a structured warning so the
//! user always gets the best available state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::geometry::Size;
use crate::state::{BlendMode, EditorState};

/// Version tag written by [`save`]; the sole forward-compatibility marker.
pub const TEMPLATE_VERSION: &str = "1.0";

pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to serialize template {name:?}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionMode {
    /// The template re-adapts to the dimensions of the image it is applied
    /// to.
    #[default]
    Adaptive,
    /// The template carries frozen output dimensions.
    Predefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateMetadata {
    pub created_at: DateTime<Utc>,
}

impl Default for TemplateMetadata {
    fn default() -> Self {
        Self {
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// A named, versioned, reusable bundle of an [`EditorState`] plus the
/// dimension-handling policy. Unknown extra fields are tolerated on load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub version: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dimension_mode: DimensionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_dimensions: Option<Size>,
    pub transformations: EditorState,
    pub metadata: TemplateMetadata,
}

/// Non-fatal degradation emitted while loading a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    InvalidJson { detail: String },
    VersionMismatch { found: String },
    InvalidFilter { layer_id: String, found: String },
    MissingLayer { index: usize },
}

impl LoadWarning {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson { .. } => "invalid-json",
            Self::VersionMismatch { .. } => "version-mismatch",
            Self::InvalidFilter { .. } => "invalid-filter",
            Self::MissingLayer { .. } => "missing-layer",
        }
    }
}

/// Best-effort load result: `applied_state` is populated whenever the raw
/// document parsed as JSON, no matter how degraded.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLoadOutcome {
    pub success: bool,
    pub template: Option<Template>,
    pub applied_state: Option<EditorState>,
    pub warnings: Vec<LoadWarning>,
}

/// Snapshots `state` into a template tagged [`TEMPLATE_VERSION`]. With
/// [`DimensionMode::Predefined`] the current dimensions are frozen into the
/// template; adaptive templates omit them so they re-adapt on reuse.
pub fn save(
    state: &EditorState,
    name: impl Into<String>,
    description: Option<String>,
    dimension_mode: DimensionMode,
    current_dimensions: Size,
) -> Template {
    Template {
        version: TEMPLATE_VERSION.to_string(),
        name: name.into(),
        description,
        dimension_mode,
        predefined_dimensions: match dimension_mode {
            DimensionMode::Predefined => Some(current_dimensions),
            DimensionMode::Adaptive => None,
        },
        transformations: state.clone(),
        metadata: TemplateMetadata {
            created_at: Utc::now(),
        },
    }
}

pub fn to_json(template: &Template) -> TemplateResult<String> {
    serde_json::to_string_pretty(template).map_err(|source| TemplateError::Serialize {
        name: template.name.clone(),
        source,
    })
}

/// Loads a template from raw JSON text.
pub fn load(raw: &str) -> TemplateLoadOutcome {
    let mut value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, "template document is not valid JSON");
            return TemplateLoadOutcome {
                success: false,
                template: None,
                applied_state: None,
                warnings: vec![LoadWarning::InvalidJson {
                    detail: err.to_string(),
                }],
            };
        }
    };

    let mut warnings = Vec::new();

    let version = value
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != TEMPLATE_VERSION {
        tracing::warn!(found = version, expected = TEMPLATE_VERSION, "template version mismatch");
        warnings.push(LoadWarning::VersionMismatch {
            found: version.to_string(),
        });
    }

    if let Some(transformations) = value.get_mut("transformations") {
        sanitize_state(transformations, &mut warnings);
    }

    let template = match serde_json::from_value::<Template>(value.clone()) {
        Ok(template) => Some(template),
        Err(err) => {
            tracing::warn!(%err, "template shape mismatch; keeping best-effort state");
            warnings.push(LoadWarning::InvalidJson {
                detail: err.to_string(),
            });
            None
        }
    };

    let applied_state = template
        .as_ref()
        .map(|template| template.transformations.clone())
        .or_else(|| {
            value
                .get("transformations")
                .cloned()
                .and_then(|transformations| serde_json::from_value(transformations).ok())
        })
        .or_else(|| Some(EditorState::default()));

    TemplateLoadOutcome {
        success: true,
        template,
        applied_state,
        warnings,
    }
}

/// Repairs an `EditorState`-shaped JSON value in place, recursively:
/// unknown blend modes fall back to `normal`, and layer entries without a
/// resolvable id are dropped.
fn sanitize_state(value: &mut Value, warnings: &mut Vec<LoadWarning>) {
    let Some(state) = value.as_object_mut() else {
        return;
    };
    let Some(layers) = state.get_mut("layers").and_then(Value::as_array_mut) else {
        return;
    };

    let entries: Vec<Value> = layers.drain(..).collect();
    for (index, mut entry) in entries.into_iter().enumerate() {
        let Some(layer) = entry.as_object_mut() else {
            warnings.push(LoadWarning::MissingLayer { index });
            continue;
        };
        if !layer.get("id").is_some_and(Value::is_string) {
            warnings.push(LoadWarning::MissingLayer { index });
            continue;
        }
        let layer_id = layer
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if let Some(mode) = layer.get("blendMode") {
            let found = mode.as_str().unwrap_or_default();
            if BlendMode::parse(found).is_none() {
                warnings.push(LoadWarning::InvalidFilter {
                    layer_id,
                    found: found.to_string(),
                });
                layer.insert(
                    "blendMode".to_string(),
                    Value::String(BlendMode::Normal.label().to_string()),
                );
            }
        }

        if let Some(transforms) = layer.get_mut("transforms") {
            sanitize_state(transforms, warnings);
        }
        layers.push(entry);
    }
}
