//! Transform-parameter data model for one compositable image.
//!
//! Everything here is a plain value type: updates go through
//! [`crate::state::update`] and always produce a new tree, so history
//! snapshots and codec round-trips stay trivially cloneable.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Upper bound of the layer alpha scale.
pub const ALPHA_MAX: u8 = 100;

/// Crop offsets measured in pixels from each edge of the original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Clamps every offset into `[0, original dimension]`.
    pub fn clamped(self, original: Size) -> Self {
        Self {
            left: self.left.min(original.width),
            right: self.right.min(original.width),
            top: self.top.min(original.height),
            bottom: self.bottom.min(original.height),
        }
    }
}

/// Right-angle rotation, serialized as degrees (0/90/180/270).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::R0 => Self::R90,
            Self::R90 => Self::R180,
            Self::R180 => Self::R270,
            Self::R270 => Self::R0,
        }
    }

    pub const fn rotated_ccw(self) -> Self {
        match self {
            Self::R0 => Self::R270,
            Self::R90 => Self::R0,
            Self::R180 => Self::R90,
            Self::R270 => Self::R180,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            other => Err(format!("rotation must be a right angle, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// How the target dimensions are applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    #[default]
    Fit,
    Fill,
    Stretch,
}

/// Resize target; `None` dimensions leave the axis to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub mode: ResizeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Auto,
    Jpeg,
    Png,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub format: OutputFormat,
    pub quality: u8,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            format: OutputFormat::Auto,
            quality: 85,
        }
    }
}

/// A single named effect with an optional strength, applied by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Effect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

/// Symbolic layer position keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Center,
    Right,
    Top,
    Bottom,
    Repeat,
}

/// Layer position on one axis: a pixel offset or an anchor keyword.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Offset(f64),
    Anchor(Anchor),
}

impl Default for Position {
    fn default() -> Self {
        Self::Offset(0.0)
    }
}

/// Blend mode applied when compositing a layer over its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorBurn,
    ColorDodge,
    Darken,
    Lighten,
    Add,
    Difference,
    Exclusion,
    Mask,
    MaskOut,
}

impl BlendMode {
    pub const ALL: [BlendMode; 15] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::ColorBurn,
        Self::ColorDodge,
        Self::Darken,
        Self::Lighten,
        Self::Add,
        Self::Difference,
        Self::Exclusion,
        Self::Mask,
        Self::MaskOut,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::ColorBurn => "color-burn",
            Self::ColorDodge => "color-dodge",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::Add => "add",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Mask => "mask",
            Self::MaskOut => "mask-out",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.label() == raw)
    }
}

/// A positioned, blended sub-composition atop its parent composition.
///
/// `transforms` is a full [`EditorState`], so a layer may carry its own
/// crop, effects, and further nested layers to unbounded depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub x: Position,
    pub y: Position,
    pub alpha: u8,
    pub blend_mode: BlendMode,
    pub transforms: Box<EditorState>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            x: Position::default(),
            y: Position::default(),
            alpha: ALPHA_MAX,
            blend_mode: BlendMode::Normal,
            transforms: Box::default(),
        }
    }
}

/// Full transform-parameter set for one compositable image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    pub crop: CropBox,
    pub auto_trim: bool,
    pub rotation: Rotation,
    pub h_flip: bool,
    pub v_flip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    pub dimensions: Dimensions,
    pub output: Output,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<Layer>,
    /// UI-only toggle for the visual crop overlay; never serialized, so it
    /// does not survive a reload or leak into templates.
    #[serde(skip)]
    pub visual_crop_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_box_clamps_offsets_to_original_dimensions() {
        let crop = CropBox::new(50, 4000, 120, 10);
        let clamped = crop.clamped(Size::new(800, 600));
        assert_eq!(clamped, CropBox::new(50, 600, 120, 10));
    }

    #[test]
    fn rotation_round_trips_through_degrees() {
        for rotation in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
            assert_eq!(Rotation::try_from(rotation.degrees()), Ok(rotation));
        }
        assert!(Rotation::try_from(45).is_err());
    }

    #[test]
    fn rotation_steps_cycle_in_both_directions() {
        assert_eq!(Rotation::R270.rotated_cw(), Rotation::R0);
        assert_eq!(Rotation::R0.rotated_ccw(), Rotation::R270);
        assert_eq!(Rotation::R90.rotated_cw().rotated_ccw(), Rotation::R90);
    }

    #[test]
    fn blend_mode_all_labels_parse_back() {
        for mode in BlendMode::ALL {
            assert_eq!(BlendMode::parse(mode.label()), Some(mode));
        }
        assert_eq!(BlendMode::parse("bogus"), None);
    }

    #[test]
    fn blend_mode_serializes_as_kebab_case_labels() {
        let json = serde_json::to_string(&BlendMode::SoftLight).expect("mode should serialize");
        assert_eq!(json, "\"soft-light\"");
        let json = serde_json::to_string(&BlendMode::MaskOut).expect("mode should serialize");
        assert_eq!(json, "\"mask-out\"");
    }

    #[test]
    fn position_serializes_numbers_and_keywords() {
        let offset = serde_json::to_string(&Position::Offset(42.0)).expect("should serialize");
        assert_eq!(offset, "42.0");
        let anchor =
            serde_json::to_string(&Position::Anchor(Anchor::Center)).expect("should serialize");
        assert_eq!(anchor, "\"center\"");

        let parsed: Position = serde_json::from_str("\"top\"").expect("keyword should parse");
        assert_eq!(parsed, Position::Anchor(Anchor::Top));
        let parsed: Position = serde_json::from_str("17").expect("number should parse");
        assert_eq!(parsed, Position::Offset(17.0));
    }

    #[test]
    fn editor_state_tolerates_unknown_and_missing_fields() {
        let state: EditorState =
            serde_json::from_str(r#"{"rotation":180,"futureField":true}"#)
                .expect("partial document should deserialize");
        assert_eq!(state.rotation, Rotation::R180);
        assert_eq!(state.crop, CropBox::default());
        assert!(state.layers.is_empty());
    }

    #[test]
    fn visual_crop_toggle_is_not_serialized() {
        let state = EditorState {
            visual_crop_enabled: true,
            ..EditorState::default()
        };
        let json = serde_json::to_string(&state).expect("state should serialize");
        assert!(!json.contains("visualCrop"));

        let restored: EditorState = serde_json::from_str(&json).expect("state should parse");
        assert!(!restored.visual_crop_enabled);
    }
}
