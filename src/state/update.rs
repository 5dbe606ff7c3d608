//! Pure update functions over [`EditorState`].
//!
//! Every function clones the input tree and applies the change at the
//! composition addressed by the context path, so committed snapshots can be
//! pushed to history without further copying.

use crate::geometry::Size;

use super::error::StateResult;
use super::layers::{at_context, update_layer};
use super::model::{
    BlendMode, CropBox, Dimensions, EditorState, Effect, Output, Position, Rotation, ALPHA_MAX,
};

pub fn set_crop(
    state: &EditorState,
    path: &[String],
    crop: CropBox,
    original: Size,
) -> StateResult<EditorState> {
    at_context(state, path, |target| {
        target.crop = crop.clamped(original);
    })
}

pub fn set_auto_trim(state: &EditorState, path: &[String], enabled: bool) -> StateResult<EditorState> {
    at_context(state, path, |target| target.auto_trim = enabled)
}

pub fn set_rotation(
    state: &EditorState,
    path: &[String],
    rotation: Rotation,
) -> StateResult<EditorState> {
    at_context(state, path, |target| target.rotation = rotation)
}

pub fn rotate_cw(state: &EditorState, path: &[String]) -> StateResult<EditorState> {
    at_context(state, path, |target| {
        target.rotation = target.rotation.rotated_cw();
    })
}

pub fn toggle_h_flip(state: &EditorState, path: &[String]) -> StateResult<EditorState> {
    at_context(state, path, |target| target.h_flip = !target.h_flip)
}

pub fn toggle_v_flip(state: &EditorState, path: &[String]) -> StateResult<EditorState> {
    at_context(state, path, |target| target.v_flip = !target.v_flip)
}

pub fn set_fill(
    state: &EditorState,
    path: &[String],
    fill: Option<String>,
) -> StateResult<EditorState> {
    at_context(state, path, |target| target.fill = fill)
}

pub fn set_effects(
    state: &EditorState,
    path: &[String],
    effects: Vec<Effect>,
) -> StateResult<EditorState> {
    at_context(state, path, |target| target.effects = effects)
}

pub fn set_dimensions(
    state: &EditorState,
    path: &[String],
    dimensions: Dimensions,
) -> StateResult<EditorState> {
    at_context(state, path, |target| target.dimensions = dimensions)
}

pub fn set_output(state: &EditorState, path: &[String], output: Output) -> StateResult<EditorState> {
    at_context(state, path, |target| target.output = output)
}

pub fn set_visual_crop(state: &EditorState, enabled: bool) -> EditorState {
    EditorState {
        visual_crop_enabled: enabled,
        ..state.clone()
    }
}

pub fn set_layer_alpha(
    state: &EditorState,
    path: &[String],
    id: &str,
    alpha: u8,
) -> StateResult<EditorState> {
    update_layer(state, path, id, |layer| {
        layer.alpha = alpha.min(ALPHA_MAX);
    })
}

pub fn set_layer_blend_mode(
    state: &EditorState,
    path: &[String],
    id: &str,
    blend_mode: BlendMode,
) -> StateResult<EditorState> {
    update_layer(state, path, id, |layer| layer.blend_mode = blend_mode)
}

pub fn set_layer_position(
    state: &EditorState,
    path: &[String],
    id: &str,
    x: Position,
    y: Position,
) -> StateResult<EditorState> {
    update_layer(state, path, id, |layer| {
        layer.x = x;
        layer.y = y;
    })
}

pub fn rename_layer(
    state: &EditorState,
    path: &[String],
    id: &str,
    name: String,
) -> StateResult<EditorState> {
    update_layer(state, path, id, |layer| layer.name = name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::layers::add_layer;
    use crate::state::model::{Anchor, Layer};

    #[test]
    fn set_crop_clamps_to_original_dimensions() {
        let state = EditorState::default();
        let next = set_crop(
            &state,
            &[],
            CropBox::new(100, 100, 5000, 5000),
            Size::new(1920, 1080),
        )
        .expect("crop at root should work");
        assert_eq!(next.crop, CropBox::new(100, 100, 1920, 1080));
        // input untouched
        assert_eq!(state.crop, CropBox::default());
    }

    #[test]
    fn rotate_cw_steps_through_right_angles() {
        let state = EditorState::default();
        let next = rotate_cw(&state, &[]).expect("rotate should work");
        assert_eq!(next.rotation, Rotation::R90);
        let next = rotate_cw(&next, &[]).expect("rotate should work");
        assert_eq!(next.rotation, Rotation::R180);
    }

    #[test]
    fn updates_inside_a_nested_context_only_touch_that_composition() {
        let (state, id) = add_layer(&EditorState::default(), &[], Layer::default())
            .expect("add should work");
        let path = vec![id];

        let next = toggle_h_flip(&state, &path).expect("nested flip should work");
        assert!(!next.h_flip);
        assert!(next.layers[0].transforms.h_flip);
    }

    #[test]
    fn set_layer_alpha_clamps_to_scale_maximum() {
        let (state, id) = add_layer(&EditorState::default(), &[], Layer::default())
            .expect("add should work");
        let next = set_layer_alpha(&state, &[], &id, 250).expect("alpha update should work");
        assert_eq!(next.layers[0].alpha, ALPHA_MAX);
    }

    #[test]
    fn set_layer_position_accepts_anchors_and_offsets() {
        let (state, id) = add_layer(&EditorState::default(), &[], Layer::default())
            .expect("add should work");
        let next = set_layer_position(
            &state,
            &[],
            &id,
            Position::Anchor(Anchor::Center),
            Position::Offset(12.0),
        )
        .expect("position update should work");
        assert_eq!(next.layers[0].x, Position::Anchor(Anchor::Center));
        assert_eq!(next.layers[0].y, Position::Offset(12.0));
    }

    #[test]
    fn set_visual_crop_changes_only_the_transient_toggle() {
        let state = EditorState::default();
        let next = set_visual_crop(&state, true);
        assert!(next.visual_crop_enabled);
        assert_eq!(
            EditorState {
                visual_crop_enabled: false,
                ..next
            },
            state
        );
    }
}
