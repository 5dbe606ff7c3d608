//! Maps visible-viewer geometry to output-pixel geometry.
//!
//! New layers are auto-placed inside whatever portion of the output canvas
//! is currently visible, so the mapper reproduces the viewer's exact layout
//! model: the scrollable wrapper centers the preview image with half-wrapper
//! padding around it, and the scrolled client rectangle (minus the fixed
//! container padding) is intersected with the image before converting back
//! to output pixels.

pub mod zoom;

use crate::geometry::{PixelRect, RectF, Size};

pub use zoom::{Zoom, ZoomSelector};

/// Fixed inner padding of the viewer container, in client pixels.
pub const CONTAINER_PADDING: f64 = 20.0;

/// Share of the visible viewport a newly placed layer may occupy.
pub const LAYER_FIT_SCALE_FACTOR: f64 = 0.9;

/// Live measurements of the scrollable viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
    pub wrapper_width: f64,
    pub wrapper_height: f64,
    pub preview_width: f64,
    pub preview_height: f64,
}

impl ViewportMetrics {
    fn has_preview(&self) -> bool {
        self.preview_width > 0.0 && self.preview_height > 0.0
    }
}

/// Where a freshly placed layer lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPlacement {
    TopLeft,
    Centered,
}

/// Output-space rectangle currently visible in the viewer.
///
/// Falls back to the full canvas when the preview has not been measured
/// yet, so auto-placement still produces a usable position.
pub fn visible_output_rect(metrics: &ViewportMetrics, output: Size) -> PixelRect {
    if !metrics.has_preview() {
        return full_canvas(output);
    }
    let scale = f64::from(output.width) / metrics.preview_width;

    // The wrapper centers the preview with 50%-of-wrapper padding on every
    // side, so the image origin sits at half the slack.
    let image = RectF::new(
        (metrics.wrapper_width - metrics.preview_width) / 2.0,
        (metrics.wrapper_height - metrics.preview_height) / 2.0,
        metrics.preview_width,
        metrics.preview_height,
    );
    let visible = RectF::new(
        metrics.scroll_left + CONTAINER_PADDING,
        metrics.scroll_top + CONTAINER_PADDING,
        (metrics.client_width - 2.0 * CONTAINER_PADDING).max(0.0),
        (metrics.client_height - 2.0 * CONTAINER_PADDING).max(0.0),
    );
    let overlap = visible.intersect(&image);

    PixelRect::new(
        ((overlap.x - image.x) * scale).round() as i64,
        ((overlap.y - image.y) * scale).round() as i64,
        (overlap.width * scale).round() as i64,
        (overlap.height * scale).round() as i64,
    )
}

/// Scales `layer` to fit within `scale_factor ×` the viewport bounds
/// (never upscaling past native size) and places it at the viewport origin
/// or centered.
pub fn place_layer_in_viewport(
    layer: Size,
    viewport: PixelRect,
    scale_factor: f64,
    placement: LayerPlacement,
) -> PixelRect {
    if layer.width == 0 || layer.height == 0 {
        return PixelRect::new(viewport.x, viewport.y, 0, 0);
    }
    let available_width = viewport.width as f64 * scale_factor;
    let available_height = viewport.height as f64 * scale_factor;
    let scale = (available_width / f64::from(layer.width))
        .min(available_height / f64::from(layer.height))
        .min(1.0)
        .max(0.0);
    let width = (f64::from(layer.width) * scale).round() as i64;
    let height = (f64::from(layer.height) * scale).round() as i64;

    let (x, y) = match placement {
        LayerPlacement::TopLeft => (viewport.x, viewport.y),
        LayerPlacement::Centered => (
            viewport.x + (viewport.width - width) / 2,
            viewport.y + (viewport.height - height) / 2,
        ),
    };
    PixelRect::new(x, y, width, height)
}

/// Placement for the view the user is actually looking at.
///
/// In fit mode the whole output canvas is the viewport. For a numeric zoom
/// the live container metrics are required; when they are missing (no
/// mounted container, preview not yet measured) this falls back to the fit
/// behavior rather than failing.
pub fn layer_position_for_current_view(
    zoom: Zoom,
    layer: Size,
    output: Size,
    metrics: Option<&ViewportMetrics>,
    placement: LayerPlacement,
) -> PixelRect {
    let viewport = match zoom {
        Zoom::Fit => full_canvas(output),
        Zoom::Factor(_) => match metrics {
            Some(live) if live.has_preview() => visible_output_rect(live, output),
            _ => {
                tracing::debug!("no live viewport for zoomed placement; using fit bounds");
                full_canvas(output)
            }
        },
    };
    place_layer_in_viewport(layer, viewport, LAYER_FIT_SCALE_FACTOR, placement)
}

fn full_canvas(output: Size) -> PixelRect {
    PixelRect::new(0, 0, i64::from(output.width), i64::from(output.height))
}
