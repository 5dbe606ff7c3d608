/// Shared geometric primitives used across state, viewport, and session modules.
use serde::{Deserialize, Serialize};

/// Integer pixel dimensions of an image in original or output space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Floating-point rectangle in viewer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Intersection with `other`, clamped to non-negative extent.
    pub fn intersect(&self, other: &RectF) -> RectF {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = (self.right().min(other.right()) - x).max(0.0);
        let height = (self.bottom().min(other.bottom()) - y).max(0.0);
        RectF::new(x, y, width, height)
    }
}

/// Integer rectangle in output-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_clamps_disjoint_rects_to_zero_extent() {
        let a = RectF::new(0.0, 0.0, 10.0, 10.0);
        let b = RectF::new(20.0, 20.0, 10.0, 10.0);
        let overlap = a.intersect(&b);
        assert_eq!(overlap.width, 0.0);
        assert_eq!(overlap.height, 0.0);
    }

    #[test]
    fn intersect_returns_overlapping_region() {
        let a = RectF::new(100.0, 0.0, 400.0, 300.0);
        let b = RectF::new(250.0, 200.0, 500.0, 400.0);
        let overlap = a.intersect(&b);
        assert_eq!(overlap, RectF::new(250.0, 200.0, 250.0, 100.0));
    }
}
