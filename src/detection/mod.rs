//! Pixel-space detections and the geometry used to compare them.

pub mod decode;
pub mod nms;

/// Axis-aligned rectangle in integer pixel coordinates.
///
/// Edges are half-open in the usual raster sense: `right - left` is the width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Creates a rectangle from its edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels, zero for inverted rectangles.
    pub fn width(&self) -> i64 {
        (i64::from(self.right) - i64::from(self.left)).max(0)
    }

    /// Height in pixels, zero for inverted rectangles.
    pub fn height(&self) -> i64 {
        (i64::from(self.bottom) - i64::from(self.top)).max(0)
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// True when the rectangle has no interior.
    pub fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Area shared with `other`.
    pub fn intersection_area(&self, other: &PixelRect) -> i64 {
        let overlap = PixelRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        overlap.area()
    }
}

/// Intersection over union of two rectangles.
///
/// Returns 0 when the union is empty, so degenerate pairs never divide by zero.
pub fn iou(a: &PixelRect, b: &PixelRect) -> f32 {
    let inter = a.intersection_area(b);
    let union = a.area() + b.area() - inter;
    if union <= 0 {
        return 0.0;
    }
    (inter as f64 / union as f64) as f32
}

/// A labeled box that survived filtering and decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Box in frame pixel coordinates, clamped to the frame.
    pub bbox: PixelRect,
    /// Class id reported by the model.
    pub class_id: usize,
    /// Resolved class name.
    pub label: String,
    /// `objectness * class_score`.
    pub score: f32,
}

/// Ordered detections for one frame.
pub type DetectionSet = Vec<Detection>;
