use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in normalized [0,1]x[0,1] image fractions.
///
/// The origin is the image's *bottom-left* corner, matching the coordinate
/// convention of the OCR engines this crate consumes. Callers holding
/// top-left-origin boxes must flip them before constructing a rect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Scale into pixel units. `image_width`/`image_height` must be the
    /// dimensions of the exact buffer the detection was produced from;
    /// a mismatch is a caller error.
    pub fn to_pixels(&self, image_width: f32, image_height: f32) -> PixelRect {
        PixelRect {
            x: self.x * image_width,
            y: self.y * image_height,
            width: self.width * image_width,
            height: self.height * image_height,
        }
    }
}

/// Axis-aligned box in pixel units, same bottom-left origin as
/// [`NormalizedRect`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.x
    }

    /// Vertical center. With the bottom-left origin, larger values sit
    /// closer to the top of the image.
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x + self.width * 0.5, self.mid_y())
    }
}
