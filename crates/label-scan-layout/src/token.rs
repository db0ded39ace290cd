use label_scan_core::PixelRect;
use nalgebra::Point2;

/// One word with its pixel-space box.
///
/// `text` is empty only for the layout-only placeholder emitted when a
/// detection's text splits into zero words.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub text: String,
    pub rect: PixelRect,
}

impl Token {
    pub fn new(text: impl Into<String>, rect: PixelRect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }

    /// Box center; a larger `y` is closer to the top of the image.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        self.rect.center()
    }

    /// Left edge.
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.rect.min_x()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.height
    }
}
