/// Borrowed view over a row-major, single-channel 8-bit buffer.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl GrayImageView<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Owned single-channel 8-bit buffer. Produced by transformations
/// (grayscale conversion, downscaling); never mutated in place.
#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Borrowed view over a row-major RGBA8 buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGBA8, len = w*h*4
}

impl RgbaImageView<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Channel values at (x, y). Reads outside the buffer return black.
    #[inline]
    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

#[inline]
fn gray_at(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

/// Bilinear sample at fractional coordinates. Out-of-bounds taps read 0.
#[inline]
pub fn bilinear_sample(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = gray_at(src, x0, y0) as f32;
    let p10 = gray_at(src, x0 + 1, y0) as f32;
    let p01 = gray_at(src, x0, y0 + 1) as f32;
    let p11 = gray_at(src, x0 + 1, y0 + 1) as f32;

    let top = p00 + fx * (p10 - p00);
    let bottom = p01 + fx * (p11 - p01);
    top + fy * (bottom - top)
}

#[inline]
pub fn bilinear_sample_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    bilinear_sample(src, x, y).clamp(0.0, 255.0) as u8
}

/// Rec. 601 luma conversion, RGBA -> gray.
pub fn to_luma(src: &RgbaImageView<'_>) -> GrayImage {
    let mut data = Vec::with_capacity(src.width * src.height);
    for px in src.data.chunks_exact(4) {
        let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        data.push(luma.round().clamp(0.0, 255.0) as u8);
    }
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

/// Uniform, aspect-preserving bilinear downscale to `target_width` columns.
///
/// Callers are expected to invoke this only when `src.width > target_width`;
/// the function never upscales and returns a copy when the width already
/// fits.
pub fn downscale_to_width(src: &GrayImageView<'_>, target_width: usize) -> GrayImage {
    if src.is_empty() || target_width == 0 || src.width <= target_width {
        return GrayImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    }

    let scale = target_width as f32 / src.width as f32;
    let target_height = ((src.height as f32 * scale).round() as usize).max(1);

    let mut data = Vec::with_capacity(target_width * target_height);
    for y in 0..target_height {
        // map destination pixel centers back into source space
        let sy = (y as f32 + 0.5) / scale - 0.5;
        for x in 0..target_width {
            let sx = (x as f32 + 0.5) / scale - 0.5;
            data.push(bilinear_sample_u8(src, sx, sy));
        }
    }

    GrayImage {
        width: target_width,
        height: target_height,
        data,
    }
}
