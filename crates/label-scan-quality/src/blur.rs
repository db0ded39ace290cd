use label_scan_core::{downscale_to_width, to_luma, GrayImageView, RgbaImageView};
use log::debug;
use serde::{Deserialize, Serialize};

/// Frames wider than this are downscaled before the Laplacian pass.
pub const DEFAULT_DOWNSCALE_WIDTH: usize = 640;

/// Sharp/blurry decision boundary on the 0-255 response scale.
pub const DEFAULT_VARIANCE_THRESHOLD: f64 = 120.0;

/// Tunables for the sharpness test.
///
/// The variance threshold is calibrated against the downscale width; the
/// pair must be re-derived together. Small captures below the cap are never
/// upscaled and keep the same threshold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BlurParams {
    pub downscale_width: usize,
    pub variance_threshold: f64,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            downscale_width: DEFAULT_DOWNSCALE_WIDTH,
            variance_threshold: DEFAULT_VARIANCE_THRESHOLD,
        }
    }
}

/// Outcome of one sharpness assessment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharpnessReport {
    pub is_blurry: bool,
    /// Population variance of the clamped Laplacian response.
    pub variance: f64,
}

/// Laplacian-variance sharpness classifier.
///
/// A near-zero response everywhere means the frame lacks sharp edges;
/// large swings mean edges are present. Repeated calls on the same buffer
/// are deterministic.
#[derive(Clone, Debug, Default)]
pub struct BlurDetector {
    params: BlurParams,
}

impl BlurDetector {
    pub fn new(params: BlurParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &BlurParams {
        &self.params
    }

    /// Assess a captured RGBA frame.
    ///
    /// Degenerate (zero-dimension) views fail open as not-blurry so a
    /// decode problem upstream is surfaced elsewhere instead of blocking
    /// the capture flow here.
    pub fn assess(&self, frame: &RgbaImageView<'_>) -> SharpnessReport {
        if frame.is_empty() {
            return SharpnessReport {
                is_blurry: false,
                variance: 0.0,
            };
        }
        let gray = to_luma(frame);
        self.assess_gray(&gray.view())
    }

    /// Assess an already-grayscale frame.
    pub fn assess_gray(&self, gray: &GrayImageView<'_>) -> SharpnessReport {
        if gray.is_empty() {
            return SharpnessReport {
                is_blurry: false,
                variance: 0.0,
            };
        }

        let scaled;
        let view = if gray.width > self.params.downscale_width {
            scaled = downscale_to_width(gray, self.params.downscale_width);
            scaled.view()
        } else {
            *gray
        };

        let variance = laplacian_variance(&view);
        debug!("laplacian variance = {variance:.1}");

        SharpnessReport {
            is_blurry: variance < self.params.variance_threshold,
            variance,
        }
    }
}

/// Population variance of the 3x3 Laplacian response over interior pixels.
///
/// Kernel: center 4, four-neighbor -1, corners 0. Each response is clamped
/// to the 8-bit range before the variance, keeping the metric on the same
/// 0-255 scale the decision threshold was calibrated on. Images smaller
/// than 3x3 have no interior and score 0.
pub fn laplacian_variance(src: &GrayImageView<'_>) -> f64 {
    if src.width < 3 || src.height < 3 {
        return 0.0;
    }

    let w = src.width;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;

    for y in 1..src.height - 1 {
        let row = y * w;
        for x in 1..w - 1 {
            let center = src.data[row + x] as i32;
            let response = 4 * center
                - src.data[row + x - 1] as i32
                - src.data[row + x + 1] as i32
                - src.data[row - w + x] as i32
                - src.data[row + w + x] as i32;
            let v = response.clamp(0, 255) as f64;
            sum += v;
            sum_sq += v * v;
        }
    }

    let count = ((src.width - 2) * (src.height - 2)) as f64;
    let mean = sum / count;
    // clamp: tiny negative values are floating-point error
    (sum_sq / count - mean * mean).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use label_scan_core::GrayImage;

    fn flat(width: usize, height: usize, value: u8) -> GrayImage {
        GrayImage {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn checkerboard(width: usize, height: usize, block: usize, lo: u8, hi: u8) -> GrayImage {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let on = (x / block + y / block) % 2 == 0;
                data.push(if on { hi } else { lo });
            }
        }
        GrayImage {
            width,
            height,
            data,
        }
    }

    #[test]
    fn flat_frame_is_blurry_with_zero_variance() {
        let detector = BlurDetector::default();
        let img = flat(64, 64, 140);
        let report = detector.assess_gray(&img.view());
        assert!(report.is_blurry);
        assert_abs_diff_eq!(report.variance, 0.0);
    }

    #[test]
    fn checkerboard_is_sharp() {
        let detector = BlurDetector::default();
        let img = checkerboard(64, 64, 1, 0, 255);
        let report = detector.assess_gray(&img.view());
        assert!(!report.is_blurry);
        assert!(report.variance > DEFAULT_VARIANCE_THRESHOLD);
    }

    #[test]
    fn upscaled_sharp_frame_survives_downscaling() {
        // Same content at double the capture resolution: still classified
        // sharp after the internal downscale to the calibrated width.
        let detector = BlurDetector::default();
        let img = checkerboard(1280, 960, 20, 0, 255);
        let report = detector.assess_gray(&img.view());
        assert!(!report.is_blurry, "variance = {}", report.variance);
    }

    #[test]
    fn degenerate_view_fails_open() {
        let detector = BlurDetector::default();
        let view = RgbaImageView {
            width: 0,
            height: 0,
            data: &[],
        };
        let report = detector.assess(&view);
        assert!(!report.is_blurry);
        assert_abs_diff_eq!(report.variance, 0.0);
    }

    #[test]
    fn rgba_path_matches_gray_path_on_gray_input() {
        let detector = BlurDetector::default();
        let gray = checkerboard(32, 32, 2, 10, 240);
        let mut rgba = Vec::with_capacity(gray.data.len() * 4);
        for &v in &gray.data {
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
        let view = RgbaImageView {
            width: 32,
            height: 32,
            data: &rgba,
        };
        let a = detector.assess(&view);
        let b = detector.assess_gray(&gray.view());
        assert_eq!(a.is_blurry, b.is_blurry);
        // luma of (v, v, v) rounds back to v, up to float rounding
        assert_abs_diff_eq!(a.variance, b.variance, epsilon = 500.0);
    }
}
