use label_scan_core::RgbaImageView;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of pixel coordinates drawn per assessment.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;

/// Minimum normalized brightness for a sample to count as glare.
pub const DEFAULT_VALUE_FLOOR: f32 = 0.9;

/// Maximum saturation for a sample to count as glare.
pub const DEFAULT_SATURATION_CEILING: f32 = 0.2;

/// Glare-sample fraction above which the frame is rejected.
pub const DEFAULT_GLARE_RATIO_THRESHOLD: f64 = 0.1;

/// Tunables for the glare test.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GlareParams {
    pub sample_count: usize,
    pub value_floor: f32,
    pub saturation_ceiling: f32,
    pub ratio_threshold: f64,
}

impl Default for GlareParams {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            value_floor: DEFAULT_VALUE_FLOOR,
            saturation_ceiling: DEFAULT_SATURATION_CEILING,
            ratio_threshold: DEFAULT_GLARE_RATIO_THRESHOLD,
        }
    }
}

/// Outcome of one glare assessment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlareReport {
    pub is_glare: bool,
    /// Fraction of samples classified as blown highlights.
    pub ratio: f64,
}

/// Random-sample glare classifier.
///
/// Samples pixel coordinates uniformly at random (with replacement) and
/// flags bright, nearly colorless pixels, the signature of a blown
/// highlight or specular reflection. The ratio is a statistical estimate:
/// repeated calls with an unseeded source may differ slightly. Inject a
/// seeded [`Rng`] for reproducible results.
#[derive(Clone, Debug, Default)]
pub struct GlareDetector {
    params: GlareParams,
}

impl GlareDetector {
    pub fn new(params: GlareParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &GlareParams {
        &self.params
    }

    /// Assess a frame with a caller-supplied random source.
    ///
    /// Degenerate views fail open as not-glare.
    pub fn assess<R: Rng + ?Sized>(&self, frame: &RgbaImageView<'_>, rng: &mut R) -> GlareReport {
        if frame.is_empty() || self.params.sample_count == 0 {
            return GlareReport {
                is_glare: false,
                ratio: 0.0,
            };
        }

        let mut glare_samples = 0usize;
        for _ in 0..self.params.sample_count {
            let x = rng.gen_range(0..frame.width);
            let y = rng.gen_range(0..frame.height);
            let [r, g, b, _] = frame.rgba(x, y);

            let r = r as f32 / 255.0;
            let g = g as f32 / 255.0;
            let b = b as f32 / 255.0;

            let value = r.max(g).max(b);
            let min = r.min(g).min(b);
            let saturation = if value == 0.0 { 0.0 } else { (value - min) / value };

            if value > self.params.value_floor && saturation < self.params.saturation_ceiling {
                glare_samples += 1;
            }
        }

        let ratio = glare_samples as f64 / self.params.sample_count as f64;
        GlareReport {
            is_glare: ratio > self.params.ratio_threshold,
            ratio,
        }
    }

    /// Assess with the thread-local random source.
    pub fn assess_default(&self, frame: &RgbaImageView<'_>) -> GlareReport {
        self.assess(frame, &mut rand::thread_rng())
    }
}
