use label_scan_core::RgbaImageView;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::blur::{BlurDetector, BlurParams, SharpnessReport};
use crate::glare::{GlareDetector, GlareParams, GlareReport};

/// Why a frame was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Blurry,
    Glare,
}

/// Combined tunables for both detectors.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GateParams {
    pub blur: BlurParams,
    pub glare: GlareParams,
}

/// Verdict for one captured frame.
///
/// `glare` is `None` when the blur check already rejected the frame: the
/// gate fails fast and never runs the second detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    pub accepted: bool,
    pub reason: Option<RejectReason>,
    pub sharpness: SharpnessReport,
    pub glare: Option<GlareReport>,
}

/// Pre-OCR screening orchestrator.
///
/// Runs the blur check before the glare check. Blur is the more common
/// capture failure, so it goes first; both checks are O(pixels) and the
/// order has no asymptotic effect. The gate never retains or mutates the
/// frame, and is pure apart from the glare detector's RNG consumption.
#[derive(Clone, Debug, Default)]
pub struct QualityGate {
    blur: BlurDetector,
    glare: GlareDetector,
}

impl QualityGate {
    pub fn new(params: GateParams) -> Self {
        Self {
            blur: BlurDetector::new(params.blur),
            glare: GlareDetector::new(params.glare),
        }
    }

    /// Evaluate a frame with a caller-supplied random source.
    pub fn evaluate<R: Rng + ?Sized>(&self, frame: &RgbaImageView<'_>, rng: &mut R) -> GateReport {
        let sharpness = self.blur.assess(frame);
        if sharpness.is_blurry {
            debug!("gate: rejected blurry frame (variance = {:.1})", sharpness.variance);
            return GateReport {
                accepted: false,
                reason: Some(RejectReason::Blurry),
                sharpness,
                glare: None,
            };
        }

        let glare = self.glare.assess(frame, rng);
        if glare.is_glare {
            debug!("gate: rejected glare frame (ratio = {:.2})", glare.ratio);
            return GateReport {
                accepted: false,
                reason: Some(RejectReason::Glare),
                sharpness,
                glare: Some(glare),
            };
        }

        GateReport {
            accepted: true,
            reason: None,
            sharpness,
            glare: Some(glare),
        }
    }

    /// Evaluate with the thread-local random source.
    pub fn evaluate_default(&self, frame: &RgbaImageView<'_>) -> GateReport {
        self.evaluate(frame, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checkerboard_rgba(width: usize, height: usize, lo: [u8; 3], hi: [u8; 3]) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let rgb = if (x + y) % 2 == 0 { hi } else { lo };
                data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        data
    }

    fn flat_rgba(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        data
    }

    #[test]
    fn blurry_frame_rejects_before_glare_runs() {
        let data = flat_rgba(64, 64, [200, 200, 200]);
        let view = RgbaImageView {
            width: 64,
            height: 64,
            data: &data,
        };
        let report = QualityGate::default().evaluate(&view, &mut StdRng::seed_from_u64(3));
        assert!(!report.accepted);
        assert_eq!(report.reason, Some(RejectReason::Blurry));
        assert!(report.glare.is_none());
    }

    #[test]
    fn sharp_glary_frame_rejects_for_glare() {
        // sharp (strong edges) but every pixel bright and colorless
        let data = checkerboard_rgba(64, 64, [235, 235, 235], [255, 255, 255]);
        let view = RgbaImageView {
            width: 64,
            height: 64,
            data: &data,
        };
        let report = QualityGate::default().evaluate(&view, &mut StdRng::seed_from_u64(3));
        assert!(!report.accepted);
        assert_eq!(report.reason, Some(RejectReason::Glare));
        assert!(!report.sharpness.is_blurry);
    }

    #[test]
    fn sharp_clean_frame_is_accepted() {
        let data = checkerboard_rgba(64, 64, [0, 0, 0], [200, 200, 200]);
        let view = RgbaImageView {
            width: 64,
            height: 64,
            data: &data,
        };
        let report = QualityGate::default().evaluate(&view, &mut StdRng::seed_from_u64(3));
        assert!(report.accepted);
        assert_eq!(report.reason, None);
        assert!(report.glare.is_some());
    }

    #[test]
    fn repeated_evaluation_gives_the_same_blur_verdict() {
        let data = checkerboard_rgba(48, 48, [0, 0, 0], [200, 200, 200]);
        let view = RgbaImageView {
            width: 48,
            height: 48,
            data: &data,
        };
        let gate = QualityGate::default();
        let a = gate.evaluate(&view, &mut StdRng::seed_from_u64(11));
        let b = gate.evaluate(&view, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
