//! Image-quality screening for captured label photos.
//!
//! Two detectors and an orchestrator:
//! - [`BlurDetector`]: Laplacian-variance sharpness test over a downscaled
//!   grayscale copy of the frame.
//! - [`GlareDetector`]: random-sample value/saturation test for blown
//!   highlights and specular reflections.
//! - [`QualityGate`]: runs blur then glare, failing fast on the first
//!   rejection, and reports a verdict with the measured metrics.
//!
//! All entry points are synchronous, allocation-light, pure computations
//! over borrowed pixel views; run them off the interactive thread.

mod blur;
mod gate;
mod glare;

pub use blur::{
    laplacian_variance, BlurDetector, BlurParams, SharpnessReport, DEFAULT_DOWNSCALE_WIDTH,
    DEFAULT_VARIANCE_THRESHOLD,
};
pub use gate::{GateParams, GateReport, QualityGate, RejectReason};
pub use glare::{
    GlareDetector, GlareParams, GlareReport, DEFAULT_GLARE_RATIO_THRESHOLD, DEFAULT_SAMPLE_COUNT,
    DEFAULT_SATURATION_CEILING, DEFAULT_VALUE_FLOOR,
};
