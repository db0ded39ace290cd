//! End-to-end helpers from `image` buffer types.
//!
//! Captured frame -> quality gate -> (external) OCR -> line reconstruction.
//! The OCR engine stays behind the [`OcrEngine`] trait; this module owns
//! only the glue around it.

use label_scan_core::{GrayImageView, RgbaImageView};
use label_scan_layout::{reconstruct_lines_with, LineGroupingParams, Observation};
use label_scan_quality::{GateParams, GateReport, QualityGate};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced when adapting raw pixel buffers.
#[derive(thiserror::Error, Debug)]
pub enum BufferError {
    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbaLen { expected: usize, got: usize },
}

/// Borrow an `image::RgbaImage` as the lightweight core view type.
pub fn rgba_view(img: &image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Borrow a raw row-major RGBA8 buffer, validating its shape.
pub fn rgba_view_from_raw(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<RgbaImageView<'_>, BufferError> {
    let expected = width * height * 4;
    if data.len() != expected {
        return Err(BufferError::InvalidRgbaLen {
            expected,
            got: data.len(),
        });
    }
    Ok(RgbaImageView {
        width,
        height,
        data,
    })
}

/// OCR recognition effort requested from the engine. Forwarded opaquely;
/// engines without the distinction may ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionLevel {
    Fast,
    #[default]
    Accurate,
}

/// Tunables for the full capture pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    pub gate: GateParams,
    pub grouping: LineGroupingParams,
    /// Domain vocabulary hints forwarded to the engine's recognizer.
    pub vocabulary: Vec<String>,
    /// Language tags the engine should recognize, best first.
    pub languages: Vec<String>,
    /// Whether the engine should apply language-model correction to its
    /// candidates.
    pub language_correction: bool,
    pub recognition_level: RecognitionLevel,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            gate: GateParams::default(),
            grouping: LineGroupingParams::default(),
            vocabulary: Vec::new(),
            languages: Vec::new(),
            language_correction: true,
            recognition_level: RecognitionLevel::default(),
        }
    }
}

impl ScanParams {
    /// Defaults tuned for nutrition-label packaging.
    pub fn nutrition_defaults() -> Self {
        Self {
            vocabulary: [
                "protein",
                "serat",
                "lemak",
                "karbohidrat",
                "kalori",
                "vitamin",
                "mineral",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            languages: vec!["id-ID".to_string(), "en-US".to_string()],
            ..Self::default()
        }
    }
}

/// One recognition call handed to the engine: the accepted frame plus hints.
/// All hints are forwarded opaquely; engines ignore what they don't support.
#[derive(Clone, Copy, Debug)]
pub struct RecognitionRequest<'a> {
    pub frame: RgbaImageView<'a>,
    pub vocabulary: &'a [String],
    pub languages: &'a [String],
    pub language_correction: bool,
    pub level: RecognitionLevel,
}

/// External OCR collaborator.
///
/// Implementations supply top-candidate text and normalized geometry per
/// detected region; per-range geometry is advertised through the
/// [`Observation`] contract.
pub trait OcrEngine {
    type Observation: Observation;
    type Error;

    fn recognize(
        &self,
        request: &RecognitionRequest<'_>,
    ) -> Result<Vec<Self::Observation>, Self::Error>;
}

/// Result of a full scan pass.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    /// The gate rejected the frame; the caller should ask for a retake.
    Rejected(GateReport),
    /// Reading-order lines, top of image first.
    Lines(Vec<String>),
}

impl ScanOutcome {
    /// Lines joined with newlines, when the frame was accepted.
    pub fn joined_text(&self) -> Option<String> {
        match self {
            ScanOutcome::Lines(lines) => Some(lines.join("\n")),
            ScanOutcome::Rejected(_) => None,
        }
    }
}

/// Run the quality gate over a decoded frame with the thread-local RNG.
pub fn evaluate_quality(img: &image::RgbaImage, params: &GateParams) -> GateReport {
    QualityGate::new(*params).evaluate_default(&rgba_view(img))
}

/// Run the quality gate with a caller-supplied random source.
pub fn evaluate_quality_with_rng<R: Rng + ?Sized>(
    img: &image::RgbaImage,
    params: &GateParams,
    rng: &mut R,
) -> GateReport {
    QualityGate::new(*params).evaluate(&rgba_view(img), rng)
}

/// Full capture pipeline: gate the frame, and only on acceptance invoke the
/// engine and reconstruct lines.
///
/// Gate rejection is an outcome, not an error; only the engine's own
/// recognition failure propagates.
pub fn scan_frame<E: OcrEngine>(
    engine: &E,
    img: &image::RgbaImage,
    params: &ScanParams,
) -> Result<ScanOutcome, E::Error> {
    scan_frame_with_rng(engine, img, params, &mut rand::thread_rng())
}

/// [`scan_frame`] with a caller-supplied random source for the glare
/// detector, for reproducible runs.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(engine, img, params, rng),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn scan_frame_with_rng<E: OcrEngine, R: Rng + ?Sized>(
    engine: &E,
    img: &image::RgbaImage,
    params: &ScanParams,
    rng: &mut R,
) -> Result<ScanOutcome, E::Error> {
    let view = rgba_view(img);
    let report = QualityGate::new(params.gate).evaluate(&view, rng);
    if !report.accepted {
        return Ok(ScanOutcome::Rejected(report));
    }

    let request = RecognitionRequest {
        frame: view,
        vocabulary: &params.vocabulary,
        languages: &params.languages,
        language_correction: params.language_correction,
        level: params.recognition_level,
    };
    let observations = engine.recognize(&request)?;

    let lines = reconstruct_lines_with(
        &observations,
        img.width() as f32,
        img.height() as f32,
        &params.grouping,
    );
    Ok(ScanOutcome::Lines(lines))
}
