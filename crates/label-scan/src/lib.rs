//! High-level facade crate for the `label-scan-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - (feature-gated) end-to-end helpers that gate a captured frame and run
//!   reading-order line reconstruction over an external OCR engine's
//!   detections.
//!
//! ## Quickstart
//!
//! ```no_run
//! use image::ImageReader;
//! use label_scan::quality::GateParams;
//! use label_scan::scan;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("label.jpg")?.decode()?.to_rgba8();
//! let report = scan::evaluate_quality(&img, &GateParams::default());
//! println!("accepted: {}", report.accepted);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `label_scan::core`: pixel views, geometry, logging.
//! - `label_scan::quality`: blur/glare detectors and the quality gate.
//! - `label_scan::layout`: token extraction and line reconstruction.
//! - `label_scan::scan` (feature `image`): end-to-end helpers from
//!   `image::RgbaImage`, the `OcrEngine` trait seam, and the full capture
//!   pipeline.

pub use label_scan_core as core;
pub use label_scan_layout as layout;
pub use label_scan_quality as quality;

pub use label_scan_layout::{
    reconstruct_lines, LineGroupingParams, Observation, SimpleObservation,
};
pub use label_scan_quality::{GateParams, GateReport, QualityGate, RejectReason};

#[cfg(feature = "image")]
pub mod scan;
