//! Core types and utilities for label-photo pre-processing.
//!
//! This crate is intentionally small. It does *not* depend on any concrete
//! OCR engine or image-decoding crate: callers hand in already-decoded,
//! upright pixel buffers through the borrowed view types.

mod geometry;
mod image;
mod logger;

pub use geometry::{NormalizedRect, PixelRect};
pub use image::{
    bilinear_sample, bilinear_sample_u8, downscale_to_width, to_luma, GrayImage, GrayImageView,
    RgbaImageView,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
