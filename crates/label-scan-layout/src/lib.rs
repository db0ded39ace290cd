//! Reading-order line reconstruction.
//!
//! Takes unordered, word-level OCR detections and regroups them into
//! top-to-bottom, left-to-right lines of text, suitable for single-column
//! packaging labels. Full document-layout analysis (columns, tables) is out
//! of scope.
//!
//! The pipeline has three stages:
//! 1. token extraction: one [`Token`] per word, boxed via the engine's
//!    per-range geometry ([`extract_tokens`]);
//! 2. anchor-relative vertical grouping ([`group_into_lines`]);
//! 3. left-to-right ordering and joining ([`join_lines`]).
//!
//! Reconstruction is deterministic: identical inputs produce byte-identical
//! output (stable sorts, total float ordering, no hash iteration).

mod extract;
mod group;
mod observation;
mod token;

pub use extract::extract_tokens;
pub use group::{
    group_into_lines, join_lines, LineGroupingParams, MIN_Y_THRESHOLD_PX,
    Y_THRESHOLD_HEIGHT_RATIO,
};
pub use observation::{Observation, RangeBox, SimpleObservation};
pub use token::Token;

/// Reconstruct reading-order lines from raw detections with default
/// grouping parameters.
///
/// `image_width`/`image_height` must be the pixel dimensions of the exact
/// buffer the detections were produced from.
pub fn reconstruct_lines<O: Observation>(
    observations: &[O],
    image_width: f32,
    image_height: f32,
) -> Vec<String> {
    reconstruct_lines_with(
        observations,
        image_width,
        image_height,
        &LineGroupingParams::default(),
    )
}

/// Reconstruct reading-order lines with explicit grouping parameters.
pub fn reconstruct_lines_with<O: Observation>(
    observations: &[O],
    image_width: f32,
    image_height: f32,
    params: &LineGroupingParams,
) -> Vec<String> {
    let tokens = extract_tokens(observations, image_width, image_height);
    let lines = group_into_lines(tokens, params);
    join_lines(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_scan_core::NormalizedRect;

    fn obs(text: &str, bbox: NormalizedRect) -> SimpleObservation {
        let mut o = SimpleObservation::new(text, bbox);
        // per-word boxes spread evenly across the detection box
        let words: Vec<&str> = text.split_whitespace().collect();
        let n = words.len().max(1) as f32;
        let mut cursor = 0;
        for (i, w) in words.iter().enumerate() {
            let start = cursor + text[cursor..].find(w).unwrap();
            let slice = NormalizedRect::new(
                bbox.x + bbox.width * i as f32 / n,
                bbox.y,
                bbox.width / n,
                bbox.height,
            );
            o = o.with_range_box(start, start + w.len(), slice);
            cursor = start + w.len();
        }
        o
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let observations = vec![
            obs("Energi total 100kcal", NormalizedRect::new(0.1, 0.8, 0.6, 0.05)),
            obs("Protein 5g", NormalizedRect::new(0.1, 0.6, 0.4, 0.05)),
            obs("Lemak 2g", NormalizedRect::new(0.1, 0.4, 0.4, 0.05)),
        ];
        let a = reconstruct_lines(&observations, 800.0, 600.0);
        let b = reconstruct_lines(&observations, 800.0, 600.0);
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec!["Energi total 100kcal", "Protein 5g", "Lemak 2g"]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let observations: Vec<SimpleObservation> = Vec::new();
        assert!(reconstruct_lines(&observations, 800.0, 600.0).is_empty());
    }

    #[test]
    fn single_detection_yields_single_line() {
        let observations = vec![obs("Serat", NormalizedRect::new(0.2, 0.5, 0.2, 0.05))];
        assert_eq!(reconstruct_lines(&observations, 800.0, 600.0), vec!["Serat"]);
    }
}
