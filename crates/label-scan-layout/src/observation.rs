use std::ops::Range;

use label_scan_core::NormalizedRect;
use serde::{Deserialize, Serialize};

/// One OCR-engine detection: ranked candidate readings plus geometry.
///
/// Per-range geometry is an explicit, *optional* engine capability: some
/// engines only box whole detections. [`Observation::has_range_geometry`]
/// advertises it; when absent, reconstruction degrades to per-detection
/// granularity instead of per-word.
pub trait Observation {
    /// Highest-confidence reading.
    fn text(&self) -> &str;

    /// Normalized bounding box of the whole detection (bottom-left origin).
    fn bounding_box(&self) -> NormalizedRect;

    /// Whether the engine can box arbitrary sub-ranges of `text()`.
    fn has_range_geometry(&self) -> bool {
        true
    }

    /// Box for a byte range of `text()`. Returning `None` for a word drops
    /// that word from layout reconstruction; the rest of the line survives.
    fn range_box(&self, range: Range<usize>) -> Option<NormalizedRect>;
}

/// Box for one byte range of a detection's top candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeBox {
    pub start: usize,
    pub end: usize,
    pub bbox: NormalizedRect,
}

/// Observation with pre-computed range geometry.
///
/// Suits engines that report word boxes up front, JSON detection dumps, and
/// test fixtures. An empty `range_boxes` list means the producing engine
/// exposed no per-range geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimpleObservation {
    /// Candidate readings, best first.
    pub candidates: Vec<String>,
    pub bbox: NormalizedRect,
    #[serde(default)]
    pub range_boxes: Vec<RangeBox>,
}

impl SimpleObservation {
    pub fn new(text: impl Into<String>, bbox: NormalizedRect) -> Self {
        Self {
            candidates: vec![text.into()],
            bbox,
            range_boxes: Vec::new(),
        }
    }

    pub fn with_range_box(mut self, start: usize, end: usize, bbox: NormalizedRect) -> Self {
        self.range_boxes.push(RangeBox { start, end, bbox });
        self
    }
}

impl Observation for SimpleObservation {
    fn text(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or("")
    }

    fn bounding_box(&self) -> NormalizedRect {
        self.bbox
    }

    fn has_range_geometry(&self) -> bool {
        !self.range_boxes.is_empty()
    }

    fn range_box(&self, range: Range<usize>) -> Option<NormalizedRect> {
        self.range_boxes
            .iter()
            .find(|rb| rb.start == range.start && rb.end == range.end)
            .map(|rb| rb.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_candidate_wins() {
        let mut obs = SimpleObservation::new("Energi", NormalizedRect::new(0.0, 0.0, 1.0, 0.1));
        obs.candidates.push("Energl".to_string());
        assert_eq!(obs.text(), "Energi");
    }

    #[test]
    fn detection_dump_round_trips_through_json() {
        let obs = SimpleObservation::new("Protein 5g", NormalizedRect::new(0.1, 0.6, 0.4, 0.05))
            .with_range_box(0, 7, NormalizedRect::new(0.1, 0.6, 0.25, 0.05));
        let json = serde_json::to_string(&obs).unwrap();
        let back: SimpleObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text(), "Protein 5g");
        assert_eq!(back.range_boxes.len(), 1);
        assert_eq!(back.range_box(0..7), Some(obs.range_boxes[0].bbox));
        assert_eq!(back.range_box(8..10), None);
    }

    #[test]
    fn missing_range_geometry_is_advertised() {
        let obs = SimpleObservation::new("Lemak", NormalizedRect::new(0.0, 0.0, 0.5, 0.1));
        assert!(!obs.has_range_geometry());
    }
}
