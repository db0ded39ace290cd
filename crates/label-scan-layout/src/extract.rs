use log::warn;

use crate::observation::Observation;
use crate::token::Token;

/// Stage A: split detections into word-level tokens with pixel-space boxes.
///
/// Words are located in the detection text left to right with a cursor, so
/// repeated words map to distinct ranges. Behavior on degraded input:
/// - a detection whose text splits into zero words still emits exactly one
///   token with empty text and the full detection box, preserving layout
///   density for non-text noise detections;
/// - an engine without per-range geometry yields one token per detection
///   (whitespace-normalized full text, full box);
/// - a single word the engine cannot box is dropped; the rest of the
///   detection survives.
pub fn extract_tokens<O: Observation>(
    observations: &[O],
    image_width: f32,
    image_height: f32,
) -> Vec<Token> {
    let mut tokens = Vec::new();

    for obs in observations {
        let text = obs.text();
        let words: Vec<&str> = text.split_whitespace().collect();

        if words.is_empty() {
            tokens.push(Token::new(
                String::new(),
                obs.bounding_box().to_pixels(image_width, image_height),
            ));
            continue;
        }

        if !obs.has_range_geometry() {
            tokens.push(Token::new(
                words.join(" "),
                obs.bounding_box().to_pixels(image_width, image_height),
            ));
            continue;
        }

        let mut cursor = 0usize;
        for word in words {
            let Some(offset) = text[cursor..].find(word) else {
                // unreachable for words produced by split_whitespace
                continue;
            };
            let start = cursor + offset;
            let end = start + word.len();

            match obs.range_box(start..end) {
                Some(bbox) => {
                    tokens.push(Token::new(word, bbox.to_pixels(image_width, image_height)));
                }
                None => {
                    warn!("no geometry for {word:?} at {start}..{end}, dropping word");
                }
            }
            cursor = end;
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::SimpleObservation;
    use approx::assert_abs_diff_eq;
    use label_scan_core::NormalizedRect;

    #[test]
    fn tokens_scale_into_pixel_space() {
        let obs = SimpleObservation::new("Energi", NormalizedRect::new(0.0, 0.0, 1.0, 1.0))
            .with_range_box(0, 6, NormalizedRect::new(0.25, 0.5, 0.5, 0.1));
        let tokens = extract_tokens(&[obs], 400.0, 200.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Energi");
        assert_abs_diff_eq!(tokens[0].rect.x, 100.0);
        assert_abs_diff_eq!(tokens[0].rect.y, 100.0);
        assert_abs_diff_eq!(tokens[0].rect.width, 200.0);
        assert_abs_diff_eq!(tokens[0].rect.height, 20.0);
    }

    #[test]
    fn whitespace_only_detection_emits_one_empty_token() {
        let bbox = NormalizedRect::new(0.1, 0.2, 0.3, 0.05);
        let obs = SimpleObservation::new("   ", bbox);
        let tokens = extract_tokens(&[obs], 1000.0, 1000.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].rect, bbox.to_pixels(1000.0, 1000.0));
    }

    #[test]
    fn word_without_geometry_is_dropped_not_fatal() {
        let obs =
            SimpleObservation::new("Energi 100kcal", NormalizedRect::new(0.0, 0.8, 0.6, 0.05))
                .with_range_box(0, 6, NormalizedRect::new(0.0, 0.8, 0.25, 0.05));
        let tokens = extract_tokens(&[obs], 800.0, 600.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Energi");
    }

    #[test]
    fn engine_without_range_geometry_degrades_to_detection_tokens() {
        let bbox = NormalizedRect::new(0.1, 0.5, 0.8, 0.06);
        let obs = SimpleObservation::new("Karbohidrat  total 10g", bbox);
        let tokens = extract_tokens(&[obs], 500.0, 500.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Karbohidrat total 10g");
        assert_eq!(tokens[0].rect, bbox.to_pixels(500.0, 500.0));
    }

    #[test]
    fn repeated_words_map_to_distinct_ranges() {
        let obs = SimpleObservation::new("5g 5g", NormalizedRect::new(0.0, 0.5, 0.4, 0.05))
            .with_range_box(0, 2, NormalizedRect::new(0.0, 0.5, 0.15, 0.05))
            .with_range_box(3, 5, NormalizedRect::new(0.2, 0.5, 0.15, 0.05));
        let tokens = extract_tokens(&[obs], 100.0, 100.0);
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].min_x() < tokens[1].min_x());
    }
}
