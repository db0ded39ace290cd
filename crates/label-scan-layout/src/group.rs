use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Lower bound on the same-line tolerance, in pixels.
pub const MIN_Y_THRESHOLD_PX: f32 = 4.0;

/// Same-line tolerance as a fraction of the median token height.
pub const Y_THRESHOLD_HEIGHT_RATIO: f32 = 0.6;

/// Tunables for vertical line grouping. Heuristics calibrated on packaging
/// labels; recalibrate rather than hard-coding new values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LineGroupingParams {
    pub min_y_threshold: f32,
    pub height_ratio: f32,
}

impl Default for LineGroupingParams {
    fn default() -> Self {
        Self {
            min_y_threshold: MIN_Y_THRESHOLD_PX,
            height_ratio: Y_THRESHOLD_HEIGHT_RATIO,
        }
    }
}

/// Stage B: group tokens into visual rows, then order each row left to
/// right (stage C ordering happens here so a line is ready to join).
///
/// Tokens are walked in descending vertical-center order (top of image
/// first; ties keep detection order via the stable sort). A token joins the
/// current line iff its vertical center is within the threshold of the
/// line's *anchor*, the first token assigned to that line. Comparing
/// against the anchor instead of a running centroid prevents a long line
/// from drifting and absorbing tokens far from the true baseline.
///
/// The threshold is `max(min_y_threshold, median_height * height_ratio)`,
/// with the median taken at the lower-middle index of the ascending height
/// sort when the count is even.
pub fn group_into_lines(tokens: Vec<Token>, params: &LineGroupingParams) -> Vec<Vec<Token>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut sorted = tokens;
    sorted.sort_by(|a, b| b.center().y.total_cmp(&a.center().y));

    let mut heights: Vec<f32> = sorted.iter().map(Token::height).collect();
    heights.sort_by(f32::total_cmp);
    let median_height = heights[(heights.len() - 1) / 2];
    let y_threshold = (median_height * params.height_ratio).max(params.min_y_threshold);

    let mut lines: Vec<Vec<Token>> = Vec::new();
    for token in sorted {
        let joins_current = lines
            .last()
            .and_then(|line| line.first())
            .is_some_and(|anchor| (anchor.center().y - token.center().y).abs() <= y_threshold);
        if joins_current {
            if let Some(line) = lines.last_mut() {
                line.push(token);
            }
        } else {
            lines.push(vec![token]);
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.min_x().total_cmp(&b.min_x()));
    }

    lines
}

/// Join each line's token texts with single spaces, in formation order
/// (top of image first).
pub fn join_lines(lines: &[Vec<Token>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
