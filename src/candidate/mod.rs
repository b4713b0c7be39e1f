//! Confidence filtering and best-class selection for raw rows.
//!
//! A row survives when `objectness * best_class_score >= threshold`. The best
//! class is the argmax over the class-score slice with ties going to the
//! lowest class id, so identical tensors always produce identical candidates.

use crate::tensor::{RawOutput, Row};
use crate::util::math::argmax_first;

#[cfg(feature = "rayon")]
pub mod rayon;

/// A row that passed the confidence threshold, still in normalized space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Normalized center x.
    pub center_x: f32,
    /// Normalized center y.
    pub center_y: f32,
    /// Normalized width.
    pub width: f32,
    /// Normalized height.
    pub height: f32,
    /// Index of the best-scoring class.
    pub class_id: usize,
    /// `objectness * class_score` for `class_id`.
    pub score: f32,
}

/// Scores a single row, returning a candidate if it clears `threshold`.
///
/// Rows without class scores are always rejected. Objectness below the
/// threshold rejects the row before the class scan, since a product with a
/// score in `[0, 1]` can only shrink.
pub fn filter_row(row: Row<'_>, threshold: f32) -> Option<Candidate> {
    let objectness = row.objectness();
    if !(objectness >= threshold) {
        return None;
    }
    let (class_id, class_score) = argmax_first(row.class_scores())?;
    let score = objectness * class_score;
    if !(score >= threshold) || !score.is_finite() {
        return None;
    }
    Some(Candidate {
        center_x: row.center_x(),
        center_y: row.center_y(),
        width: row.width(),
        height: row.height(),
        class_id,
        score,
    })
}

/// Filters every row of `raw`, preserving row order among survivors.
pub fn filter_candidates(raw: RawOutput<'_>, threshold: f32) -> Vec<Candidate> {
    raw.rows()
        .filter_map(|row| filter_row(row, threshold))
        .collect()
}
