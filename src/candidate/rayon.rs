//! Rayon-parallel candidate filtering (feature-gated).
//!
//! YOLOv5 heads emit thousands of rows per frame and each row is scored
//! independently, so the filter splits rows across the pool. Rayon's ordered
//! collect keeps survivors in buffer order, matching the sequential path.

use crate::candidate::{filter_row, Candidate};
use crate::tensor::RawOutput;
use rayon::prelude::*;

/// Row-parallel equivalent of [`filter_candidates`](crate::candidate::filter_candidates).
pub fn filter_candidates_par(raw: RawOutput<'_>, threshold: f32) -> Vec<Candidate> {
    (0..raw.num_candidates())
        .into_par_iter()
        .filter_map(|idx| raw.row(idx).and_then(|row| filter_row(row, threshold)))
        .collect()
}
