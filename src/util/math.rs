//! Numeric helpers shared by the decoding stages.

/// Returns the index and value of the largest element.
///
/// Ties resolve to the lowest index. NaN entries never win a comparison, so a
/// slice of only NaN yields index 0 with a NaN value. Empty slices yield `None`.
pub(crate) fn argmax_first(values: &[f32]) -> Option<(usize, f32)> {
    let (&first, rest) = values.split_first()?;
    let mut best_idx = 0usize;
    let mut best = first;
    for (offset, &value) in rest.iter().enumerate() {
        if value > best || (best.is_nan() && !value.is_nan()) {
            best = value;
            best_idx = offset + 1;
        }
    }
    Some((best_idx, best))
}

/// Clamps a coordinate into `[0, max]`.
pub(crate) fn clamp_coord(value: f32, max: f32) -> f32 {
    value.max(0.0).min(max)
}
