//! Normalized center/size encoding to clamped pixel rectangles.

use crate::candidate::Candidate;
use crate::detection::{Detection, PixelRect};
use crate::labels::LabelTable;
use crate::util::math::clamp_coord;
use crate::util::{DetectError, DetectResult};

/// Maps a candidate's normalized box onto a `frame_width x frame_height` frame.
///
/// Edges are clamped to the frame and truncated to whole pixels. Returns
/// `None` for non-finite geometry and for boxes that end up with no area,
/// which is what fully off-frame predictions collapse to.
pub fn decode_box(candidate: &Candidate, frame_width: u32, frame_height: u32) -> Option<PixelRect> {
    let w_px = frame_width as f32;
    let h_px = frame_height as f32;

    let cx = candidate.center_x * w_px;
    let cy = candidate.center_y * h_px;
    let half_w = candidate.width * w_px / 2.0;
    let half_h = candidate.height * h_px / 2.0;
    if !(cx.is_finite() && cy.is_finite() && half_w.is_finite() && half_h.is_finite()) {
        return None;
    }

    let rect = PixelRect {
        left: clamp_coord(cx - half_w, w_px) as i32,
        top: clamp_coord(cy - half_h, h_px) as i32,
        right: clamp_coord(cx + half_w, w_px) as i32,
        bottom: clamp_coord(cy + half_h, h_px) as i32,
    };
    if rect.is_degenerate() {
        return None;
    }
    Some(rect)
}

/// Decodes candidates into labeled detections, dropping degenerate boxes.
///
/// Input order is preserved among the boxes that survive.
pub fn decode_detections(
    candidates: &[Candidate],
    labels: &LabelTable,
    frame_width: u32,
    frame_height: u32,
) -> DetectResult<Vec<Detection>> {
    if frame_width == 0 || frame_height == 0 {
        return Err(DetectError::InvalidDimensions {
            width: frame_width as usize,
            height: frame_height as usize,
        });
    }

    Ok(candidates
        .iter()
        .filter_map(|candidate| {
            let bbox = decode_box(candidate, frame_width, frame_height)?;
            Some(Detection {
                bbox,
                class_id: candidate.class_id,
                label: labels.resolve(candidate.class_id).to_owned(),
                score: candidate.score,
            })
        })
        .collect())
}
