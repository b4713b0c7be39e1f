//! Label-aware non-maximum suppression over pixel boxes.

use crate::detection::{iou, Detection};
use std::cmp::Ordering;

fn area_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    b.bbox.area().cmp(&a.bbox.area())
}

/// Sorts detections by descending box area; equal areas keep input order.
pub(crate) fn sort_by_area_desc(detections: &mut [Detection]) {
    detections.sort_by(area_cmp_desc);
}

/// Suppresses same-label duplicates whose IoU exceeds `iou_threshold`.
///
/// Detections are visited largest box first, so a big box absorbs the smaller
/// boxes nested inside it. A visited detection is kept unless an earlier kept
/// detection with the same label overlaps it by more than the threshold.
/// Boxes with different labels never suppress each other. The result is in
/// visit (area-descending) order.
pub fn nms(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    sort_by_area_desc(&mut detections);

    let mut active = vec![true; detections.len()];
    for i in 0..detections.len() {
        if !active[i] {
            continue;
        }
        let (head, tail) = detections.split_at(i + 1);
        let current = &head[i];
        for (offset, other) in tail.iter().enumerate() {
            let j = i + 1 + offset;
            if !active[j] || other.label != current.label {
                continue;
            }
            if iou(&current.bbox, &other.bbox) > iou_threshold {
                active[j] = false;
            }
        }
    }

    detections
        .into_iter()
        .zip(active)
        .filter_map(|(detection, keep)| keep.then_some(detection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::nms;
    use crate::detection::{Detection, PixelRect};

    fn det(label: &str, rect: PixelRect) -> Detection {
        Detection {
            bbox: rect,
            class_id: 0,
            label: label.to_owned(),
            score: 0.8,
        }
    }

    #[test]
    fn keeps_larger_box_of_overlapping_pair() {
        let small = det("cat", PixelRect::new(0, 0, 100, 90));
        let large = det("cat", PixelRect::new(0, 0, 100, 100));
        let kept = nms(vec![small, large.clone()], 0.45);
        assert_eq!(kept, vec![large]);
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let first = det("cup", PixelRect::new(0, 0, 10, 10));
        let second = det("cup", PixelRect::new(1, 0, 11, 10));
        let kept = nms(vec![first.clone(), second], 0.45);
        assert_eq!(kept, vec![first]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(nms(Vec::new(), 0.45).is_empty());
    }
}
