use visionassist::lowlevel::{decode_detections, filter_candidates, Candidate};
use visionassist::{DetectError, LabelTable, PixelRect, RawOutput, UNKNOWN_LABEL};

fn cat_dog() -> LabelTable {
    ["cat", "dog"].into_iter().collect()
}

fn candidate(cx: f32, cy: f32, w: f32, h: f32, class_id: usize) -> Candidate {
    Candidate {
        center_x: cx,
        center_y: cy,
        width: w,
        height: h,
        class_id,
        score: 0.8,
    }
}

#[test]
fn centered_cat_on_vga_frame() {
    let data = [
        0.5f32, 0.5, 0.2, 0.2, 0.9, 0.9, 0.1, //
        0.3, 0.3, 0.1, 0.1, 0.2, 0.1, 0.9,
    ];
    let raw = RawOutput::from_shape(&data, &[1, 2, 7]).unwrap();
    let candidates = filter_candidates(raw, 0.5);
    let detections = decode_detections(&candidates, &cat_dog(), 640, 480).unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label, "cat");
    assert_eq!(detections[0].class_id, 0);
    assert_eq!(detections[0].bbox, PixelRect::new(256, 192, 384, 288));
}

#[test]
fn taller_box_spans_168_to_312() {
    let detections =
        decode_detections(&[candidate(0.5, 0.5, 0.2, 0.3, 0)], &cat_dog(), 640, 480).unwrap();
    assert_eq!(detections[0].bbox, PixelRect::new(256, 168, 384, 312));
}

#[test]
fn out_of_range_class_gets_unknown_label() {
    let detections =
        decode_detections(&[candidate(0.5, 0.5, 0.2, 0.2, 7)], &cat_dog(), 100, 100).unwrap();
    assert_eq!(detections[0].label, UNKNOWN_LABEL);
    assert_eq!(detections[0].class_id, 7);
}

#[test]
fn boxes_are_clamped_and_ordered() {
    let candidates = [
        candidate(0.95, 0.05, 0.3, 0.3, 1),
        candidate(0.5, 0.5, 4.0, 4.0, 0),
    ];
    let detections = decode_detections(&candidates, &cat_dog(), 200, 100).unwrap();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].bbox, PixelRect::new(160, 0, 200, 20));
    assert_eq!(detections[1].bbox, PixelRect::new(0, 0, 200, 100));
    for det in &detections {
        assert!(det.bbox.left <= det.bbox.right && det.bbox.top <= det.bbox.bottom);
        assert!(det.bbox.right <= 200 && det.bbox.bottom <= 100);
    }
}

#[test]
fn degenerate_boxes_are_dropped_silently() {
    let candidates = [
        candidate(-0.5, 0.5, 0.2, 0.2, 0),
        candidate(0.5, 0.5, 0.0, 0.5, 0),
        candidate(0.5, 0.5, 0.2, 0.2, 1),
    ];
    let detections = decode_detections(&candidates, &cat_dog(), 100, 100).unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label, "dog");
}

#[test]
fn zero_sized_frames_are_rejected() {
    let err = decode_detections(&[candidate(0.5, 0.5, 0.2, 0.2, 0)], &cat_dog(), 0, 480)
        .unwrap_err();
    assert_eq!(
        err,
        DetectError::InvalidDimensions {
            width: 0,
            height: 480
        }
    );
}
