use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use visionassist::lowlevel::nms;
use visionassist::{iou, Detection, PixelRect};

fn det(label: &str, left: i32, top: i32, right: i32, bottom: i32) -> Detection {
    Detection {
        bbox: PixelRect::new(left, top, right, bottom),
        class_id: 0,
        label: label.to_owned(),
        score: 0.7,
    }
}

fn random_rect(rng: &mut StdRng) -> PixelRect {
    let left = rng.random_range(0..200);
    let top = rng.random_range(0..200);
    let right = left + rng.random_range(0..80);
    let bottom = top + rng.random_range(0..80);
    PixelRect::new(left, top, right, bottom)
}

fn random_detections(rng: &mut StdRng, count: usize) -> Vec<Detection> {
    const LABELS: [&str; 3] = ["person", "chair", "cup"];
    (0..count)
        .map(|_| {
            let label = LABELS[rng.random_range(0..LABELS.len())];
            let r = random_rect(rng);
            det(label, r.left, r.top, r.right, r.bottom)
        })
        .collect()
}

#[test]
fn iou_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..2000 {
        let a = random_rect(&mut rng);
        let b = random_rect(&mut rng);
        assert_eq!(iou(&a, &b), iou(&b, &a), "{a:?} vs {b:?}");
    }
}

#[test]
fn iou_with_self_is_one_for_non_degenerate_boxes() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..2000 {
        let r = random_rect(&mut rng);
        if r.is_degenerate() {
            assert_eq!(iou(&r, &r), 0.0);
        } else {
            assert_eq!(iou(&r, &r), 1.0);
        }
    }
}

#[test]
fn iou_stays_in_unit_range() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..2000 {
        let value = iou(&random_rect(&mut rng), &random_rect(&mut rng));
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn nms_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(41);
    for _ in 0..200 {
        let detections = random_detections(&mut rng, 40);
        let once = nms(detections, 0.45);
        let twice = nms(once.clone(), 0.45);
        assert_eq!(once, twice);
    }
}

#[test]
fn nms_survivors_never_overlap_within_a_label() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..100 {
        let kept = nms(random_detections(&mut rng, 60), 0.3);
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                if a.label == b.label {
                    assert!(iou(&a.bbox, &b.bbox) <= 0.3);
                }
            }
        }
        for pair in kept.windows(2) {
            assert!(pair[0].bbox.area() >= pair[1].bbox.area());
        }
    }
}

#[test]
fn different_labels_are_never_suppressed() {
    let cat = det("cat", 10, 10, 110, 110);
    let dog = det("dog", 10, 10, 110, 110);
    let kept = nms(vec![cat.clone(), dog.clone()], 0.0);
    assert_eq!(kept, vec![cat, dog]);
}

#[test]
fn near_identical_cats_keep_the_larger_box() {
    let smaller = det("cat", 0, 0, 100, 90);
    let larger = det("cat", 0, 0, 100, 100);
    assert!((iou(&smaller.bbox, &larger.bbox) - 0.9).abs() < 1e-6);

    let kept = nms(vec![smaller, larger.clone()], 0.45);
    assert_eq!(kept, vec![larger]);
}

#[test]
fn overlap_at_threshold_is_kept() {
    // IoU is exactly 0.5: 50 / (100 + 50 - 50) with a nested half box.
    let outer = det("cup", 0, 0, 10, 10);
    let inner = det("cup", 0, 0, 5, 10);
    let kept = nms(vec![inner, outer], 0.5);
    assert_eq!(kept.len(), 2);
}

#[test]
fn suppression_does_not_chain_through_removed_boxes() {
    // b is removed by a; c overlaps b heavily but a only slightly.
    let a = det("car", 0, 0, 100, 100);
    let b = det("car", 30, 0, 125, 100);
    let c = det("car", 60, 0, 150, 100);
    let kept = nms(vec![c.clone(), b, a.clone()], 0.45);
    assert_eq!(kept, vec![a, c]);
}
