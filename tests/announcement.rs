use visionassist::lowlevel::summarize;
use visionassist::{AnnouncementDecision, Detection, PixelRect, SpokenState, Summary};

fn det(label: &str) -> Detection {
    Detection {
        bbox: PixelRect::new(0, 0, 10, 10),
        class_id: 0,
        label: label.to_owned(),
        score: 0.9,
    }
}

#[test]
fn summary_counts_labels_in_first_appearance_order() {
    let detections = [det("person"), det("chair"), det("person"), det("cup"), det("chair")];
    assert_eq!(
        summarize(&detections),
        Summary::Text("2 person 2 chair 1 cup".to_owned())
    );
}

#[test]
fn single_detection_summary() {
    assert_eq!(summarize(&[det("cat")]), Summary::Text("1 cat".to_owned()));
}

#[test]
fn identical_summaries_announce_once() {
    let mut state = SpokenState::new();
    let summary = summarize(&[det("cat"), det("dog")]);

    assert_eq!(
        state.decide(&summary),
        AnnouncementDecision::Announce("1 cat 1 dog".to_owned())
    );
    for _ in 0..5 {
        assert_eq!(state.decide(&summary), AnnouncementDecision::Silent);
    }
    assert_eq!(state.last_summary(), "1 cat 1 dog");

    let changed = summarize(&[det("cat")]);
    assert_eq!(state.decide(&changed).text(), Some("1 cat"));
    assert_eq!(state.last_summary(), "1 cat");
}

#[test]
fn empty_frames_leave_state_untouched() {
    let mut state = SpokenState::new();
    state.decide(&summarize(&[det("cat")]));

    assert_eq!(state.decide(&Summary::Empty), AnnouncementDecision::Silent);
    assert_eq!(state.last_summary(), "1 cat");

    // The same scene reappearing after a gap is not repeated.
    assert_eq!(
        state.decide(&summarize(&[det("cat")])),
        AnnouncementDecision::Silent
    );
}

#[test]
fn clear_allows_repeating_the_last_summary() {
    let mut state = SpokenState::new();
    let summary = summarize(&[det("cup")]);
    assert!(state.decide(&summary).is_announce());
    state.clear();
    assert!(state.decide(&summary).is_announce());
}
