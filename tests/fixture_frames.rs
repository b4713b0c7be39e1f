//! Replays a recorded frame sequence and checks each frame's outcome.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use visionassist::{DetectConfig, DetectionSession, LabelTable};

#[derive(Debug, Deserialize)]
struct Fixture {
    labels: Vec<String>,
    frame_width: u32,
    frame_height: u32,
    frames: Vec<FrameCase>,
}

#[derive(Debug, Deserialize)]
struct FrameCase {
    name: String,
    shape: Vec<usize>,
    data: Vec<f32>,
    expected: Vec<String>,
    announce: Option<String>,
    #[serde(default)]
    failure: bool,
}

fn load_fixture() -> Fixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/frames.json");
    let text = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn recorded_sequence_matches_expectations() {
    let fixture = load_fixture();
    let labels = LabelTable::new(fixture.labels);
    let mut session = DetectionSession::new(DetectConfig::default(), labels).unwrap();

    for case in &fixture.frames {
        let report = session.process_frame(
            &case.data,
            &case.shape,
            fixture.frame_width,
            fixture.frame_height,
        );
        let labels: Vec<&str> = report.detections.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, case.expected, "frame {}", case.name);
        assert_eq!(
            report.decision.text(),
            case.announce.as_deref(),
            "frame {}",
            case.name
        );
        assert_eq!(report.status.is_failure(), case.failure, "frame {}", case.name);
    }

    assert_eq!(session.last_summary(), "2 chair 1 car");
}
