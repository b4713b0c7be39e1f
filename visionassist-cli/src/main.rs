use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use visionassist::{DetectConfig, Detection, DetectionSession, FrameReport, LabelTable};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replays recorded detector outputs through a visionassist session"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for per-frame stage events.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    input_size: usize,
    parallel: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            input_size: cfg.input_size,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectConfigJson> for DetectConfig {
    fn from(value: DetectConfigJson) -> Self {
        Self {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            input_size: value.input_size,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    labels_path: String,
    frames_path: String,
    output_path: Option<String>,
    frame_width: u32,
    frame_height: u32,
    detect: DetectConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels_path: String::new(),
            frames_path: String::new(),
            output_path: None,
            frame_width: 640,
            frame_height: 480,
            detect: DetectConfigJson::default(),
        }
    }
}

/// One recorded inference result.
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    name: Option<String>,
    shape: Vec<usize>,
    data: Vec<f32>,
    #[serde(default)]
    frame_width: Option<u32>,
    #[serde(default)]
    frame_height: Option<u32>,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: String,
    class_id: usize,
    score: f32,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            label: value.label,
            class_id: value.class_id,
            score: value.score,
            left: value.bbox.left,
            top: value.bbox.top,
            right: value.bbox.right,
            bottom: value.bbox.bottom,
        }
    }
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    index: usize,
    name: Option<String>,
    status: String,
    failed: bool,
    announce: Option<String>,
    detections: Vec<DetectionRecord>,
}

impl FrameRecord {
    fn new(index: usize, name: Option<String>, report: FrameReport) -> Self {
        Self {
            index,
            name,
            status: report.status.message(),
            failed: report.status.is_failure(),
            announce: report.decision.text().map(str::to_owned),
            detections: report
                .detections
                .into_iter()
                .map(DetectionRecord::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    frames: Vec<FrameRecord>,
    announcements: usize,
    failures: usize,
    last_summary: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("visionassist=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.labels_path.is_empty() || config.frames_path.is_empty() {
        return Err("labels_path and frames_path must be set in the config".into());
    }
    if config.frame_width == 0 || config.frame_height == 0 {
        return Err("frame_width and frame_height must be at least 1".into());
    }

    let labels = LabelTable::load(&config.labels_path)?;
    let frames_text = fs::read_to_string(&config.frames_path)?;
    let frames: Vec<RecordedFrame> = serde_json::from_str(&frames_text)?;
    tracing::info!(frames = frames.len(), labels = labels.len(), "replay_start");

    let mut session = DetectionSession::new(config.detect.into(), labels)?;
    let mut records = Vec::with_capacity(frames.len());
    for (index, frame) in frames.into_iter().enumerate() {
        let report = session.process_frame(
            &frame.data,
            &frame.shape,
            frame.frame_width.unwrap_or(config.frame_width),
            frame.frame_height.unwrap_or(config.frame_height),
        );
        records.push(FrameRecord::new(index, frame.name, report));
    }

    let output = Output {
        announcements: records.iter().filter(|r| r.announce.is_some()).count(),
        failures: records.iter().filter(|r| r.failed).count(),
        last_summary: session.last_summary().to_owned(),
        frames: records,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
