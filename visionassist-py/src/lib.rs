//! Python bindings for the visionassist detection decoder.
//!
//! Exposes the per-frame session, its configuration and the stateless NMS
//! helpers. Inference stays on the Python side: pass raw model output arrays
//! to `DetectionSession.process_frame`, or a callable to `process_image`.

use numpy::{
    PyArray1, PyArrayMethods, PyReadonlyArray3, PyReadonlyArrayDyn, PyUntypedArrayMethods,
};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use visionassist::{
    iou as rust_iou, lowlevel, DetectConfig as RustDetectConfig, DetectError, DetectResult,
    Detection as RustDetection, DetectionSession as RustDetectionSession,
    FrameReport as RustFrameReport, FrameView, InferenceModel, LabelTable, ModelOutput,
    PixelRect,
};

/// Convert a DetectError to a Python exception.
fn to_py_err(err: DetectError) -> PyErr {
    if err.is_shape_error() {
        PyValueError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

/// A labeled box in frame pixel coordinates.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    #[pyo3(get)]
    pub left: i32,
    #[pyo3(get)]
    pub top: i32,
    #[pyo3(get)]
    pub right: i32,
    #[pyo3(get)]
    pub bottom: i32,
    #[pyo3(get)]
    pub class_id: usize,
    #[pyo3(get)]
    pub label: String,
    /// Objectness times class probability.
    #[pyo3(get)]
    pub score: f32,
}

#[pymethods]
impl Detection {
    #[new]
    #[pyo3(signature = (left, top, right, bottom, label, score, class_id = 0))]
    fn new(
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        label: String,
        score: f32,
        class_id: usize,
    ) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            class_id,
            label,
            score,
        }
    }

    /// Box as a `(left, top, right, bottom)` tuple.
    #[getter]
    fn bbox(&self) -> (i32, i32, i32, i32) {
        (self.left, self.top, self.right, self.bottom)
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(label='{}', score={:.3}, box=({}, {}, {}, {}))",
            self.label, self.score, self.left, self.top, self.right, self.bottom
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            left: d.bbox.left,
            top: d.bbox.top,
            right: d.bbox.right,
            bottom: d.bbox.bottom,
            class_id: d.class_id,
            label: d.label,
            score: d.score,
        }
    }
}

impl From<Detection> for RustDetection {
    fn from(d: Detection) -> Self {
        Self {
            bbox: PixelRect::new(d.left, d.top, d.right, d.bottom),
            class_id: d.class_id,
            label: d.label,
            score: d.score,
        }
    }
}

/// Thresholds and model input size.
#[pyclass]
#[derive(Clone)]
pub struct DetectConfig {
    inner: RustDetectConfig,
}

#[pymethods]
impl DetectConfig {
    /// Create a new DetectConfig.
    ///
    /// Args:
    ///     confidence_threshold: Minimum objectness and final score (default: 0.5)
    ///     iou_threshold: Same-label overlap above which NMS suppresses (default: 0.45)
    ///     input_size: Square model input side in pixels (default: 320)
    ///     parallel: Filter candidate rows on the rayon pool (default: False)
    #[new]
    #[pyo3(signature = (confidence_threshold = 0.5, iou_threshold = 0.45, input_size = 320, parallel = false))]
    fn new(
        confidence_threshold: f32,
        iou_threshold: f32,
        input_size: usize,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustDetectConfig {
            confidence_threshold,
            iou_threshold,
            input_size,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn confidence_threshold(&self) -> f32 {
        self.inner.confidence_threshold
    }

    #[getter]
    fn iou_threshold(&self) -> f32 {
        self.inner.iou_threshold
    }

    #[getter]
    fn input_size(&self) -> usize {
        self.inner.input_size
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectConfig(confidence_threshold={}, iou_threshold={}, input_size={}, parallel={})",
            self.inner.confidence_threshold,
            self.inner.iou_threshold,
            self.inner.input_size,
            self.inner.parallel
        )
    }
}

/// Result of processing one frame.
#[pyclass]
pub struct FrameReport {
    #[pyo3(get)]
    detections: Vec<Detection>,
    /// Text to speak, or None when nothing new was detected.
    #[pyo3(get)]
    announcement: Option<String>,
    /// Status line, e.g. "No objects detected.".
    #[pyo3(get)]
    status: String,
    #[pyo3(get)]
    failed: bool,
}

#[pymethods]
impl FrameReport {
    fn __repr__(&self) -> String {
        format!(
            "FrameReport(detections={}, announcement={:?}, status='{}')",
            self.detections.len(),
            self.announcement,
            self.status
        )
    }
}

impl From<RustFrameReport> for FrameReport {
    fn from(report: RustFrameReport) -> Self {
        Self {
            announcement: report.decision.text().map(str::to_owned),
            status: report.status.message(),
            failed: report.status.is_failure(),
            detections: report
                .detections
                .into_iter()
                .map(Detection::from)
                .collect(),
        }
    }
}

/// Adapts a Python callable `f(input) -> output` to the inference seam.
struct PyModel<'py> {
    callable: Bound<'py, PyAny>,
}

impl PyModel<'_> {
    fn call(&self, input: &[f32], input_size: usize) -> PyResult<ModelOutput> {
        let py = self.callable.py();
        let tensor = PyArray1::from_slice(py, input).reshape([1, input_size, input_size, 3])?;
        let result = self.callable.call1((tensor,))?;
        let output: PyReadonlyArrayDyn<'_, f32> = result.extract()?;
        let shape = output.shape().to_vec();
        let data = output.as_array().iter().copied().collect();
        Ok(ModelOutput::new(data, shape))
    }
}

impl InferenceModel for PyModel<'_> {
    fn infer(&mut self, input: &[f32], input_size: usize) -> DetectResult<ModelOutput> {
        self.call(input, input_size)
            .map_err(|err| DetectError::Inference {
                reason: err.to_string(),
            })
    }
}

/// Stateful decoder that remembers what it last announced.
#[pyclass]
pub struct DetectionSession {
    inner: RustDetectionSession,
}

#[pymethods]
impl DetectionSession {
    /// Create a session.
    ///
    /// Args:
    ///     labels: Class names in class-id order
    ///     config: DetectConfig (default: DetectConfig())
    #[new]
    #[pyo3(signature = (labels, config = None))]
    fn new(labels: Vec<String>, config: Option<DetectConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = RustDetectionSession::new(cfg, LabelTable::new(labels)).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Create a session from a labels.txt file.
    #[staticmethod]
    #[pyo3(signature = (path, config = None))]
    fn from_label_file(path: &str, config: Option<DetectConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let labels = LabelTable::load(path).map_err(to_py_err)?;
        let inner = RustDetectionSession::new(cfg, labels).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Decode one frame of raw model output.
    ///
    /// Args:
    ///     output: float32 array shaped (N, 5 + C) or (1, N, 5 + C)
    ///     frame_width: Camera frame width in pixels
    ///     frame_height: Camera frame height in pixels
    fn process_frame(
        &mut self,
        output: PyReadonlyArrayDyn<'_, f32>,
        frame_width: u32,
        frame_height: u32,
    ) -> PyResult<FrameReport> {
        let shape = output.shape().to_vec();
        let data = output.as_slice()?;
        Ok(self
            .inner
            .process_frame(data, &shape, frame_width, frame_height)
            .into())
    }

    /// Resize an RGB frame, run `model` on it and decode the result.
    ///
    /// Args:
    ///     model: Callable taking a float32 (1, S, S, 3) array and returning raw output
    ///     frame: uint8 array shaped (height, width, 3)
    fn process_image(
        &mut self,
        model: Bound<'_, PyAny>,
        frame: PyReadonlyArray3<'_, u8>,
    ) -> PyResult<FrameReport> {
        let shape = frame.shape();
        if shape[2] != 3 {
            return Err(PyValueError::new_err("frame must have 3 channels (RGB)"));
        }
        let (height, width) = (shape[0], shape[1]);
        let view = FrameView::from_slice(frame.as_slice()?, width, height).map_err(to_py_err)?;
        let mut model = PyModel { callable: model };
        Ok(self.inner.process_image(&mut model, view).into())
    }

    /// Skip frames until resume() is called.
    fn pause(&self) {
        self.inner.pause_handle().pause();
    }

    fn resume(&self) {
        self.inner.pause_handle().resume();
    }

    #[getter]
    fn paused(&self) -> bool {
        self.inner.is_paused()
    }

    /// Forget the last announcement.
    fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    fn last_summary(&self) -> String {
        self.inner.last_summary().to_owned()
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectionSession(labels={}, last_summary='{}')",
            self.inner.labels().len(),
            self.inner.last_summary()
        )
    }
}

/// Label-aware non-maximum suppression over detections.
///
/// Larger boxes are kept first; a box is dropped when it overlaps a kept box
/// of the same label by more than `iou_threshold`.
#[pyfunction]
#[pyo3(signature = (detections, iou_threshold = 0.45))]
fn nms(detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    let detections = detections.into_iter().map(RustDetection::from).collect();
    lowlevel::nms(detections, iou_threshold)
        .into_iter()
        .map(Detection::from)
        .collect()
}

/// Intersection over union of two `(left, top, right, bottom)` boxes.
#[pyfunction]
fn iou(a: (i32, i32, i32, i32), b: (i32, i32, i32, i32)) -> f32 {
    rust_iou(
        &PixelRect::new(a.0, a.1, a.2, a.3),
        &PixelRect::new(b.0, b.1, b.2, b.3),
    )
}

/// Python module for visionassist detection decoding.
#[pymodule]
fn _visionassist(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<DetectConfig>()?;
    m.add_class::<FrameReport>()?;
    m.add_class::<DetectionSession>()?;
    m.add_function(wrap_pyfunction!(nms, m)?)?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    Ok(())
}
