//! Inference provider seam.
//!
//! The detection network itself is external; this crate only needs a
//! synchronous tensor-in/tensor-out call. Backends (TFLite, ONNX Runtime, a
//! replay of recorded outputs) implement [`InferenceModel`].

use crate::tensor::RawOutput;
use crate::util::DetectResult;

/// One inference result: a flat buffer and the model's declared output shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelOutput {
    /// Row-major output values.
    pub data: Vec<f32>,
    /// Declared shape, typically `[1, num_candidates, 5 + num_classes]`.
    pub shape: Vec<usize>,
}

impl ModelOutput {
    /// Creates an output from its parts.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Self {
        Self { data, shape }
    }

    /// Borrows the output as a row view, validating the shape.
    pub fn view(&self) -> DetectResult<RawOutput<'_>> {
        RawOutput::from_shape(&self.data, &self.shape)
    }
}

/// A detection network callable once per frame.
pub trait InferenceModel {
    /// Runs the network on an NHWC `[1, input_size, input_size, 3]` tensor.
    fn infer(&mut self, input: &[f32], input_size: usize) -> DetectResult<ModelOutput>;
}

impl<M: InferenceModel + ?Sized> InferenceModel for &mut M {
    fn infer(&mut self, input: &[f32], input_size: usize) -> DetectResult<ModelOutput> {
        (**self).infer(input, input_size)
    }
}

impl<M: InferenceModel + ?Sized> InferenceModel for Box<M> {
    fn infer(&mut self, input: &[f32], input_size: usize) -> DetectResult<ModelOutput> {
        (**self).infer(input, input_size)
    }
}
