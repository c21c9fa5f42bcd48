use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::DetectorError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Runs the classification network on a preprocessed image.
///
/// The input is an NHWC tensor of shape `[1, size, size, 3]` scaled to `[-1, 1]`.
/// Implementations return one raw score per class, in label order.
pub trait InferenceBackend: Send + Sync + fmt::Debug {
    fn infer(&self, input: Array4<f32>) -> Result<Vec<f32>, DetectorError>;
}

/// Inference through ONNX Runtime.
#[derive(Debug)]
pub struct OnnxBackend {
    session: Arc<Session>,
    input_name: String,
}

impl OnnxBackend {
    /// Builds a session from an in-memory ONNX model.
    pub fn from_memory(model_bytes: &[u8], config: &RuntimeConfig) -> Result<Self, DetectorError> {
        let session = create_session_builder(config)?.commit_from_memory(model_bytes)?;
        Self::from_session(session)
    }

    /// Builds a session from an ONNX file on disk.
    pub fn from_file(path: &str, config: &RuntimeConfig) -> Result<Self, DetectorError> {
        if !std::path::Path::new(path).exists() {
            return Err(DetectorError::LoadError(format!("ONNX model not found: {}", path)));
        }
        let session = create_session_builder(config)?.commit_from_file(path)?;
        Self::from_session(session)
    }

    fn from_session(session: Session) -> Result<Self, DetectorError> {
        Self::validate_model(&session)?;
        let input_name = session.inputs[0].name.clone();
        log::info!("ONNX session ready (input '{}')", input_name);
        Ok(Self {
            session: Arc::new(session),
            input_name,
        })
    }

    /// Requires one image input and at least one output.
    fn validate_model(session: &Session) -> Result<(), DetectorError> {
        if session.inputs.len() != 1 {
            return Err(DetectorError::LoadError(format!(
                "Model must have exactly 1 image input, found {}",
                session.inputs.len()
            )));
        }
        if session.outputs.is_empty() {
            return Err(DetectorError::LoadError(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }
        Ok(())
    }
}

impl InferenceBackend for OnnxBackend {
    fn infer(&self, input: Array4<f32>) -> Result<Vec<f32>, DetectorError> {
        let pixels = input.as_standard_layout().into_owned();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.clone(),
            Tensor::from_array(pixels).map_err(|e| {
                DetectorError::PredictionError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| DetectorError::PredictionError(format!("Failed to run model: {}", e)))?;
        let scores = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            DetectorError::PredictionError(format!("Failed to extract output tensor: {}", e))
        })?;

        Ok(scores.iter().copied().collect())
    }
}
