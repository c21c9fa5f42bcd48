use ort::Error as OrtError;
use std::fmt;

use crate::model_loader::ModelError;

/// Represents the different types of errors that can occur while detecting components.
#[derive(Debug)]
pub enum DetectorError {
    /// A prediction was requested before a model finished loading
    ModelNotLoaded,
    /// The model definition or inference engine could not be loaded
    LoadError(String),
    /// The submitted file could not be decoded as an image
    ImageError(String),
    /// The inference engine failed or returned unusable output
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotLoaded => write!(f, "Model not loaded"),
            Self::LoadError(msg) => write!(f, "Failed to load model: {}", msg),
            Self::ImageError(msg) => write!(f, "Image error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DetectorError {}

impl From<OrtError> for DetectorError {
    fn from(err: OrtError) -> Self {
        DetectorError::LoadError(err.to_string())
    }
}

impl From<ModelError> for DetectorError {
    fn from(err: ModelError) -> Self {
        DetectorError::LoadError(err.to_string())
    }
}

impl From<image::ImageError> for DetectorError {
    fn from(err: image::ImageError) -> Self {
        DetectorError::ImageError(err.to_string())
    }
}
