use serde::Serialize;

mod backend;
mod error;
mod model;
mod utils;

pub use backend::{InferenceBackend, OnnxBackend};
pub use error::DetectorError;
pub use model::{Detector, ModelStatus};

use crate::model_loader::ModelDefinition;

/// Information about the currently loaded model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorInfo {
    /// Normalized base URL the model was loaded from
    pub source_url: String,
    pub model_name: Option<String>,
    /// Class labels, in model output order
    pub labels: Vec<String>,
    /// Side length of the square model input
    pub image_size: u32,
    pub tm_version: Option<String>,
    /// SHA-256 of the fetched model definition
    pub fingerprint: String,
}

impl From<&ModelDefinition> for DetectorInfo {
    fn from(definition: &ModelDefinition) -> Self {
        Self {
            source_url: definition.source.base(),
            model_name: definition.metadata.model_name.clone(),
            labels: definition.metadata.labels.clone(),
            image_size: definition.metadata.image_size,
            tm_version: definition.metadata.tm_version.clone(),
            fingerprint: definition.fingerprint.clone(),
        }
    }
}
