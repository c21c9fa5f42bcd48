//! Serde types for the two documents of a Teachable Machine image export.

use serde::{Deserialize, Serialize};

use crate::model_loader::ModelError;

/// Input resolution used by Teachable Machine image models when the metadata omits it.
pub const DEFAULT_IMAGE_SIZE: u32 = 224;

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

/// Contents of `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    #[serde(default)]
    pub tfjs_version: Option<String>,
    #[serde(default)]
    pub tm_version: Option<String>,
    #[serde(default)]
    pub package_version: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub time_stamp: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub model_name: Option<String>,
    /// Class names, in model output order
    pub labels: Vec<String>,
    #[serde(default = "default_image_size")]
    pub image_size: u32,
}

impl ModelMetadata {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.labels.is_empty() {
            return Err(ModelError::InvalidMetadata("metadata.json lists no labels".into()));
        }
        if let Some(pos) = self.labels.iter().position(|l| l.trim().is_empty()) {
            return Err(ModelError::InvalidMetadata(format!("Label {} is empty", pos + 1)));
        }
        if self.image_size == 0 {
            return Err(ModelError::InvalidMetadata("imageSize must be positive".into()));
        }
        Ok(())
    }
}

/// One entry of a TF.js weights manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    pub name: String,
    #[serde(default)]
    pub shape: Vec<usize>,
    #[serde(default)]
    pub dtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsGroup {
    pub paths: Vec<String>,
    #[serde(default)]
    pub weights: Vec<WeightSpec>,
}

/// Contents of `model.json` (TF.js layers format). The topology is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTopology {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub converted_by: Option<String>,
    pub model_topology: serde_json::Value,
    pub weights_manifest: Vec<WeightsGroup>,
}

impl ModelTopology {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.model_topology.is_null() {
            return Err(ModelError::InvalidMetadata("model.json has no modelTopology".into()));
        }
        if self.weights_manifest.is_empty() {
            return Err(ModelError::InvalidMetadata("model.json has an empty weightsManifest".into()));
        }
        if self.weights_manifest.iter().any(|group| group.paths.is_empty()) {
            return Err(ModelError::InvalidMetadata(
                "weightsManifest group without weight file paths".into(),
            ));
        }
        Ok(())
    }

    /// Total number of weight tensors declared by the manifest.
    pub fn weight_count(&self) -> usize {
        self.weights_manifest.iter().map(|group| group.weights.len()).sum()
    }
}
