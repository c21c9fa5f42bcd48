use std::env;

use crate::detector::DetectorError;
use crate::predictions::ConfidenceThreshold;
use crate::runtime::RuntimeConfig;

/// Demo model: a Teachable Machine image model trained on common components.
pub const DEFAULT_MODEL_URL: &str = "https://teachablemachine.withgoogle.com/models/bN8AfPvwC/";

/// Environment variable that overrides [`DEFAULT_MODEL_URL`].
pub const MODEL_URL_ENV: &str = "COMPONENT_DETECTOR_MODEL_URL";

/// Settings for loading a model and interpreting its predictions.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub model_url: String,
    /// Location of the ONNX export. Defaults to `model.onnx` next to `model.json`.
    pub onnx_location: Option<String>,
    pub threshold: ConfidenceThreshold,
    pub runtime: RuntimeConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_url: Self::default_model_url(),
            onnx_location: None,
            threshold: ConfidenceThreshold::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Returns the model URL from the environment, falling back to the demo model.
    pub fn default_model_url() -> String {
        match env::var(MODEL_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_MODEL_URL.to_string(),
        }
    }

    pub fn with_model_url(mut self, url: impl Into<String>) -> Self {
        self.model_url = url.into();
        self
    }

    pub fn with_onnx_location(mut self, location: impl Into<String>) -> Self {
        self.onnx_location = Some(location.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, DetectorError> {
        self.threshold = ConfidenceThreshold::new(threshold)?;
        Ok(self)
    }

    pub fn with_runtime_config(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }
}
