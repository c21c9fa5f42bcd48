use std::io;
use std::path::PathBuf;

use reqwest::Client;
use sha2::{Digest, Sha256};
use url::Url;

use crate::models::{ModelMetadata, ModelTopology};

pub const MODEL_FILE: &str = "model.json";
pub const METADATA_FILE: &str = "metadata.json";
/// ONNX export of the network, read by the local inference engine
pub const ONNX_FILE: &str = "model.onnx";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid model source '{source_url}': {reason}")]
    InvalidSource { source_url: String, reason: String },
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("Request for {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Malformed {file}: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid model metadata: {0}")]
    InvalidMetadata(String),
}

/// Appends a trailing slash to a model base URL when it is missing.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Where a model export lives: an http(s) base URL or a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Remote(Url),
    Local(PathBuf),
}

impl ModelSource {
    /// Parses and normalizes a model location.
    ///
    /// `http://` and `https://` inputs are remote, `file://` URLs and bare paths
    /// are local directories.
    ///
    /// # Example
    /// ```
    /// use component_detector::ModelSource;
    ///
    /// let source = ModelSource::parse("https://teachablemachine.withgoogle.com/models/abc").unwrap();
    /// assert_eq!(source.model_url(), "https://teachablemachine.withgoogle.com/models/abc/model.json");
    /// ```
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSource {
                source_url: input.to_string(),
                reason: "model URL cannot be empty".into(),
            });
        }
        let normalized = normalize_base_url(trimmed);

        if normalized.starts_with("http://") || normalized.starts_with("https://") {
            let url = Url::parse(&normalized).map_err(|e| ModelError::InvalidSource {
                source_url: input.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Self::Remote(url));
        }

        if normalized.starts_with("file://") {
            let path = Url::parse(&normalized)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| ModelError::InvalidSource {
                    source_url: input.to_string(),
                    reason: "not a valid file URL".into(),
                })?;
            return Ok(Self::Local(path));
        }

        if normalized.contains("://") {
            return Err(ModelError::InvalidSource {
                source_url: input.to_string(),
                reason: "only http, https and file locations are supported".into(),
            });
        }

        Ok(Self::Local(PathBuf::from(normalized)))
    }

    /// The normalized base, always ending with a slash for remote sources.
    pub fn base(&self) -> String {
        match self {
            Self::Remote(url) => url.to_string(),
            Self::Local(path) => path.to_string_lossy().to_string(),
        }
    }

    /// Location of a file inside the export, derived by appending its name to the base.
    pub fn resource(&self, name: &str) -> String {
        match self {
            Self::Remote(url) => format!("{}{}", url, name),
            Self::Local(path) => path.join(name).to_string_lossy().to_string(),
        }
    }

    pub fn model_url(&self) -> String {
        self.resource(MODEL_FILE)
    }

    pub fn metadata_url(&self) -> String {
        self.resource(METADATA_FILE)
    }

    pub fn onnx_url(&self) -> String {
        self.resource(ONNX_FILE)
    }
}

/// The fetched and validated model definition.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub source: ModelSource,
    pub topology: ModelTopology,
    pub metadata: ModelMetadata,
    /// SHA-256 over the raw `model.json` bytes followed by `metadata.json`
    pub fingerprint: String,
}

/// Fetches model exports over HTTP or from disk.
#[derive(Debug, Clone, Default)]
pub struct ModelLoader {
    client: Client,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `model.json` and `metadata.json` and validates both.
    pub async fn load_definition(&self, source: &ModelSource) -> Result<ModelDefinition, ModelError> {
        let model_url = source.model_url();
        let metadata_url = source.metadata_url();
        log::info!("Loading model definition from {}", source.base());

        let (model_bytes, metadata_bytes) =
            tokio::try_join!(self.fetch(&model_url), self.fetch(&metadata_url))?;

        let topology: ModelTopology = serde_json::from_slice(&model_bytes).map_err(|e| {
            log::error!("Failed to parse {}: {}", model_url, e);
            ModelError::Malformed { file: MODEL_FILE.to_string(), source: e }
        })?;
        topology.validate()?;

        let metadata: ModelMetadata = serde_json::from_slice(&metadata_bytes).map_err(|e| {
            log::error!("Failed to parse {}: {}", metadata_url, e);
            ModelError::Malformed { file: METADATA_FILE.to_string(), source: e }
        })?;
        metadata.validate()?;

        let mut hasher = Sha256::new();
        hasher.update(&model_bytes);
        hasher.update(&metadata_bytes);
        let fingerprint = format!("{:x}", hasher.finalize());

        log::info!(
            "Model definition loaded: {} labels, {}px input, {} weight tensors",
            metadata.labels.len(),
            metadata.image_size,
            topology.weight_count()
        );
        log::debug!("Model fingerprint: {}", fingerprint);

        Ok(ModelDefinition {
            source: source.clone(),
            topology,
            metadata,
            fingerprint,
        })
    }

    /// Reads one resource, which is either an http(s) URL or a filesystem path.
    pub async fn fetch(&self, location: &str) -> Result<Vec<u8>, ModelError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            log::info!("Downloading {}", location);
            let response = self.client.get(location).send().await?;
            log::debug!("Download response status: {}", response.status());
            if !response.status().is_success() {
                return Err(ModelError::HttpStatus {
                    url: location.to_string(),
                    status: response.status().as_u16(),
                });
            }
            let bytes = response.bytes().await?;
            log::debug!("Downloaded {} bytes", bytes.len());
            Ok(bytes.to_vec())
        } else {
            log::info!("Reading {}", location);
            Ok(tokio::fs::read(location).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://x.test/models/abc"), "https://x.test/models/abc/");
        assert_eq!(normalize_base_url("https://x.test/models/abc/"), "https://x.test/models/abc/");
        assert_eq!(normalize_base_url("  https://x.test/m  "), "https://x.test/m/");
    }

    #[test]
    fn test_remote_resource_urls() {
        let source = ModelSource::parse("https://teachablemachine.withgoogle.com/models/bN8AfPvwC").unwrap();
        assert!(matches!(source, ModelSource::Remote(_)));
        assert_eq!(source.base(), "https://teachablemachine.withgoogle.com/models/bN8AfPvwC/");
        assert_eq!(
            source.metadata_url(),
            "https://teachablemachine.withgoogle.com/models/bN8AfPvwC/metadata.json"
        );
        assert_eq!(
            source.onnx_url(),
            "https://teachablemachine.withgoogle.com/models/bN8AfPvwC/model.onnx"
        );
    }

    #[test]
    fn test_local_source() {
        let source = ModelSource::parse("/tmp/my-model").unwrap();
        assert_eq!(source, ModelSource::Local(PathBuf::from("/tmp/my-model/")));
        assert!(source.model_url().ends_with("my-model/model.json"));
    }

    #[test]
    fn test_invalid_sources() {
        assert!(matches!(ModelSource::parse("   "), Err(ModelError::InvalidSource { .. })));
        assert!(matches!(ModelSource::parse("ftp://host/model"), Err(ModelError::InvalidSource { .. })));
    }
}
