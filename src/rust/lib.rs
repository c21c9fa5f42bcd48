//! Identify electronic components in a photo with a Teachable Machine image
//! model and get project ideas for what was found.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use component_detector::{Detector, DetectorConfig, ImageInput};
//!
//! let mut detector = Detector::new(
//!     DetectorConfig::default()
//!         .with_model_url("https://teachablemachine.withgoogle.com/models/bN8AfPvwC")
//! );
//! detector.load().await?;
//!
//! let image = ImageInput::open("components.jpg").await?;
//! let analysis = detector.analyze(&image).await?;
//! for project in &analysis.projects {
//!     println!("{} {} ({})", project.icon, project.title, project.difficulty);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Suggestions without a model
//!
//! The suggestion table is static and can be queried directly:
//!
//! ```rust
//! use component_detector::suggest_projects;
//!
//! let projects = suggest_projects(&["LED", "RGB LED"]);
//! assert_eq!(projects.len(), 3);
//! ```

pub mod analysis;
pub mod config;
pub mod detector;
pub mod image_input;
pub mod model_loader;
pub mod models;
pub mod predictions;
pub mod render;
mod runtime;
pub mod suggestions;

pub use analysis::Analysis;
pub use config::{DetectorConfig, DEFAULT_MODEL_URL};
pub use detector::{Detector, DetectorError, DetectorInfo, InferenceBackend, ModelStatus, OnnxBackend};
pub use image_input::ImageInput;
pub use model_loader::{normalize_base_url, ModelDefinition, ModelError, ModelLoader, ModelSource};
pub use models::{ModelMetadata, ModelTopology};
pub use predictions::{rank_predictions, ConfidenceThreshold, Prediction, RankedPrediction};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use suggestions::{suggest_projects, Difficulty, ProjectSuggestion};

pub fn init_logger() {
    env_logger::init();
}
