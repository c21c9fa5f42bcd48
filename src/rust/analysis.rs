use serde::Serialize;

use crate::predictions::{
    detected_components, rank_with_threshold, ConfidenceThreshold, Prediction, RankedPrediction,
};
use crate::suggestions::{suggest_projects, ProjectSuggestion};

/// Everything shown for one analyzed image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// All predictions, highest probability first
    pub predictions: Vec<RankedPrediction>,
    /// Class names above the confidence threshold
    pub detected: Vec<String>,
    pub projects: Vec<&'static ProjectSuggestion>,
}

impl Analysis {
    pub fn from_predictions(predictions: &[Prediction], threshold: ConfidenceThreshold) -> Self {
        let detected = detected_components(predictions, threshold);
        let projects = suggest_projects(&detected);
        Self {
            predictions: rank_with_threshold(predictions, threshold),
            detected,
            projects,
        }
    }

    pub fn top(&self) -> Option<&Prediction> {
        self.predictions.first().map(|ranked| &ranked.prediction)
    }

    pub fn has_detections(&self) -> bool {
        !self.detected.is_empty()
    }
}
