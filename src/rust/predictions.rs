use serde::{Deserialize, Serialize};

use crate::detector::DetectorError;

/// Default confidence below which a prediction is rendered dimmed.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// One class/probability pair returned by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub class_name: String,
    /// Probability in `[0, 1]`
    pub probability: f32,
}

impl Prediction {
    pub fn new(class_name: impl Into<String>, probability: f32) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }

    pub fn percentage(&self) -> f32 {
        self.probability * 100.0
    }
}

/// Confidence cut-off used for dimming and component detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThreshold(f32);

impl ConfidenceThreshold {
    /// Creates a threshold, rejecting values outside `[0, 1]`
    pub fn new(value: f32) -> Result<Self, DetectorError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DetectorError::ValidationError(format!(
                "Confidence threshold must be between 0 and 1, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// True when the prediction should be shown dimmed.
    pub fn is_below(&self, prediction: &Prediction) -> bool {
        prediction.probability < self.0
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

/// Colour tier of a result bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Strong,
    Good,
    Fair,
    Weak,
}

impl ConfidenceBand {
    pub fn for_prediction(prediction: &Prediction) -> Self {
        let percentage = prediction.percentage();
        if percentage >= 80.0 {
            Self::Strong
        } else if percentage >= 50.0 {
            Self::Good
        } else if percentage >= 20.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }
}

/// A prediction in display order, flagged when it falls under the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPrediction {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub below_threshold: bool,
}

/// Returns the predictions sorted by probability, highest first.
///
/// The sort is stable, so entries with equal probability keep their input order.
pub fn rank_predictions(predictions: &[Prediction]) -> Vec<Prediction> {
    let mut ranked = predictions.to_vec();
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked
}

/// Ranks the predictions and marks those below `threshold`. Nothing is removed.
pub fn rank_with_threshold(
    predictions: &[Prediction],
    threshold: ConfidenceThreshold,
) -> Vec<RankedPrediction> {
    rank_predictions(predictions)
        .into_iter()
        .map(|prediction| RankedPrediction {
            below_threshold: threshold.is_below(&prediction),
            prediction,
        })
        .collect()
}

/// The primary detection: the most probable class, if any.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    predictions
        .iter()
        .reduce(|best, p| if p.probability > best.probability { p } else { best })
}

/// Class names whose probability is strictly above the threshold, in input order.
pub fn detected_components(predictions: &[Prediction], threshold: ConfidenceThreshold) -> Vec<String> {
    predictions
        .iter()
        .filter(|p| p.probability > threshold.value())
        .map(|p| p.class_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Prediction> {
        vec![
            Prediction::new("Resistor", 0.05),
            Prediction::new("LED", 0.7),
            Prediction::new("Capacitor", 0.1),
            Prediction::new("Transistor", 0.15),
        ]
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_predictions(&sample());
        let names: Vec<_> = ranked.iter().map(|p| p.class_name.as_str()).collect();
        assert_eq!(names, vec!["LED", "Transistor", "Capacitor", "Resistor"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let predictions = vec![
            Prediction::new("a", 0.5),
            Prediction::new("b", 0.5),
            Prediction::new("c", 0.9),
        ];
        let ranked = rank_predictions(&predictions);
        let names: Vec<_> = ranked.iter().map(|p| p.class_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_threshold_marks_without_removing() {
        let ranked = rank_with_threshold(&sample(), ConfidenceThreshold::default());
        assert_eq!(ranked.len(), 4);
        let below: Vec<_> = ranked
            .iter()
            .filter(|r| r.below_threshold)
            .map(|r| r.prediction.class_name.as_str())
            .collect();
        // 0.1 sits exactly on the threshold and is not dimmed
        assert_eq!(below, vec!["Resistor"]);
    }

    #[test]
    fn test_detected_components_is_strict() {
        let detected = detected_components(&sample(), ConfidenceThreshold::default());
        assert_eq!(detected, vec!["LED".to_string(), "Transistor".to_string()]);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ConfidenceThreshold::new(0.0).is_ok());
        assert!(ConfidenceThreshold::new(1.0).is_ok());
        assert!(ConfidenceThreshold::new(1.5).is_err());
        assert!(ConfidenceThreshold::new(-0.1).is_err());
        assert!(ConfidenceThreshold::new(f32::NAN).is_err());
    }

    #[test]
    fn test_top_prediction() {
        let predictions = sample();
        assert_eq!(top_prediction(&predictions).map(|p| p.class_name.as_str()), Some("LED"));
        assert!(top_prediction(&[]).is_none());
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::for_prediction(&Prediction::new("a", 0.85)), ConfidenceBand::Strong);
        assert_eq!(ConfidenceBand::for_prediction(&Prediction::new("a", 0.5)), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::for_prediction(&Prediction::new("a", 0.2)), ConfidenceBand::Fair);
        assert_eq!(ConfidenceBand::for_prediction(&Prediction::new("a", 0.19)), ConfidenceBand::Weak);
    }

    #[test]
    fn test_serializes_with_camel_case() {
        let json = serde_json::to_string(&Prediction::new("LED", 0.5)).unwrap();
        assert_eq!(json, r#"{"className":"LED","probability":0.5}"#);
    }
}
