use component_detector::predictions::{detected_components, rank_with_threshold, top_prediction};
use component_detector::{rank_predictions, ConfidenceThreshold, Prediction};

fn predictions() -> Vec<Prediction> {
    vec![
        Prediction::new("Battery", 0.02),
        Prediction::new("Resistor", 0.41),
        Prediction::new("LED", 0.33),
        Prediction::new("Capacitor", 0.08),
        Prediction::new("Transistor", 0.16),
    ]
}

fn sorted_names(predictions: &[Prediction]) -> Vec<String> {
    let mut names: Vec<_> = predictions.iter().map(|p| p.class_name.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_ranking_is_idempotent() {
    let once = rank_predictions(&predictions());
    let twice = rank_predictions(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_ranking_preserves_entries() {
    let input = predictions();
    let ranked = rank_predictions(&input);
    assert_eq!(ranked.len(), input.len());
    assert_eq!(sorted_names(&ranked), sorted_names(&input));
    for pair in ranked.windows(2) {
        assert!(pair[0].probability >= pair[1].probability);
    }
}

#[test]
fn test_ranking_does_not_touch_input() {
    let input = predictions();
    let _ = rank_predictions(&input);
    assert_eq!(input[0].class_name, "Battery");
}

#[test]
fn test_custom_threshold() {
    let threshold = ConfidenceThreshold::new(0.35).unwrap();
    let ranked = rank_with_threshold(&predictions(), threshold);
    let bright: Vec<_> = ranked
        .iter()
        .filter(|r| !r.below_threshold)
        .map(|r| r.prediction.class_name.as_str())
        .collect();
    assert_eq!(bright, vec!["Resistor"]);
    assert_eq!(detected_components(&predictions(), threshold), vec!["Resistor".to_string()]);
}

#[test]
fn test_detected_components_keep_input_order() {
    let detected = detected_components(&predictions(), ConfidenceThreshold::default());
    assert_eq!(detected, vec!["Resistor", "LED", "Transistor"]);
}

#[test]
fn test_top_prediction() {
    let input = predictions();
    assert_eq!(top_prediction(&input).unwrap().class_name, "Resistor");
}

#[test]
fn test_json_round_trip_names() {
    let parsed: Vec<Prediction> =
        serde_json::from_str(r#"[{"className": "LED", "probability": 0.9}]"#).unwrap();
    assert_eq!(parsed, vec![Prediction::new("LED", 0.9)]);
}
