const DISTRIBUTION_TOLERANCE: f32 = 1e-3;

/// True when every value is a finite probability and the values sum to one.
pub(crate) fn is_distribution(values: &[f32]) -> bool {
    if values.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 1.0) {
        return false;
    }
    let sum: f32 = values.iter().sum();
    (sum - 1.0).abs() <= DISTRIBUTION_TOLERANCE
}

/// Expects finite logits; callers reject NaN and infinite scores first.
pub(crate) fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Returns class probabilities, applying softmax only to raw logits.
pub(crate) fn to_probabilities(output: Vec<f32>) -> Vec<f32> {
    if is_distribution(&output) {
        output
    } else {
        softmax(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_passes_through() {
        let output = vec![0.25, 0.75];
        assert_eq!(to_probabilities(output.clone()), output);
    }

    #[test]
    fn test_logits_are_normalized() {
        let probs = to_probabilities(vec![2.0, 0.0, -1.0]);
        assert!(is_distribution(&probs));
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }

    #[test]
    fn test_softmax_of_equal_logits() {
        let probs = softmax(&[3.0, 3.0, 3.0, 3.0]);
        for p in probs {
            assert!((p - 0.25).abs() < 1e-6);
        }
    }
}
