mod ort;

pub use self::ort::OrtModel;

use ndarray::Array3;
use thiserror::Error;

use crate::features::{FEATURE_DIM, FeatureVector};
use crate::labels::LabelTable;
use crate::types::Classification;

pub const CONFIDENCE_THRESHOLD: f32 = 0.60;
pub const LOW_CONFIDENCE_MARKER: &str = "?";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classification model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Sequence model boundary: a full window in, one probability per class out.
/// Production uses the ONNX Runtime backend; tests substitute stubs.
pub trait SequenceModel: Send {
    fn predict(&mut self, input: Array3<f32>) -> anyhow::Result<Vec<f32>>;
}

pub struct GestureClassifier {
    model: Box<dyn SequenceModel>,
    labels: LabelTable,
    threshold: f32,
}

impl GestureClassifier {
    pub fn new(model: Box<dyn SequenceModel>, labels: LabelTable) -> Self {
        Self::with_threshold(model, labels, CONFIDENCE_THRESHOLD)
    }

    pub fn with_threshold(
        model: Box<dyn SequenceModel>,
        labels: LabelTable,
        threshold: f32,
    ) -> Self {
        Self {
            model,
            labels,
            threshold,
        }
    }

    pub fn classify(&mut self, window: &[FeatureVector]) -> Result<Classification, ClassifyError> {
        let input = marshal_window(window)?;
        let probs = self
            .model
            .predict(input)
            .map_err(|err| ClassifyError::Inference(format!("{err:#}")))?;

        let (index, confidence) = argmax(&probs)
            .ok_or_else(|| ClassifyError::Inference("model returned no probabilities".into()))?;

        let mut label = self.labels.label_for(index);
        if confidence < self.threshold {
            label.push_str(LOW_CONFIDENCE_MARKER);
        }

        Ok(Classification { label, confidence })
    }
}

fn marshal_window(window: &[FeatureVector]) -> Result<Array3<f32>, ClassifyError> {
    let mut values = Vec::with_capacity(window.len() * FEATURE_DIM);
    for frame in window {
        values.extend_from_slice(frame);
    }

    Array3::from_shape_vec((1, window.len(), FEATURE_DIM), values)
        .map_err(|err| ClassifyError::Inference(format!("failed to shape input tensor: {err}")))
}

// Ties resolve to the lowest index: a later class only wins on a strictly
// greater probability.
fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &prob) in probs.iter().enumerate() {
        match best {
            Some((_, top)) if prob <= top => {}
            _ => best = Some((index, prob)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel {
        probs: Vec<f32>,
    }

    impl SequenceModel for FixedModel {
        fn predict(&mut self, _input: Array3<f32>) -> anyhow::Result<Vec<f32>> {
            Ok(self.probs.clone())
        }
    }

    struct FailingModel;

    impl SequenceModel for FailingModel {
        fn predict(&mut self, _input: Array3<f32>) -> anyhow::Result<Vec<f32>> {
            anyhow::bail!("session exploded")
        }
    }

    fn window_of(frames: usize, value: f32) -> Vec<FeatureVector> {
        vec![[value; FEATURE_DIM]; frames]
    }

    fn classifier(probs: Vec<f32>) -> GestureClassifier {
        GestureClassifier::new(
            Box::new(FixedModel { probs }),
            LabelTable::from_labels(&["yes", "no", "Hello", "thanks"]),
        )
    }

    #[test]
    fn test_marshal_preserves_frame_order() {
        let mut window = window_of(2, 1.0);
        window[1] = [2.0; FEATURE_DIM];

        let input = marshal_window(&window).unwrap();
        assert_eq!(input.dim(), (1, 2, FEATURE_DIM));
        assert_eq!(input[[0, 0, 0]], 1.0);
        assert_eq!(input[[0, 1, FEATURE_DIM - 1]], 2.0);
    }

    #[test]
    fn test_classify_picks_highest_probability() {
        let mut classifier = classifier(vec![0.05, 0.05, 0.9, 0.0]);
        let result = classifier.classify(&window_of(30, 0.5)).unwrap();
        assert_eq!(result.label, "Hello");
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_threshold_boundary_accepts_exact_match() {
        let mut classifier = classifier(vec![0.6, 0.4, 0.0, 0.0]);
        let result = classifier.classify(&window_of(30, 0.5)).unwrap();
        assert_eq!(result.label, "yes");
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_low_confidence_adds_marker() {
        let mut classifier = classifier(vec![0.1, 0.1, 0.3, 0.1]);
        let result = classifier.classify(&window_of(30, 0.5)).unwrap();
        assert_eq!(result.label, "Hello?");
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        let mut classifier = classifier(vec![0.3, 0.1, 0.3, 0.3]);
        let result = classifier.classify(&window_of(30, 0.5)).unwrap();
        assert_eq!(result.label, "yes?");
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn test_missing_label_gets_placeholder() {
        let mut classifier = GestureClassifier::new(
            Box::new(FixedModel {
                probs: vec![0.1, 0.9],
            }),
            LabelTable::from_labels(&["yes"]),
        );
        let result = classifier.classify(&window_of(30, 0.5)).unwrap();
        assert_eq!(result.label, "class 1");
    }

    #[test]
    fn test_model_failure_surfaces_inference_error() {
        let mut classifier = GestureClassifier::new(
            Box::new(FailingModel),
            LabelTable::from_labels(&["yes"]),
        );
        let err = classifier.classify(&window_of(30, 0.5)).unwrap_err();
        assert!(matches!(err, ClassifyError::Inference(_)));
        assert!(err.to_string().contains("session exploded"));
    }

    #[test]
    fn test_empty_probabilities_is_error() {
        let mut classifier = classifier(vec![]);
        let err = classifier.classify(&window_of(30, 0.5)).unwrap_err();
        assert!(matches!(err, ClassifyError::Inference(_)));
    }
}
