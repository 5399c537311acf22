//! Classifier seam.
//!
//! Model training happens elsewhere. The pass only needs a probability
//! vector per row and the ordered class labels those vectors refer to.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::dataset::CompositionRow;
use crate::error::AppError;

/// One probability vector per input row, one column per class label.
pub type ProbabilityMatrix = Vec<Vec<f64>>;

pub trait Classifier {
    /// Ordered class labels; column `i` of every probability vector refers to `classes()[i]`.
    fn classes(&self) -> &[String];

    /// Scores a whole batch at once.
    fn classify(&self, rows: &[CompositionRow]) -> Result<ProbabilityMatrix, AppError>;
}

/// Probabilities exported by the external model, aligned with the dataset row order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecomputedClassifier {
    classes: Vec<String>,
    probabilities: ProbabilityMatrix,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
}

impl PrecomputedClassifier {
    pub fn new(classes: Vec<String>, probabilities: ProbabilityMatrix) -> Self {
        PrecomputedClassifier {
            classes,
            probabilities,
            generated_at: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Classifier(format!(
                "Predictions not found ({}): {}",
                path.display(),
                e
            ))
        })?;

        let classifier: PrecomputedClassifier = serde_json::from_str(&content)
            .map_err(|e| AppError::Json(format!("Failed to parse predictions: {}", e)))?;

        info!(
            path = %path.display(),
            classes = classifier.classes.len(),
            rows = classifier.probabilities.len(),
            generated_at = ?classifier.generated_at,
            "loaded precomputed predictions"
        );
        Ok(classifier)
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }
}

impl Classifier for PrecomputedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, rows: &[CompositionRow]) -> Result<ProbabilityMatrix, AppError> {
        if self.probabilities.len() != rows.len() {
            return Err(AppError::Classifier(format!(
                "Predictions cover {} rows but the dataset has {}",
                self.probabilities.len(),
                rows.len()
            )));
        }
        Ok(self.probabilities.clone())
    }
}

/// Checks the shape and range of a classifier's output before anything is scored.
pub fn validate_matrix(
    matrix: &ProbabilityMatrix,
    rows: usize,
    classes: usize,
) -> Result<(), AppError> {
    if matrix.len() != rows {
        return Err(AppError::Classifier(format!(
            "Expected {} probability vectors, got {}",
            rows,
            matrix.len()
        )));
    }

    for (idx, vector) in matrix.iter().enumerate() {
        if vector.len() != classes {
            return Err(AppError::Classifier(format!(
                "Row {}: expected {} probabilities, got {}",
                idx,
                classes,
                vector.len()
            )));
        }
        if let Some(bad) = vector
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
        {
            return Err(AppError::Classifier(format!(
                "Row {}: probability {} is outside [0, 1]",
                idx, bad
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_width_must_match_classes() {
        let matrix = vec![vec![0.5, 0.5], vec![0.2]];
        let err = validate_matrix(&matrix, 2, 2).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let matrix = vec![vec![0.5, f64::NAN]];
        assert!(validate_matrix(&matrix, 1, 2).is_err());
        let matrix = vec![vec![1.2, 0.0]];
        assert!(validate_matrix(&matrix, 1, 2).is_err());
    }

    #[test]
    fn predictions_file_shape() {
        let raw = r#"{"classes": ["Ahri", "Garen"], "probabilities": [[0.3, 0.7]], "generatedAt": "2024-05-01T10:00:00Z"}"#;
        let classifier: PrecomputedClassifier = serde_json::from_str(raw).unwrap();
        assert_eq!(classifier.classes(), &["Ahri".to_string(), "Garen".to_string()][..]);
        assert!(classifier.generated_at().is_some());
        assert!(classifier.classify(&[]).is_err());
    }
}
