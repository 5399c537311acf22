use std::collections::HashMap;

use tracing::warn;

use crate::classifier::{validate_matrix, Classifier};
use crate::dataset::CompositionRow;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub row: CompositionRow,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoredBatch {
    pub rows: Vec<ScoredRow>,
    /// Rows whose champion is not among the classifier's labels.
    pub unknown_champions: usize,
}

/// Label to column lookup. Repeated labels resolve to their first column.
pub struct ClassIndex<'a> {
    index: HashMap<&'a str, usize>,
}

impl<'a> ClassIndex<'a> {
    pub fn new(classes: &'a [String]) -> Self {
        let mut index = HashMap::with_capacity(classes.len());
        for (idx, label) in classes.iter().enumerate() {
            index.entry(label.as_str()).or_insert(idx);
        }
        ClassIndex { index }
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }
}

/// Probability the classifier assigns to the row's own champion, or 0.0 when unknown.
pub fn score_row(row: &CompositionRow, probabilities: &[f64], classes: &ClassIndex<'_>) -> f64 {
    classes
        .position(&row.champion_id)
        .and_then(|idx| probabilities.get(idx).copied())
        .unwrap_or(0.0)
}

/// Queries the classifier once for the whole batch and attaches a confidence to every row.
pub fn score_rows(
    rows: Vec<CompositionRow>,
    classifier: &dyn Classifier,
) -> Result<ScoredBatch, AppError> {
    let classes = classifier.classes();
    let matrix = classifier.classify(&rows)?;
    validate_matrix(&matrix, rows.len(), classes.len())?;

    let index = ClassIndex::new(classes);
    let mut batch = ScoredBatch {
        rows: Vec::with_capacity(rows.len()),
        unknown_champions: 0,
    };

    for (row, probabilities) in rows.into_iter().zip(matrix.iter()) {
        if index.position(&row.champion_id).is_none() {
            batch.unknown_champions += 1;
        }
        let confidence = score_row(&row, probabilities, &index);
        batch.rows.push(ScoredRow { row, confidence });
    }

    if batch.unknown_champions > 0 {
        warn!(
            unknown = batch.unknown_champions,
            "rows with champions unknown to the classifier were scored 0.0"
        );
    }

    Ok(batch)
}
