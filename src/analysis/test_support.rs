use super::grouping::TeamGroup;
use super::roles::Role;
use super::scorer::ScoredRow;
use crate::classifier::{Classifier, ProbabilityMatrix};
use crate::dataset::CompositionRow;
use crate::error::AppError;

pub fn row(match_id: &str, team_id: i32, role: &str, champion: &str, win: bool) -> CompositionRow {
    CompositionRow {
        match_id: match_id.to_string(),
        team_id,
        role: role.to_string(),
        champion_id: champion.to_string(),
        win,
        allies: ["P1", "P2", "P3", "P4"].map(String::from),
        enemies: ["X1", "X2", "X3", "X4", "X5"].map(String::from),
        queue_id: Some(420),
        patch: None,
        game_duration: None,
    }
}

pub fn scored(
    match_id: &str,
    team_id: i32,
    role: &str,
    champion: &str,
    confidence: f64,
) -> ScoredRow {
    ScoredRow {
        row: row(match_id, team_id, role, champion, true),
        confidence,
    }
}

/// Five rows, one per role in priority order.
pub fn full_team(
    match_id: &str,
    team_id: i32,
    champions: [&str; 5],
    confidence: f64,
) -> Vec<ScoredRow> {
    Role::PRIORITY
        .iter()
        .zip(champions)
        .map(|(role, champion)| scored(match_id, team_id, role.as_str(), champion, confidence))
        .collect()
}

pub fn group(rows: Vec<ScoredRow>) -> TeamGroup {
    TeamGroup {
        match_id: rows[0].row.match_id.clone(),
        team_id: rows[0].row.team_id,
        rows,
    }
}

pub struct FixedClassifier {
    classes: Vec<String>,
    matrix: ProbabilityMatrix,
}

impl FixedClassifier {
    pub fn new(classes: &[&str], matrix: ProbabilityMatrix) -> Self {
        FixedClassifier {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            matrix,
        }
    }
}

impl Classifier for FixedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, _rows: &[CompositionRow]) -> Result<ProbabilityMatrix, AppError> {
        Ok(self.matrix.clone())
    }
}
