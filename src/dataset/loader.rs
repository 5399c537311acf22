use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use super::models::{CompositionRow, RawCompositionRow};
use crate::error::AppError;

pub const REQUIRED_COLUMNS: [&str; 14] = [
    "matchId",
    "teamId",
    "role",
    "championId",
    "win",
    "ally1",
    "ally2",
    "ally3",
    "ally4",
    "enemy1",
    "enemy2",
    "enemy3",
    "enemy4",
    "enemy5",
];

pub fn load_rows(path: &Path) -> Result<Vec<CompositionRow>, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Dataset(format!("Dataset not found ({}): {}", path.display(), e))
    })?;

    let rows = parse_rows(&content)?;
    info!(path = %path.display(), rows = rows.len(), "loaded composition samples");
    Ok(rows)
}

/// Parses a JSON array of exported samples, rejecting rows with missing columns.
pub fn parse_rows(content: &str) -> Result<Vec<CompositionRow>, AppError> {
    let values: Vec<Map<String, Value>> = serde_json::from_str(content)
        .map_err(|e| AppError::Json(format!("Failed to parse dataset: {}", e)))?;

    if values.is_empty() {
        return Err(AppError::Dataset("Dataset contains no rows".to_string()));
    }

    values
        .into_iter()
        .enumerate()
        .map(|(idx, object)| parse_row(idx, object))
        .collect()
}

fn parse_row(idx: usize, object: Map<String, Value>) -> Result<CompositionRow, AppError> {
    let mut missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| object.get(*column).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(AppError::Dataset(format!(
            "Row {}: missing columns: {}",
            idx,
            missing.join(", ")
        )));
    }

    let raw: RawCompositionRow = serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::Dataset(format!("Row {}: {}", idx, e)))?;

    let team_id = i32::try_from(raw.team_id)
        .map_err(|_| AppError::Dataset(format!("Row {}: teamId out of range", idx)))?;

    let win = raw.win.as_bool().ok_or_else(|| {
        AppError::Dataset(format!("Row {}: win must be a boolean or 0/1", idx))
    })?;

    let row = CompositionRow {
        match_id: raw.match_id.into_id(),
        team_id,
        role: raw.role.trim().to_string(),
        champion_id: raw.champion_id.into_id(),
        win,
        allies: [
            raw.ally1.into_id(),
            raw.ally2.into_id(),
            raw.ally3.into_id(),
            raw.ally4.into_id(),
        ],
        enemies: [
            raw.enemy1.into_id(),
            raw.enemy2.into_id(),
            raw.enemy3.into_id(),
            raw.enemy4.into_id(),
            raw.enemy5.into_id(),
        ],
        queue_id: raw.queue_id,
        patch: raw.patch.map(|p| p.into_id()),
        game_duration: raw.game_duration,
    };

    if row.match_id.is_empty() || row.champion_id.is_empty() {
        return Err(AppError::Dataset(format!(
            "Row {}: matchId and championId must not be empty",
            idx
        )));
    }

    Ok(row)
}
