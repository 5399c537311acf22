use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{sort_for_reading, SuggestionRecord, SuggestionStore};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSnapshot {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub compositions: Vec<SuggestionRecord>,
}

impl SuggestionSnapshot {
    pub fn new(compositions: Vec<SuggestionRecord>) -> Self {
        SuggestionSnapshot {
            generated_at: Utc::now(),
            total: compositions.len(),
            compositions,
        }
    }
}

/// JSON file holding every suggestion; rewritten whole through a temp file and rename.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SuggestionSnapshot, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Json(format!("Failed to parse snapshot: {}", e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Snapshot doesn't exist yet, return empty
                Ok(SuggestionSnapshot::new(Vec::new()))
            }
            Err(e) => Err(AppError::Io(format!(
                "Failed to read snapshot {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, snapshot: &SuggestionSnapshot) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| {
                    AppError::Io(format!("Failed to create {}: {}", dir.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| {
            AppError::Json(format!("Failed to serialize snapshot: {}", e))
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            AppError::Io(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            AppError::Io(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

impl SuggestionStore for JsonSnapshotStore {
    fn replace_unscoped_suggestions(
        &mut self,
        records: &[SuggestionRecord],
    ) -> Result<usize, AppError> {
        let attempted = records.len();
        let existing = self
            .load()
            .map_err(|e| AppError::persistence(attempted, e))?;

        let mut compositions: Vec<SuggestionRecord> = existing
            .compositions
            .into_iter()
            .filter(|r| r.user_id.is_some())
            .collect();
        let kept = compositions.len();
        compositions.extend(records.iter().cloned());

        self.save(&SuggestionSnapshot::new(compositions))
            .map_err(|e| AppError::persistence(attempted, e))?;

        info!(path = %self.path.display(), kept, inserted = attempted, "wrote suggestion snapshot");
        Ok(attempted)
    }

    fn load_unscoped_suggestions(&self, limit: usize) -> Result<Vec<SuggestionRecord>, AppError> {
        let mut records: Vec<SuggestionRecord> = self
            .load()?
            .compositions
            .into_iter()
            .filter(|r| r.user_id.is_none())
            .collect();
        sort_for_reading(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}
