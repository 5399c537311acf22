pub mod snapshot;
pub mod sqlite;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use snapshot::JsonSnapshotStore;
pub use sqlite::SqliteSuggestionStore;

/// Persisted shape of a ranked suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    pub id: String,
    pub rank: usize,
    pub user_id: Option<String>, // None = not scoped to any player
    pub team_champions: Vec<String>,
    pub enemy_champions: Vec<String>,
    pub role: String,
    pub suggested_champion: String,
    pub confidence: f64,
    pub reasoning: Option<String>,
    pub game_mode: String,
    pub tier: Option<String>,
    pub playstyle: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub trait SuggestionStore {
    /// Deletes every unscoped record and inserts `records` in their place.
    ///
    /// Readers see either the previous set or the new one, never a mix. On error the
    /// previous set is left untouched.
    fn replace_unscoped_suggestions(&mut self, records: &[SuggestionRecord])
        -> Result<usize, AppError>;

    /// Unscoped records, highest confidence first.
    fn load_unscoped_suggestions(&self, limit: usize) -> Result<Vec<SuggestionRecord>, AppError>;
}

/// Orders records the way the read path serves them.
pub(crate) fn sort_for_reading(records: &mut [SuggestionRecord]) {
    records.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
}
