use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::analysis::SuggestionCandidate;
use crate::config::{Config, DEFAULT_GAME_MODE};
use crate::error::AppError;
use crate::storage::{SuggestionRecord, SuggestionStore};

pub struct SuggestionEmitter {
    game_mode: String,
}

impl Default for SuggestionEmitter {
    fn default() -> Self {
        SuggestionEmitter::new(DEFAULT_GAME_MODE)
    }
}

impl SuggestionEmitter {
    pub fn new(game_mode: impl Into<String>) -> Self {
        SuggestionEmitter {
            game_mode: game_mode.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        SuggestionEmitter::new(config.game_mode.clone())
    }

    /// Shapes ranked candidates into unscoped records, ranks starting at 1.
    pub fn to_records(
        &self,
        candidates: &[SuggestionCandidate],
        generated_at: DateTime<Utc>,
    ) -> Vec<SuggestionRecord> {
        candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| SuggestionRecord {
                id: Uuid::new_v4().simple().to_string(),
                rank: idx + 1,
                user_id: None,
                team_champions: candidate.team_champions.clone(),
                enemy_champions: candidate.enemy_champions.clone(),
                role: candidate.role.clone(),
                suggested_champion: candidate.suggested_champion.clone(),
                confidence: candidate.confidence,
                reasoning: Some(candidate.reasoning.clone()),
                game_mode: self.game_mode.clone(),
                tier: None,
                playstyle: candidate.playstyle.clone(),
                strengths: candidate.strengths.clone(),
                weaknesses: candidate.weaknesses.clone(),
                updated_at: generated_at,
            })
            .collect()
    }

    /// Replaces the stored unscoped suggestions with `candidates`.
    pub fn emit(
        &self,
        store: &mut dyn SuggestionStore,
        candidates: &[SuggestionCandidate],
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<SuggestionRecord>, AppError> {
        let records = self.to_records(candidates, generated_at);
        let written = store.replace_unscoped_suggestions(&records)?;
        info!(written, game_mode = %self.game_mode, "emitted suggestions");
        Ok(records)
    }
}
