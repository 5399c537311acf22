use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{info, warn};

use super::{SuggestionRecord, SuggestionStore};
use crate::error::AppError;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS composition_suggestions (
        id TEXT PRIMARY KEY,
        user_id TEXT NULL,
        team_champions TEXT NOT NULL,
        enemy_champions TEXT NOT NULL,
        role TEXT NOT NULL,
        suggested_champion TEXT NOT NULL,
        confidence REAL NOT NULL,
        reasoning TEXT NULL,
        game_mode TEXT NOT NULL,
        tier TEXT NULL,
        playstyle TEXT NULL,
        strengths TEXT NULL,
        weaknesses TEXT NULL,
        rank INTEGER NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_suggestions_user ON composition_suggestions(user_id);
    CREATE INDEX IF NOT EXISTS idx_suggestions_confidence ON composition_suggestions(confidence);

    CREATE TABLE IF NOT EXISTS suggestion_runs (
        run_id INTEGER PRIMARY KEY AUTOINCREMENT,
        started_at TEXT NOT NULL,
        finished_at TEXT NULL,
        status TEXT NOT NULL,
        records_attempted INTEGER NOT NULL,
        message TEXT NULL
    );
"#;

const INSERT_SUGGESTION: &str = r#"
    INSERT INTO composition_suggestions (
        id, user_id, team_champions, enemy_champions, role, suggested_champion,
        confidence, reasoning, game_mode, tier, playstyle, strengths, weaknesses,
        rank, updated_at
    ) VALUES (
        ?1, ?2, ?3, ?4, ?5, ?6,
        ?7, ?8, ?9, ?10, ?11, ?12, ?13,
        ?14, ?15
    )
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRun {
    pub run_id: i64,
    pub status: String,
    pub records_attempted: usize,
    pub message: Option<String>,
}

pub struct SqliteSuggestionStore {
    conn: Connection,
}

impl SqliteSuggestionStore {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let conn = Connection::open(path).map_err(|e| {
            AppError::Io(format!("Failed to open sqlite db {}: {}", path.display(), e))
        })?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Io(format!("Failed to open in-memory db: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| AppError::Io(format!("Failed to create schema: {}", e)))?;
        Ok(SqliteSuggestionStore { conn })
    }

    /// Inserts a record as-is, owner included.
    #[cfg(test)]
    pub(crate) fn insert(&mut self, record: &SuggestionRecord) -> Result<(), AppError> {
        insert_record(&self.conn, record).map_err(|e| AppError::persistence(1, e))
    }

    pub fn latest_run(&self) -> Result<Option<SuggestionRun>, AppError> {
        self.conn
            .query_row(
                "SELECT run_id, status, records_attempted, message
                 FROM suggestion_runs ORDER BY run_id DESC LIMIT 1",
                [],
                |row| {
                    Ok(SuggestionRun {
                        run_id: row.get(0)?,
                        status: row.get(1)?,
                        records_attempted: row.get::<_, i64>(2)? as usize,
                        message: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| AppError::Io(format!("Failed to read run log: {}", e)))
    }

    #[cfg(test)]
    pub(crate) fn count_all(&self) -> Result<usize, AppError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM composition_suggestions", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(|e| AppError::Io(format!("Failed to count suggestions: {}", e)))
    }

    fn start_run(&self, attempted: usize) -> Result<i64, AppError> {
        self.conn
            .execute(
                "INSERT INTO suggestion_runs (started_at, finished_at, status, records_attempted, message)
                 VALUES (?1, NULL, 'running', ?2, NULL)",
                params![Utc::now().to_rfc3339(), attempted as i64],
            )
            .map_err(|e| AppError::persistence(attempted, e))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn finish_run(&self, run_id: i64, status: &str, message: Option<&str>) {
        let result = self.conn.execute(
            "UPDATE suggestion_runs SET status = ?1, message = ?2, finished_at = ?3 WHERE run_id = ?4",
            params![status, message, Utc::now().to_rfc3339(), run_id],
        );
        if let Err(e) = result {
            warn!(run_id, error = %e, "failed to update suggestion run log");
        }
    }

    fn replace_in_transaction(&mut self, records: &[SuggestionRecord]) -> rusqlite::Result<usize> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM composition_suggestions WHERE user_id IS NULL", [])?;
        for record in records {
            insert_record(&tx, record)?;
        }
        tx.commit()?;
        info!(deleted, inserted = records.len(), "replaced unscoped suggestions");
        Ok(records.len())
    }
}

impl SuggestionStore for SqliteSuggestionStore {
    fn replace_unscoped_suggestions(
        &mut self,
        records: &[SuggestionRecord],
    ) -> Result<usize, AppError> {
        let attempted = records.len();
        let run_id = self.start_run(attempted)?;

        // The transaction rolls back on drop, so a failed insert leaves the previous set.
        match self.replace_in_transaction(records) {
            Ok(inserted) => {
                self.finish_run(run_id, "completed", Some("Suggestions replaced"));
                Ok(inserted)
            }
            Err(e) => {
                let message = e.to_string();
                self.finish_run(run_id, "failed", Some(&message));
                Err(AppError::persistence(attempted, message))
            }
        }
    }

    fn load_unscoped_suggestions(&self, limit: usize) -> Result<Vec<SuggestionRecord>, AppError> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT id, user_id, team_champions, enemy_champions, role, suggested_champion,
                       confidence, reasoning, game_mode, tier, playstyle, strengths, weaknesses,
                       rank, updated_at
                FROM composition_suggestions
                WHERE user_id IS NULL
                ORDER BY confidence DESC, updated_at DESC, rank ASC
                LIMIT ?1
                "#,
            )
            .map_err(|e| AppError::Io(format!("Failed to prepare suggestion query: {}", e)))?;

        let rows = stmt
            .query_map(params![limit as i64], read_record)
            .map_err(|e| AppError::Io(format!("Failed to query suggestions: {}", e)))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| AppError::Io(format!("Failed to decode suggestion: {}", e)))?);
        }
        Ok(out)
    }
}

fn insert_record(conn: &Connection, record: &SuggestionRecord) -> rusqlite::Result<()> {
    let team = encode_champions(&record.team_champions)?;
    let enemies = encode_champions(&record.enemy_champions)?;
    conn.execute(
        INSERT_SUGGESTION,
        params![
            record.id,
            record.user_id,
            team,
            enemies,
            record.role,
            record.suggested_champion,
            record.confidence,
            record.reasoning,
            record.game_mode,
            record.tier,
            record.playstyle,
            record.strengths,
            record.weaknesses,
            record.rank as i64,
            record.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<SuggestionRecord> {
    let team: String = row.get(2)?;
    let enemies: String = row.get(3)?;
    let updated_at: String = row.get(14)?;
    Ok(SuggestionRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        team_champions: decode_champions(2, &team)?,
        enemy_champions: decode_champions(3, &enemies)?,
        role: row.get(4)?,
        suggested_champion: row.get(5)?,
        confidence: row.get(6)?,
        reasoning: row.get(7)?,
        game_mode: row.get(8)?,
        tier: row.get(9)?,
        playstyle: row.get(10)?,
        strengths: row.get(11)?,
        weaknesses: row.get(12)?,
        rank: row.get::<_, i64>(13)? as usize,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    14,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
    })
}

fn encode_champions(champions: &[String]) -> rusqlite::Result<String> {
    serde_json::to_string(champions)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn decode_champions(column: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
