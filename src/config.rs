use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 100;
pub const DEFAULT_GAME_MODE: &str = "RANKED_SOLO_5x5";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub limit: usize,
    pub game_mode: String,
    pub narratives: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: default_db_path(),
            limit: DEFAULT_SUGGESTION_LIMIT,
            game_mode: DEFAULT_GAME_MODE.to_string(),
            narratives: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(path) = env::var("SUGGESTIONS_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = PathBuf::from(path.trim());
            }
        }

        if let Ok(raw) = env::var("SUGGESTION_LIMIT") {
            config.limit = parse_limit(&raw)?;
        }

        if let Ok(mode) = env::var("SUGGESTION_GAME_MODE") {
            if !mode.trim().is_empty() {
                config.game_mode = mode.trim().to_string();
            }
        }

        if let Ok(raw) = env::var("SUGGESTION_NARRATIVES") {
            config.narratives = parse_flag(&raw)?;
        }

        Ok(config)
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".league_suggest")
        .join("suggestions.sqlite")
}

pub fn parse_limit(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::Config(format!(
            "SUGGESTION_LIMIT must be a positive integer, got {:?}",
            raw
        ))),
    }
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "SUGGESTION_NARRATIVES must be true or false, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_must_be_positive() {
        assert_eq!(parse_limit(" 25 ").unwrap(), 25);
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("many").is_err());
    }

    #[test]
    fn narrative_flag_accepts_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
