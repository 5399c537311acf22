use serde::{Deserialize, Serialize};

/// One participant-in-match observation, validated at the dataset boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRow {
    pub match_id: String,
    pub team_id: i32,
    pub role: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY (aliases allowed)
    pub champion_id: String,
    pub win: bool,
    pub allies: [String; 4],
    pub enemies: [String; 5],
    pub queue_id: Option<i32>,
    pub patch: Option<String>,
    pub game_duration: Option<i64>,
}

// Exported sample row, one object per participant
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCompositionRow {
    pub match_id: IdValue,
    pub team_id: i64,
    pub role: String,
    pub champion_id: IdValue,
    pub win: FlagValue,
    pub ally1: IdValue,
    pub ally2: IdValue,
    pub ally3: IdValue,
    pub ally4: IdValue,
    pub enemy1: IdValue,
    pub enemy2: IdValue,
    pub enemy3: IdValue,
    pub enemy4: IdValue,
    pub enemy5: IdValue,
    #[serde(default)]
    pub queue_id: Option<i32>,
    #[serde(default)]
    pub patch: Option<IdValue>,
    #[serde(default)]
    pub game_duration: Option<i64>,
}

/// Identifiers arrive either as strings or as bare numbers depending on the exporter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl IdValue {
    pub fn into_id(self) -> String {
        match self {
            IdValue::Text(text) => text.trim().to_string(),
            IdValue::Int(value) => value.to_string(),
            IdValue::Float(value) if value.fract() == 0.0 => format!("{}", value as i64),
            IdValue::Float(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(flag) => Some(*flag),
            FlagValue::Int(0) => Some(false),
            FlagValue::Int(1) => Some(true),
            FlagValue::Int(_) => None,
            FlagValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}
