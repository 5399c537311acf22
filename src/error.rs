use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to persist {attempted} suggestions: {reason}")]
    Persistence { attempted: usize, reason: String },
}

impl AppError {
    pub fn persistence(attempted: usize, reason: impl ToString) -> Self {
        AppError::Persistence {
            attempted,
            reason: reason.to_string(),
        }
    }
}
