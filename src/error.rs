use std::fmt;
use thiserror::Error;

/// One rejected field in an input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub location: String,
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("batch rejected with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("batch parse error: {0}")]
    BatchParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScorecardError>;
