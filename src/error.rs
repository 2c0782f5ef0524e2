use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditorError {
    #[error("GitLab API returned {status} for {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AuditorError>;
