use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeysmithError>;

#[derive(Debug, Error)]
pub enum KeysmithError {
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Passphrases do not match")]
    PassphraseMismatch,

    #[error("Could not determine the home directory; pass --out explicitly")]
    NoHomeDirectory,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
