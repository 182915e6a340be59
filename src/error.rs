use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrivacyError>;

#[derive(Error, Debug)]
pub enum PrivacyError {
    #[error("Invalid observation ({field}): {message}")]
    InvalidObservation { field: String, message: String },

    #[error("Source error ({source_kind}): {message}")]
    Source { source_kind: String, message: String },

    #[error("No suitable observation source for: {0}")]
    NoSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PrivacyError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidObservation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        2
    }
}
