//! Error types for the grep directive crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrepError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrepError {
    // Secret resolution errors
    #[error("Secret not found: {0}")]
    SecretNotFound(String),
    #[error("Key '{key}' not found in secret '{secret}'")]
    SecretKeyNotFound { secret: String, key: String },
    #[error("Invalid secret reference: {0}")]
    InvalidSecret(String),
    // Configuration loading errors
    #[error("YAML parsing error: {0}")]
    YamlError(String),
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error("IO error: {0}")]
    IoError(String),
    // Rendering errors
    #[error("Render error: {0}")]
    RenderError(String),
}

impl GrepError {
    /// Whether this error came from resolving a secret-backed parameter.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            GrepError::SecretNotFound(_)
                | GrepError::SecretKeyNotFound { .. }
                | GrepError::InvalidSecret(_)
        )
    }
}

impl From<std::io::Error> for GrepError {
    fn from(err: std::io::Error) -> Self {
        GrepError::IoError(err.to_string())
    }
}

impl From<serde_yaml::Error> for GrepError {
    fn from(err: serde_yaml::Error) -> Self {
        GrepError::YamlError(err.to_string())
    }
}

impl From<serde_json::Error> for GrepError {
    fn from(err: serde_json::Error) -> Self {
        GrepError::JsonError(err.to_string())
    }
}
