use thiserror::Error;

/// Errors that can occur while serving a recipe request
#[derive(Error, Debug)]
pub enum GenieError {
    /// Failed to reach the generation backend
    #[error("Failed to call generation backend: {0}")]
    Generation(#[from] reqwest::Error),

    /// Generation backend answered, but not with usable text
    #[error("Generation backend error: {0}")]
    GeneratorResponse(String),

    /// No generation backend is available
    #[error("Model is not available: {0}")]
    ModelUnavailable(String),

    /// Request did not carry a user query
    #[error("Missing userQuery in request body")]
    MissingQuery,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error (reading transcripts, binding the listener)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
