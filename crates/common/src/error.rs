use serde::Serialize;
use thiserror::Error;

/// Common error type for the Okitakoy configuration crates
#[derive(Error, Debug)]
pub enum Error {
    /// Client request errors (4xx)
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    /// Internal errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO and serialization errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::ModelNotFound(_) => 404,
            Error::InvalidOrigin(_) => 400,

            Error::ConfigError(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
        }
    }

    /// Get error type for logging and response bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::ModelNotFound(_) => "model_not_found",
            Error::InvalidOrigin(_) => "invalid_origin",
            Error::ConfigError(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}

/// Error response for HTTP API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        ErrorResponse {
            error: ErrorDetail {
                message: err.to_string(),
                r#type: err.error_type().to_string(),
                code: err.status_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
