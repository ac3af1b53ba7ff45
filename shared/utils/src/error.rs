use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a board payload cannot be shaped into columns.
pub const BOARD_PROCESSING_MESSAGE: &str = "Failed to process board data. Please refresh the page.";

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AqsError {
    #[error("Missing input: {field} - {message}")]
    MissingInput { field: String, message: String },

    #[error("Transport error: {service} - {message}")]
    Transport { service: String, message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// How a failure should surface on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Non-fatal notice, e.g. nothing selected yet.
    Advisory,
    /// A fetch failed; show the message, keep the page.
    Transport,
    /// Payload could not be shaped; terminal for that view.
    Processing,
    Internal,
}

impl AqsError {
    pub fn missing_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "MISSING_INPUT",
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Processing { .. } => "PROCESSING_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput { .. } => ErrorKind::Advisory,
            Self::Transport { .. } | Self::Serialization { .. } => ErrorKind::Transport,
            Self::Processing { .. } => ErrorKind::Processing,
            Self::Configuration { .. } | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Text suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput { message, .. } => message.clone(),
            Self::Transport { message, .. } => message.clone(),
            Self::Processing { .. } => BOARD_PROCESSING_MESSAGE.to_string(),
            Self::Serialization { message } => format!("Unexpected response: {}", message),
            Self::Configuration { .. } | Self::Internal { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

pub type AqsResult<T> = Result<T, AqsError>;

impl From<reqwest::Error> for AqsError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport("HTTP Client", error.to_string())
    }
}

impl From<serde_json::Error> for AqsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for AqsError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            AqsError::missing_input("projectId", "Project ID is required").kind(),
            ErrorKind::Advisory
        );
        assert_eq!(AqsError::transport("api", "timeout").kind(), ErrorKind::Transport);
        assert_eq!(AqsError::processing("bad label").kind(), ErrorKind::Processing);
        assert_eq!(AqsError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_user_messages() {
        let missing = AqsError::missing_input("boqId", "BOQ ID is required");
        assert_eq!(missing.user_message(), "BOQ ID is required");
        assert_eq!(missing.error_code(), "MISSING_INPUT");

        let processing = AqsError::processing("label 2 is null");
        assert_eq!(processing.user_message(), BOARD_PROCESSING_MESSAGE);
        assert!(processing.to_string().contains("label 2"));
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AqsError = err.into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
