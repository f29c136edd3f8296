//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an authorization error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Map a non-success HTTP status and server message to an error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => Self::Validation(message),
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Api { status, message },
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(Error::from_status(400, "bad"), Error::Validation(_)));
        assert!(matches!(Error::from_status(401, "no"), Error::Unauthorized(_)));
        assert!(matches!(Error::from_status(403, "no"), Error::Unauthorized(_)));
        assert!(matches!(Error::from_status(404, "gone"), Error::NotFound(_)));
        assert!(matches!(Error::from_status(409, "taken"), Error::Conflict(_)));
        assert!(matches!(
            Error::from_status(500, "boom"),
            Error::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_api_error_message() {
        let err = Error::from_status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "API error (HTTP 502): Bad Gateway");
    }
}
