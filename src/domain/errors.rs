//! Domain error types
//!
//! This module defines the error hierarchy for Cookbook.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Cookbook error type
///
/// This is the primary error type used throughout the application.
/// Not-found is never an error: single-document lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum CookbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication provider errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A required argument (identifier, path, field) is missing or malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity invariant violated before a write
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored document could not be decoded into the requested type
    #[error("Failed to decode document {path}: {message}")]
    Decode { path: String, message: String },

    /// Serialization errors on the write path
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CookbookError {
    /// Builds a decoding error for the document at `path`
    pub fn decode(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CookbookError::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error is an invalid-argument condition
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CookbookError::InvalidArgument(_))
    }
}

/// Document store errors
///
/// Errors raised by a store backend (Cosmos DB, PostgreSQL, memory).
/// These errors don't expose third-party SDK types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Failed to create the backing container/table
    #[error("Failed to prepare storage: {0}")]
    SetupFailed(String),

    /// Failed to read a document
    #[error("Failed to read document: {0}")]
    ReadFailed(String),

    /// Failed to write a document
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// Failed to delete a document
    #[error("Failed to delete document: {0}")]
    DeleteFailed(String),

    /// Failed to run a query
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Throttling error (429)
    #[error("Request rate too large (429): {0}")]
    Throttled(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Authentication provider errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account already exists for the email
    #[error("An account already exists for {0}")]
    EmailExists(String),

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account has been disabled by an administrator
    #[error("User account is disabled")]
    UserDisabled,

    /// The password does not meet the provider's requirements
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// Too many failed attempts
    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    /// Authenticated, but no user profile is stored for the subject
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Failed to reach the provider
    #[error("Failed to reach authentication provider: {0}")]
    ConnectionFailed(String),

    /// Provider answered with an unexpected payload
    #[error("Invalid response from authentication provider: {0}")]
    InvalidResponse(String),

    /// Any other provider rejection
    #[error("Authentication rejected: {status} - {message}")]
    Rejected { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CookbookError {
    fn from(err: std::io::Error) -> Self {
        CookbookError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CookbookError {
    fn from(err: serde_json::Error) -> Self {
        CookbookError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CookbookError {
    fn from(err: toml::de::Error) -> Self {
        CookbookError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookbook_error_display() {
        let err = CookbookError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Throttled("5 seconds".to_string());
        let err: CookbookError = store_err.into();
        assert!(matches!(err, CookbookError::Store(_)));
    }

    #[test]
    fn test_auth_error_conversion() {
        let err: CookbookError = AuthError::InvalidCredentials.into();
        assert!(matches!(
            err,
            CookbookError::Auth(AuthError::InvalidCredentials)
        ));
        assert_eq!(
            err.to_string(),
            "Authentication error: Invalid email or password"
        );
    }

    #[test]
    fn test_decode_error_names_path() {
        let err = CookbookError::decode("RECIPES/r1", "missing field `title`");
        assert_eq!(
            err.to_string(),
            "Failed to decode document RECIPES/r1: missing field `title`"
        );
    }

    #[test]
    fn test_is_invalid_argument() {
        assert!(CookbookError::InvalidArgument("id".to_string()).is_invalid_argument());
        assert!(!CookbookError::Validation("qty".to_string()).is_invalid_argument());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CookbookError = io_err.into();
        assert!(matches!(err, CookbookError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CookbookError = json_err.into();
        assert!(matches!(err, CookbookError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CookbookError = toml_err.into();
        assert!(matches!(err, CookbookError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
